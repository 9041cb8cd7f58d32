//! # demoreel Protocols
//!
//! Protocol definitions (traits) shared by the demoreel playback engine and
//! its backends. Browser automation, the pause control channel and narration
//! text generation are all reached through these seams so the engine never
//! depends on a concrete backend.
//!
//! ## Core Traits
//!
//! - [`BrowserLauncher`] - Starts a browser backend
//! - [`Browser`] - A running browser instance
//! - [`BrowserContext`] - An isolated, recordable browsing context
//! - [`Page`] - A single page and its interaction primitives
//! - [`ControlInput`] - Interactive confirmation channel used by pause steps
//! - [`NarrationGenerator`] - Produces narration text for a step

pub mod browser;
pub mod control;
pub mod error;
pub mod narration;

pub use browser::{
    Browser, BrowserContext, BrowserLauncher, ClickOptions, ContextOptions, HttpCredentials,
    LaunchOptions, LoadState, MouseButton, Page, ScreenshotOptions, VideoOptions, ViewportSize,
};
pub use control::{ControlInput, ControlSignal};
pub use error::{BrowserError, ControlError, NarrationError};
pub use narration::{fallback_narration, FallbackNarrator, NarrationContext, NarrationGenerator};
