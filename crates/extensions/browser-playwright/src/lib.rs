//! Playwright browser backend for demoreel.
//!
//! Browser control goes through a Node.js process running Playwright.
//!
//! ```text
//! ┌─────────────────┐    JSON-RPC    ┌──────────────────┐
//! │  Rust Backend   │ ◄────────────► │ Node.js Bridge   │
//! │  (this crate)   │  stdin/stdout  │ (bridge_script)  │
//! └─────────────────┘                └──────────────────┘
//!                                           │
//!                                    Playwright API
//!                                           │
//!                                    ┌──────────────────┐
//!                                    │    Chromium      │
//!                                    └──────────────────┘
//! ```
//!
//! The bridge resolves `playwright` from the working directory first, then
//! from Node's global module paths.

mod backend;
mod bridge;
mod bridge_script;
mod browser_api;
mod error;

#[cfg(test)]
mod test_support;

pub use backend::{PlaywrightBrowser, PlaywrightContext, PlaywrightLauncher, PlaywrightPage};
pub use bridge::{PlaywrightBridge, PlaywrightBridgeConfig};
pub use error::PlaywrightError;
