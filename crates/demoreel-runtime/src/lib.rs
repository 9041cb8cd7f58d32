//! # Demoreel Runtime
//!
//! Playback engine for scripted demos: the step executors, the overlay
//! effects they drive, and the session lifecycle around them.

pub mod config;
pub mod control;
pub mod effects;
pub mod error;
pub mod executors;
pub mod narration;
pub mod player;

#[cfg(test)]
mod test_support;

pub use config::{BridgeSettings, Diagnostics, PlayerConfig, PlayerConfigError, Timings};
pub use control::LineControl;
pub use effects::EffectRenderer;
pub use error::{PlayerError, StepError};
pub use executors::{ExecutionContext, ExecutorRegistry, StepExecutor};
pub use narration::{FallbackNarrator, NARRATION_DELAY, StepNarration, generate_for_steps};
pub use player::{DemoPlayer, PlayOptions, PlaybackPhase, PlaybackReport};
