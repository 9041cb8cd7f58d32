//! Interactive control channel.
//!
//! Pause steps block on a [`ControlInput`] until the operator confirms or
//! cancels. The read is synchronous; callers run it on a blocking thread.

use crate::error::ControlError;

/// Outcome of a confirmation read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Resume playback.
    Continue,
    /// Abort the whole run.
    Cancel,
}

/// Source of operator confirmations.
pub trait ControlInput: Send + Sync {
    /// Block until a single confirmation line or a cancel signal arrives.
    fn read_confirmation(&self, prompt: &str) -> Result<ControlSignal, ControlError>;
}
