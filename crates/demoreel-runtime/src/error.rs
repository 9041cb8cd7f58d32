//! Playback errors.

use std::path::PathBuf;

use thiserror::Error;

use demoreel_protocols::{BrowserError, ControlError};
use demoreel_script::ScriptError;

/// Failure of a single step handler.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for selector: {selector} ({timeout_ms}ms)")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("Failed to click selector after {attempts} attempts: {selector}")]
    ClickFailed {
        selector: String,
        attempts: u32,
        #[source]
        source: Box<StepError>,
    },

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("Demo cancelled by operator")]
    Cancelled,

    #[error("Control input error: {0}")]
    Control(#[from] ControlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(
        "Storage state file not found: {}. Run once with `saveStorageStatePath` set to record it, or remove `storageStatePath` from the config.",
        path.display()
    )]
    StorageStateMissing { path: PathBuf },

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error(
        "Authentication failed at {login_url} (current URL: {current_url}; selectors: username={username_field}, password={password_field}, submit={submit_button}): {source}"
    )]
    Authentication {
        login_url: String,
        current_url: String,
        username_field: String,
        password_field: String,
        submit_button: String,
        #[source]
        source: StepError,
    },

    #[error("Step {index} failed ({description}): {source}")]
    Step {
        index: usize,
        description: String,
        #[source]
        source: StepError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlayerError {
    /// Whether the operator cancelled the run from a pause step.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            PlayerError::Step {
                source: StepError::Cancelled,
                ..
            }
        )
    }
}
