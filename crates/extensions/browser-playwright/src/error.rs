//! Playwright backend errors.

use thiserror::Error;

use demoreel_protocols::BrowserError;

/// Playwright backend errors.
#[derive(Debug, Error)]
pub enum PlaywrightError {
    /// Bridge process failed to start.
    #[error("Bridge failed to start: {0}")]
    BridgeStartFailed(String),

    /// Bridge process exited or closed its output.
    #[error("Bridge process died: {0}")]
    BridgeDied(String),

    /// Communication error with bridge.
    #[error("Bridge communication error: {0}")]
    CommunicationError(String),

    /// Bridge returned an error response.
    #[error("Bridge error ({kind}): {message}")]
    BridgeError { kind: String, message: String },

    /// No response within the allowed time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Bridge not started.
    #[error("Bridge not initialized")]
    NotInitialized,

    /// Node.js not found.
    #[error("Node.js not found. Install Node.js >= 18 or set bridge.node_path")]
    NodeNotFound,

    /// Playwright not installed.
    #[error("Playwright not installed. Run: npm install playwright && npx playwright install chromium")]
    PlaywrightNotInstalled,
}

impl PlaywrightError {
    /// Build from an error response sent by the bridge script.
    pub(crate) fn remote(kind: Option<String>, message: String) -> Self {
        let kind = kind.unwrap_or_else(|| "action".to_string());
        match kind.as_str() {
            "playwright_missing" => PlaywrightError::PlaywrightNotInstalled,
            _ => PlaywrightError::BridgeError { kind, message },
        }
    }
}

impl From<std::io::Error> for PlaywrightError {
    fn from(e: std::io::Error) -> Self {
        PlaywrightError::CommunicationError(e.to_string())
    }
}

impl From<serde_json::Error> for PlaywrightError {
    fn from(e: serde_json::Error) -> Self {
        PlaywrightError::CommunicationError(format!("JSON error: {}", e))
    }
}

impl From<PlaywrightError> for BrowserError {
    fn from(e: PlaywrightError) -> Self {
        match e {
            PlaywrightError::Timeout(message) => BrowserError::Timeout(message),
            PlaywrightError::BridgeError { kind, message } => match kind.as_str() {
                "timeout" => BrowserError::Timeout(message),
                "navigation" => BrowserError::NavigationFailed(message),
                "javascript" => BrowserError::JavaScriptError(message),
                "screenshot" => BrowserError::ScreenshotFailed(message),
                "launch" => BrowserError::LaunchFailed(message),
                "closed" => BrowserError::Closed(message),
                _ => BrowserError::ActionFailed(message),
            },
            PlaywrightError::NotInitialized | PlaywrightError::BridgeDied(_) => {
                BrowserError::Closed(e.to_string())
            }
            PlaywrightError::BridgeStartFailed(_)
            | PlaywrightError::NodeNotFound
            | PlaywrightError::PlaywrightNotInstalled => BrowserError::LaunchFailed(e.to_string()),
            PlaywrightError::CommunicationError(_) => BrowserError::Backend(e.to_string()),
        }
    }
}
