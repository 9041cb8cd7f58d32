//! Player settings.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) yields the stock timings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerConfigError {
    #[error("Failed to read player config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse player config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid player config: {0}")]
    Invalid(String),
}

/// Root player configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub timings: Timings,

    #[serde(default)]
    pub diagnostics: Diagnostics,

    #[serde(default)]
    pub bridge: BridgeSettings,
}

/// Timing knobs shared by the step executors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Visibility wait for action and effect selectors.
    #[serde(default = "default_selector_timeout")]
    pub selector_timeout_ms: u64,

    #[serde(default = "default_click_attempts")]
    pub click_attempts: u32,

    #[serde(default = "default_click_retry_delay")]
    pub click_retry_delay_ms: u64,

    #[serde(default = "default_click_settle")]
    pub click_settle_ms: u64,

    #[serde(default = "default_scroll_settle")]
    pub scroll_settle_ms: u64,

    /// Visibility wait for login form fields.
    #[serde(default = "default_auth_selector_timeout")]
    pub auth_selector_timeout_ms: u64,
}

fn default_selector_timeout() -> u64 {
    30_000
}

fn default_click_attempts() -> u32 {
    3
}

fn default_click_retry_delay() -> u64 {
    1000
}

fn default_click_settle() -> u64 {
    300
}

fn default_scroll_settle() -> u64 {
    500
}

fn default_auth_selector_timeout() -> u64 {
    10_000
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            selector_timeout_ms: default_selector_timeout(),
            click_attempts: default_click_attempts(),
            click_retry_delay_ms: default_click_retry_delay(),
            click_settle_ms: default_click_settle(),
            scroll_settle_ms: default_scroll_settle(),
            auth_selector_timeout_ms: default_auth_selector_timeout(),
        }
    }
}

/// Where failure screenshots go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    #[serde(default = "default_error_screenshot")]
    pub error_screenshot: PathBuf,

    #[serde(default = "default_auth_screenshot")]
    pub auth_screenshot: PathBuf,
}

fn default_error_screenshot() -> PathBuf {
    PathBuf::from("./error-screenshot.png")
}

fn default_auth_screenshot() -> PathBuf {
    PathBuf::from("./auth-error.png")
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            error_screenshot: default_error_screenshot(),
            auth_screenshot: default_auth_screenshot(),
        }
    }
}

/// Browser bridge process settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Node.js executable; searched on `PATH` when unset.
    #[serde(default)]
    pub node_path: Option<PathBuf>,

    #[serde(default = "default_response_timeout")]
    pub response_timeout_secs: u64,
}

fn default_response_timeout() -> u64 {
    60
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            node_path: None,
            response_timeout_secs: default_response_timeout(),
        }
    }
}

impl PlayerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PlayerConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> Result<Self, PlayerConfigError> {
        let mut config: PlayerConfig = toml::from_str(content)?;
        config.expand_paths();
        config.validate()?;
        Ok(config)
    }

    fn expand_paths(&mut self) {
        self.diagnostics.error_screenshot = expand_path(&self.diagnostics.error_screenshot);
        self.diagnostics.auth_screenshot = expand_path(&self.diagnostics.auth_screenshot);
        if let Some(node) = &self.bridge.node_path {
            self.bridge.node_path = Some(expand_path(node));
        }
    }

    fn validate(&self) -> Result<(), PlayerConfigError> {
        if self.timings.click_attempts == 0 {
            return Err(PlayerConfigError::Invalid(
                "timings.click_attempts must be at least 1".to_string(),
            ));
        }
        if self.timings.selector_timeout_ms == 0 || self.timings.auth_selector_timeout_ms == 0 {
            return Err(PlayerConfigError::Invalid(
                "selector timeouts must be greater than 0".to_string(),
            ));
        }
        if self.bridge.response_timeout_secs == 0 {
            return Err(PlayerConfigError::Invalid(
                "bridge.response_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand `~` and `$VAR` in a configured path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}
