//! Option and value types passed across the browser protocol.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Page load condition a navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// The `load` event fired.
    #[default]
    Load,
    /// The `DOMContentLoaded` event fired.
    DomContentLoaded,
    /// No network connections for at least 500ms.
    NetworkIdle,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Load => "load",
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
        }
    }

    /// Parse the wire name of a load state.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "load" => Some(LoadState::Load),
            "domcontentloaded" => Some(LoadState::DomContentLoaded),
            "networkidle" => Some(LoadState::NetworkIdle),
            _ => None,
        }
    }
}

/// Mouse button used for clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Viewport (and recording) size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Browser launch options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptions {
    pub headless: bool,
    /// Delay inserted by the engine before every operation.
    #[serde(rename = "slowMo", skip_serializing_if = "Option::is_none")]
    pub slow_mo_ms: Option<u64>,
    /// Extra command-line arguments for the browser binary.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Video recording options for a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOptions {
    /// Directory the engine records into.
    pub dir: PathBuf,
    pub size: ViewportSize,
    /// Final location of the recording once the page is closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_as: Option<PathBuf>,
}

/// Browsing context options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOptions {
    pub viewport: ViewportSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_video: Option<VideoOptions>,
    /// Previously saved storage state to restore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<PathBuf>,
}

/// HTTP basic-auth credentials for a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpCredentials {
    pub username: String,
    pub password: String,
}

/// Click options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickOptions {
    pub button: MouseButton,
    pub click_count: u32,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Left,
            click_count: 1,
        }
    }
}

/// Screenshot options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotOptions {
    pub path: PathBuf,
    pub full_page: bool,
    /// Capture only this element instead of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl ScreenshotOptions {
    /// Full-page capture to `path`.
    pub fn full_page(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            full_page: true,
            selector: None,
        }
    }
}
