//! Demo script schema definitions.
//!
//! These types are only ever produced by the validator, so every default is
//! already materialized. Serializing a [`DemoScript`] with
//! [`DemoScript::to_document`] yields the exact file shape it was read from.

use std::path::PathBuf;

use serde::Serialize;

pub use demoreel_protocols::{LoadState, MouseButton, ViewportSize};

mod schema_steps;

pub use schema_steps::*;

/// Default values applied by the validator.
pub mod defaults {
    pub const VIDEO_PATH: &str = "./recordings/demo.webm";
    pub const TYPE_SPEED_MS: u64 = 100;
    pub const WAIT_TIMEOUT_MS: u64 = 30_000;
    pub const HIGHLIGHT_COLOR: &str = "#4A90E2";
    pub const HIGHLIGHT_DURATION_MS: u64 = 2000;
    pub const HIGHLIGHT_BORDER_WIDTH: u32 = 3;
    pub const ZOOM_SCALE: f64 = 1.5;
    pub const ZOOM_DURATION_MS: u64 = 3000;
    pub const ZOOM_PADDING: u32 = 20;
    pub const SPOTLIGHT_DURATION_MS: u64 = 2500;
    pub const SPOTLIGHT_DIMNESS: f64 = 0.7;
    pub const SPOTLIGHT_BORDER_RADIUS: u32 = 8;
    pub const NARRATION_DURATION_MS: u64 = 3000;
    pub const NARRATION_FONT_SIZE: u32 = 24;
}

/// A validated demo script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoScript {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub config: DemoConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    pub steps: Vec<Step>,
}

#[derive(Serialize)]
struct Document<'a> {
    demo: &'a DemoScript,
}

impl DemoScript {
    /// Serialize back into the `{ "demo": { ... } }` file shape.
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(Document { demo: self }).unwrap_or(serde_json::Value::Null)
    }

    /// Authentication that actually needs to run.
    pub fn effective_auth(&self) -> Option<&Auth> {
        self.auth.as_ref().filter(|auth| !matches!(auth, Auth::None))
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    pub base_url: String,
    pub viewport: ViewportSize,
    pub video_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_mo: Option<u64>,
    pub headless: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_storage_state_path: Option<PathBuf>,
}

impl DemoConfig {
    pub fn resolve_url(&self, url: &str) -> String {
        resolve_url(&self.base_url, url)
    }
}

/// Resolve `url` against `base_url` unless it is already absolute.
///
/// Relative URLs are appended to the base, so a base with a path prefix
/// (`https://host/app`) keeps it.
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if url.is_empty() {
        format!("{}/", base)
    } else if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// Authentication performed before the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Auth {
    None,
    Basic { username: String, password: String },
    Form(FormAuth),
}

/// Login form authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormAuth {
    pub url: String,
    pub credentials: Credentials,
    pub selectors: FormSelectors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSelectors {
    pub username_field: String,
    pub password_field: String,
    pub submit_button: String,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
