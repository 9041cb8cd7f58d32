//! Browser automation traits.
//!
//! The playback engine owns one [`Browser`], one [`BrowserContext`] and one
//! [`Page`] per run and closes them in reverse order of creation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::options::{
    ClickOptions, ContextOptions, HttpCredentials, LaunchOptions, LoadState, ScreenshotOptions,
};
use crate::error::BrowserError;

/// Starts browser instances.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Returns the backend name, used in logs.
    fn name(&self) -> &str;

    /// Launch a new browser.
    async fn launch(&self, options: LaunchOptions) -> Result<Box<dyn Browser>, BrowserError>;
}

/// A running browser instance.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open an isolated browsing context.
    async fn new_context(
        &self,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError>;

    /// Close the browser and release the backend.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// An isolated browsing context (cookies, storage, recording).
#[async_trait]
pub trait BrowserContext: Send + Sync {
    /// Open a new page in this context.
    async fn new_page(&self) -> Result<Arc<dyn Page>, BrowserError>;

    /// Use HTTP basic-auth credentials for every request of this context.
    async fn set_http_credentials(&self, credentials: HttpCredentials) -> Result<(), BrowserError>;

    /// Persist cookies and local storage to `path`.
    async fn save_storage_state(&self, path: &Path) -> Result<(), BrowserError>;

    /// Close the context. Finalizes any recording.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// A single page.
///
/// Every method returns only once the backend reports the operation as done.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate and wait for `wait_until`.
    async fn goto(&self, url: &str, wait_until: LoadState) -> Result<(), BrowserError>;

    /// Wait until the page reaches `state`.
    async fn wait_for_load_state(&self, state: LoadState) -> Result<(), BrowserError>;

    /// Wait until `selector` matches a visible element.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError>;

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), BrowserError>;

    /// Replace the value of an input.
    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Type `text` key by key with `delay_ms` between keystrokes.
    async fn type_text(&self, selector: &str, text: &str, delay_ms: u64) -> Result<(), BrowserError>;

    /// Evaluate a function expression in the page, invoked with `arg`.
    async fn evaluate(
        &self,
        script: &str,
        arg: serde_json::Value,
    ) -> Result<serde_json::Value, BrowserError>;

    /// Inject a `<style>` tag.
    async fn add_style_tag(&self, css: &str) -> Result<(), BrowserError>;

    async fn screenshot(&self, options: ScreenshotOptions) -> Result<(), BrowserError>;

    /// Current page URL.
    async fn url(&self) -> Result<String, BrowserError>;

    async fn close(&self) -> Result<(), BrowserError>;
}
