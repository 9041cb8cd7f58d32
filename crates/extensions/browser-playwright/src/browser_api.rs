//! Browser, context and page methods for PlaywrightBridge.
//!
//! Handles returned by the bridge are opaque strings owned by the Node side.

use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};

use demoreel_protocols::{
    ClickOptions, ContextOptions, HttpCredentials, LaunchOptions, LoadState, ScreenshotOptions,
};

use super::bridge::PlaywrightBridge;
use super::error::PlaywrightError;

/// Extra response slack on top of a page-level wait.
const WAIT_SLACK: Duration = Duration::from_secs(5);

fn handle(result: Value, what: &str) -> Result<String, PlaywrightError> {
    result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PlaywrightError::CommunicationError(format!("Invalid {} response", what)))
}

impl PlaywrightBridge {
    // ============================================================================
    // Browser Methods
    // ============================================================================

    /// Launch Chromium and return its handle.
    pub async fn launch_browser(&self, options: &LaunchOptions) -> Result<String, PlaywrightError> {
        let result = self.call("launchBrowser", serde_json::to_value(options)?).await?;
        handle(result, "browser handle")
    }

    pub async fn close_browser(&self, browser_id: &str) -> Result<(), PlaywrightError> {
        self.call("closeBrowser", json!({ "browserId": browser_id }))
            .await?;
        Ok(())
    }

    // ============================================================================
    // Context Methods
    // ============================================================================

    pub async fn new_context(
        &self,
        browser_id: &str,
        options: &ContextOptions,
    ) -> Result<String, PlaywrightError> {
        let result = self
            .call(
                "newContext",
                json!({ "browserId": browser_id, "options": options }),
            )
            .await?;
        handle(result, "context handle")
    }

    pub async fn set_http_credentials(
        &self,
        context_id: &str,
        credentials: &HttpCredentials,
    ) -> Result<(), PlaywrightError> {
        self.call(
            "setHttpCredentials",
            json!({
                "contextId": context_id,
                "username": credentials.username,
                "password": credentials.password
            }),
        )
        .await?;
        Ok(())
    }

    /// Write cookies and local storage of the context to `path`.
    pub async fn storage_state(&self, context_id: &str, path: &Path) -> Result<(), PlaywrightError> {
        self.call(
            "storageState",
            json!({ "contextId": context_id, "path": path }),
        )
        .await?;
        Ok(())
    }

    /// Close the context. A pending recording is finalized before this returns.
    pub async fn close_context(&self, context_id: &str) -> Result<(), PlaywrightError> {
        self.call("closeContext", json!({ "contextId": context_id }))
            .await?;
        Ok(())
    }

    // ============================================================================
    // Page Methods
    // ============================================================================

    pub async fn new_page(&self, context_id: &str) -> Result<String, PlaywrightError> {
        let result = self
            .call("newPage", json!({ "contextId": context_id }))
            .await?;
        handle(result, "page handle")
    }

    pub async fn goto(
        &self,
        page_id: &str,
        url: &str,
        wait_until: LoadState,
    ) -> Result<(), PlaywrightError> {
        self.call(
            "goto",
            json!({ "pageId": page_id, "url": url, "waitUntil": wait_until.as_str() }),
        )
        .await?;
        Ok(())
    }

    pub async fn wait_for_load_state(
        &self,
        page_id: &str,
        state: LoadState,
    ) -> Result<(), PlaywrightError> {
        self.call(
            "waitForLoadState",
            json!({ "pageId": page_id, "state": state.as_str() }),
        )
        .await?;
        Ok(())
    }

    /// Wait until `selector` is visible. The response deadline follows `timeout_ms`.
    pub async fn wait_for_selector(
        &self,
        page_id: &str,
        selector: &str,
        timeout_ms: u64,
    ) -> Result<(), PlaywrightError> {
        let deadline = Duration::from_millis(self.config().response_timeout_ms)
            .max(Duration::from_millis(timeout_ms) + WAIT_SLACK);
        self.call_with_timeout(
            "waitForSelector",
            json!({ "pageId": page_id, "selector": selector, "timeout": timeout_ms }),
            deadline,
        )
        .await?;
        Ok(())
    }

    pub async fn click(
        &self,
        page_id: &str,
        selector: &str,
        options: ClickOptions,
    ) -> Result<(), PlaywrightError> {
        self.call(
            "click",
            json!({
                "pageId": page_id,
                "selector": selector,
                "button": options.button.as_str(),
                "clickCount": options.click_count
            }),
        )
        .await?;
        Ok(())
    }

    pub async fn fill(&self, page_id: &str, selector: &str, value: &str) -> Result<(), PlaywrightError> {
        self.call(
            "fill",
            json!({ "pageId": page_id, "selector": selector, "value": value }),
        )
        .await?;
        Ok(())
    }

    /// Type `text` one key at a time, `delay_ms` apart.
    pub async fn type_text(
        &self,
        page_id: &str,
        selector: &str,
        text: &str,
        delay_ms: u64,
    ) -> Result<(), PlaywrightError> {
        let typing = Duration::from_millis(delay_ms.saturating_mul(text.chars().count() as u64));
        let deadline = Duration::from_millis(self.config().response_timeout_ms) + typing;
        self.call_with_timeout(
            "type",
            json!({ "pageId": page_id, "selector": selector, "text": text, "delay": delay_ms }),
            deadline,
        )
        .await?;
        Ok(())
    }

    /// Call the function expression `script` in the page with `arg`.
    pub async fn evaluate(
        &self,
        page_id: &str,
        script: &str,
        arg: Value,
    ) -> Result<Value, PlaywrightError> {
        self.call(
            "evaluate",
            json!({ "pageId": page_id, "script": script, "arg": arg }),
        )
        .await
    }

    pub async fn add_style_tag(&self, page_id: &str, css: &str) -> Result<(), PlaywrightError> {
        self.call("addStyleTag", json!({ "pageId": page_id, "content": css }))
            .await?;
        Ok(())
    }

    pub async fn screenshot(
        &self,
        page_id: &str,
        options: &ScreenshotOptions,
    ) -> Result<(), PlaywrightError> {
        let mut params = serde_json::to_value(options)?;
        params["pageId"] = json!(page_id);
        self.call("screenshot", params).await?;
        Ok(())
    }

    pub async fn get_url(&self, page_id: &str) -> Result<String, PlaywrightError> {
        let result = self.call("url", json!({ "pageId": page_id })).await?;
        handle(result, "url")
    }

    pub async fn close_page(&self, page_id: &str) -> Result<(), PlaywrightError> {
        self.call("closePage", json!({ "pageId": page_id }))
            .await?;
        Ok(())
    }
}
