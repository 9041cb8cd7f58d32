//! Browser trait implementations over the bridge.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use demoreel_protocols::{
    Browser, BrowserContext, BrowserError, BrowserLauncher, ClickOptions, ContextOptions,
    HttpCredentials, LaunchOptions, LoadState, Page, ScreenshotOptions,
};

use super::bridge::{PlaywrightBridge, PlaywrightBridgeConfig};

/// Starts a bridge process per launched browser.
#[derive(Debug, Clone, Default)]
pub struct PlaywrightLauncher {
    config: PlaywrightBridgeConfig,
}

impl PlaywrightLauncher {
    pub fn new(config: PlaywrightBridgeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for PlaywrightLauncher {
    fn name(&self) -> &str {
        "playwright"
    }

    async fn launch(&self, options: LaunchOptions) -> Result<Box<dyn Browser>, BrowserError> {
        let bridge = Arc::new(PlaywrightBridge::new(self.config.clone()));
        bridge.start().await?;

        info!(
            "Launching Chromium (headless={}, slow_mo={:?})",
            options.headless, options.slow_mo_ms
        );
        match bridge.launch_browser(&options).await {
            Ok(browser_id) => Ok(Box::new(PlaywrightBrowser::new(bridge, browser_id))),
            Err(e) => {
                if let Err(stop) = bridge.stop().await {
                    warn!("Failed to stop bridge after launch failure: {}", stop);
                }
                Err(e.into())
            }
        }
    }
}

/// A Chromium instance owned by one bridge process.
pub struct PlaywrightBrowser {
    bridge: Arc<PlaywrightBridge>,
    browser_id: String,
}

impl PlaywrightBrowser {
    pub fn new(bridge: Arc<PlaywrightBridge>, browser_id: String) -> Self {
        Self { bridge, browser_id }
    }
}

#[async_trait]
impl Browser for PlaywrightBrowser {
    async fn new_context(
        &self,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError> {
        let context_id = self.bridge.new_context(&self.browser_id, &options).await?;
        debug!("Created context {}", context_id);
        Ok(Box::new(PlaywrightContext {
            bridge: self.bridge.clone(),
            context_id,
        }))
    }

    /// Closes the browser, then stops the bridge process.
    async fn close(&self) -> Result<(), BrowserError> {
        let closed = self.bridge.close_browser(&self.browser_id).await;
        self.bridge.stop().await?;
        closed.map_err(Into::into)
    }
}

pub struct PlaywrightContext {
    bridge: Arc<PlaywrightBridge>,
    context_id: String,
}

#[async_trait]
impl BrowserContext for PlaywrightContext {
    async fn new_page(&self) -> Result<Arc<dyn Page>, BrowserError> {
        let page_id = self.bridge.new_page(&self.context_id).await?;
        Ok(Arc::new(PlaywrightPage {
            bridge: self.bridge.clone(),
            page_id,
        }))
    }

    async fn set_http_credentials(&self, credentials: HttpCredentials) -> Result<(), BrowserError> {
        Ok(self
            .bridge
            .set_http_credentials(&self.context_id, &credentials)
            .await?)
    }

    async fn save_storage_state(&self, path: &Path) -> Result<(), BrowserError> {
        Ok(self.bridge.storage_state(&self.context_id, path).await?)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        Ok(self.bridge.close_context(&self.context_id).await?)
    }
}

pub struct PlaywrightPage {
    bridge: Arc<PlaywrightBridge>,
    page_id: String,
}

#[async_trait]
impl Page for PlaywrightPage {
    async fn goto(&self, url: &str, wait_until: LoadState) -> Result<(), BrowserError> {
        Ok(self.bridge.goto(&self.page_id, url, wait_until).await?)
    }

    async fn wait_for_load_state(&self, state: LoadState) -> Result<(), BrowserError> {
        Ok(self.bridge.wait_for_load_state(&self.page_id, state).await?)
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError> {
        Ok(self
            .bridge
            .wait_for_selector(&self.page_id, selector, timeout_ms)
            .await?)
    }

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), BrowserError> {
        Ok(self.bridge.click(&self.page_id, selector, options).await?)
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        Ok(self.bridge.fill(&self.page_id, selector, value).await?)
    }

    async fn type_text(&self, selector: &str, text: &str, delay_ms: u64) -> Result<(), BrowserError> {
        Ok(self
            .bridge
            .type_text(&self.page_id, selector, text, delay_ms)
            .await?)
    }

    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value, BrowserError> {
        Ok(self.bridge.evaluate(&self.page_id, script, arg).await?)
    }

    async fn add_style_tag(&self, css: &str) -> Result<(), BrowserError> {
        Ok(self.bridge.add_style_tag(&self.page_id, css).await?)
    }

    async fn screenshot(&self, options: ScreenshotOptions) -> Result<(), BrowserError> {
        Ok(self.bridge.screenshot(&self.page_id, &options).await?)
    }

    async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.bridge.get_url(&self.page_id).await?)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        Ok(self.bridge.close_page(&self.page_id).await?)
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
