//! Helpers shared by the step executors.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use demoreel_protocols::BrowserError;

use super::ExecutionContext;
use crate::error::StepError;

impl ExecutionContext {
    /// Wait until `selector` is visible, failing with [`StepError::Timeout`].
    pub async fn wait_visible(&self, selector: &str, timeout_ms: u64) -> Result<(), StepError> {
        debug!("Waiting for {} (timeout {}ms)", selector, timeout_ms);
        match self.page.wait_for_selector(selector, timeout_ms).await {
            Ok(()) => Ok(()),
            Err(BrowserError::Timeout(_)) => Err(StepError::Timeout {
                selector: selector.to_string(),
                timeout_ms,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Visibility wait with the default selector timeout.
    pub async fn wait_visible_default(&self, selector: &str) -> Result<(), StepError> {
        self.wait_visible(selector, self.timings.selector_timeout_ms).await
    }

    /// Let animations and handlers settle.
    pub async fn settle(&self, ms: u64) {
        if ms > 0 {
            sleep(Duration::from_millis(ms)).await;
        }
    }

    /// Resolve a possibly relative URL against the script's base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        demoreel_script::resolve_url(&self.base_url, url)
    }
}
