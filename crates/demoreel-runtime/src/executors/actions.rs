//! Page interaction executors.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, warn};

use demoreel_protocols::{ClickOptions, ScreenshotOptions};
use demoreel_script::{
    ClickStep, NavigateStep, ScreenshotStep, ScrollStep, TypeStep, WaitStep, WaitTarget,
};

use super::{ExecutionContext, StepExecutor};
use crate::effects::scripts;
use crate::error::StepError;

pub struct NavigateExecutor;

#[async_trait]
impl StepExecutor<NavigateStep> for NavigateExecutor {
    async fn execute(&self, step: &NavigateStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        let url = ctx.resolve_url(&step.url);
        debug!("Navigating to {} (wait: {})", url, step.wait.as_str());
        ctx.page.goto(&url, step.wait).await?;
        Ok(())
    }
}

/// Clicks with retry. The only executor that retries.
pub struct ClickExecutor;

impl ClickExecutor {
    async fn try_click(&self, step: &ClickStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.selector).await?;
        ctx.page
            .click(
                &step.selector,
                ClickOptions {
                    button: step.button,
                    click_count: step.click_count,
                },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StepExecutor<ClickStep> for ClickExecutor {
    async fn execute(&self, step: &ClickStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        let attempts = ctx.timings.click_attempts.max(1);

        let mut attempt = 1;
        loop {
            match self.try_click(step, ctx).await {
                Ok(()) => {
                    ctx.settle(ctx.timings.click_settle_ms).await;
                    return Ok(());
                }
                Err(e) if attempt >= attempts => {
                    return Err(StepError::ClickFailed {
                        selector: step.selector.clone(),
                        attempts,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = Duration::from_millis(ctx.timings.click_retry_delay_ms);
                    warn!(
                        "Click on {} failed (attempt {}/{}): {}, retrying in {:?}",
                        step.selector, attempt, attempts, e, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

pub struct TypeExecutor;

#[async_trait]
impl StepExecutor<TypeStep> for TypeExecutor {
    async fn execute(&self, step: &TypeStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.selector).await?;
        if step.clear {
            ctx.page.fill(&step.selector, "").await?;
        }
        ctx.page
            .type_text(&step.selector, &step.text, step.speed)
            .await?;
        Ok(())
    }
}

pub struct WaitExecutor;

#[async_trait]
impl StepExecutor<WaitStep> for WaitExecutor {
    async fn execute(&self, step: &WaitStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        match step.target() {
            WaitTarget::Selector {
                selector,
                timeout_ms,
            } => ctx.wait_visible(selector, timeout_ms).await,
            WaitTarget::Duration(ms) => {
                sleep(Duration::from_millis(ms)).await;
                Ok(())
            }
        }
    }
}

pub struct ScrollExecutor;

#[async_trait]
impl StepExecutor<ScrollStep> for ScrollExecutor {
    async fn execute(&self, step: &ScrollStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.target).await?;
        let found = ctx
            .page
            .evaluate(
                scripts::SCROLL_INTO_VIEW,
                json!({
                    "selector": step.target,
                    "behavior": step.behavior.as_str(),
                    "block": step.block.as_str(),
                }),
            )
            .await?;
        if found == json!(false) {
            return Err(StepError::ElementNotFound(step.target.clone()));
        }
        ctx.settle(ctx.timings.scroll_settle_ms).await;
        Ok(())
    }
}

pub struct ScreenshotExecutor;

#[async_trait]
impl StepExecutor<ScreenshotStep> for ScreenshotExecutor {
    async fn execute(&self, step: &ScreenshotStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        if let Some(parent) = step.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = match &step.selector {
            Some(selector) => {
                ctx.wait_visible_default(selector).await?;
                ScreenshotOptions {
                    path: step.path.clone(),
                    full_page: false,
                    selector: Some(selector.clone()),
                }
            }
            None => ScreenshotOptions {
                path: step.path.clone(),
                full_page: step.full_page,
                selector: None,
            },
        };
        ctx.page.screenshot(options).await?;
        debug!("Screenshot saved to {}", step.path.display());
        Ok(())
    }
}
