//! Visual effect executors.

use async_trait::async_trait;
use tracing::info;

use demoreel_script::{HighlightStep, NarrationStep, SpotlightStep, ZoomStep};

use super::{ExecutionContext, StepExecutor};
use crate::error::StepError;

pub struct HighlightExecutor;

#[async_trait]
impl StepExecutor<HighlightStep> for HighlightExecutor {
    async fn execute(&self, step: &HighlightStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.selector).await?;
        ctx.effects.highlight(step).await
    }
}

pub struct ZoomExecutor;

#[async_trait]
impl StepExecutor<ZoomStep> for ZoomExecutor {
    async fn execute(&self, step: &ZoomStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.selector).await?;
        ctx.effects.zoom(step).await
    }
}

pub struct SpotlightExecutor;

#[async_trait]
impl StepExecutor<SpotlightStep> for SpotlightExecutor {
    async fn execute(&self, step: &SpotlightStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        ctx.wait_visible_default(&step.selector).await?;
        ctx.effects.spotlight(step).await
    }
}

pub struct NarrationExecutor;

#[async_trait]
impl StepExecutor<NarrationStep> for NarrationExecutor {
    async fn execute(&self, step: &NarrationStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        if step.auto_generate {
            info!("autoGenerate is set; showing the scripted text (use `demoreel narrate` to generate)");
        }
        ctx.effects.show_narration(step).await
    }
}
