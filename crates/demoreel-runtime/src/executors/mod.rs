//! Step executors.
//!
//! One executor per step kind. Executors share the helpers in [`support`]
//! through the [`ExecutionContext`] they receive with every step.

mod actions;
mod overlays;
mod pause;
mod registry;
pub mod support;

use std::sync::Arc;

use async_trait::async_trait;

use demoreel_protocols::{ControlInput, Page};

use crate::config::Timings;
use crate::effects::EffectRenderer;
use crate::error::StepError;

pub use actions::{
    ClickExecutor, NavigateExecutor, ScreenshotExecutor, ScrollExecutor, TypeExecutor,
    WaitExecutor,
};
pub use overlays::{HighlightExecutor, NarrationExecutor, SpotlightExecutor, ZoomExecutor};
pub use pause::PauseExecutor;
pub use registry::ExecutorRegistry;

/// Handles one step kind.
///
/// `execute` returns only once the step's effect is observably complete.
#[async_trait]
pub trait StepExecutor<S: Sync>: Send + Sync {
    async fn execute(&self, step: &S, ctx: &ExecutionContext) -> Result<(), StepError>;
}

/// Everything an executor may touch while running a step.
pub struct ExecutionContext {
    pub page: Arc<dyn Page>,
    pub effects: EffectRenderer,
    pub control: Arc<dyn ControlInput>,
    pub base_url: String,
    pub timings: Timings,
}

impl ExecutionContext {
    pub fn new(
        page: Arc<dyn Page>,
        effects: EffectRenderer,
        control: Arc<dyn ControlInput>,
        base_url: impl Into<String>,
        timings: Timings,
    ) -> Self {
        Self {
            page,
            effects,
            control,
            base_url: base_url.into(),
            timings,
        }
    }
}

#[cfg(test)]
#[path = "executors_tests.rs"]
mod tests;
