//! Narration for a whole script.

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use demoreel_protocols::{NarrationContext, NarrationGenerator};
use demoreel_script::{DemoScript, StepKind};

pub use demoreel_protocols::{FallbackNarrator, fallback_narration};

/// Pause between generator calls.
pub const NARRATION_DELAY: Duration = Duration::from_millis(500);

/// How many preceding step kinds are passed as context.
const HISTORY: usize = 2;

/// Generated narration for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNarration {
    /// 1-based step index.
    pub index: usize,
    pub kind: StepKind,
    pub description: String,
    pub text: String,
}

/// Context for step `index` (0-based) of `script`.
pub fn step_context(script: &DemoScript, index: usize) -> NarrationContext {
    let kind = script.steps[index].kind();
    NarrationContext {
        demo_name: script.name.clone(),
        current_step: format!("Step {}: {}", index + 1, kind),
        page_title: None,
        previous_steps: script.steps[index.saturating_sub(HISTORY)..index]
            .iter()
            .map(|step| step.kind().to_string())
            .collect(),
    }
}

/// Generate narration for every step in order, waiting `delay` between calls.
pub async fn generate_for_steps(
    generator: &dyn NarrationGenerator,
    script: &DemoScript,
    delay: Duration,
) -> Vec<StepNarration> {
    let mut narrations = Vec::with_capacity(script.steps.len());

    for (i, step) in script.steps.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }
        let context = step_context(script, i);
        let text = generator.generate(&context).await;
        debug!("[{}] {} -> {}", generator.id(), context.current_step, text);

        narrations.push(StepNarration {
            index: i + 1,
            kind: step.kind(),
            description: step.description(),
            text,
        });
    }

    narrations
}
