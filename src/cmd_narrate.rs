//! `narrate` command handler.

use std::path::Path;

use tracing::info;

use demoreel_narration_anthropic::{AnthropicNarrator, AnthropicNarratorConfig};
use demoreel_protocols::NarrationGenerator;
use demoreel_runtime::{FallbackNarrator, NARRATION_DELAY, StepNarration, generate_for_steps};
use demoreel_script::{ScriptError, ScriptLoader};

/// Live narrator when an API key is set, fallback otherwise.
pub(crate) fn narrator(api_key: Option<String>) -> Box<dyn NarrationGenerator> {
    match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => Box::new(AnthropicNarrator::new(AnthropicNarratorConfig::new(key))),
        None => {
            info!("ANTHROPIC_API_KEY not set, using fallback narration");
            Box::new(FallbackNarrator)
        }
    }
}

/// Print narration for every step of `script`.
pub(crate) async fn narrate(
    loader: &ScriptLoader,
    script: &Path,
    api_key: Option<String>,
) -> Result<Vec<StepNarration>, ScriptError> {
    let demo = loader.load(script)?;
    let generator = narrator(api_key);

    println!("\n🎙  Narration for {} ({})\n", demo.name, generator.id());
    let narrations = generate_for_steps(generator.as_ref(), &demo, NARRATION_DELAY).await;
    for narration in &narrations {
        println!("{:>3}. {}", narration.index, narration.description);
        println!("     {}", narration.text);
    }
    println!();
    Ok(narrations)
}
