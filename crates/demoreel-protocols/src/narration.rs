//! Narration text generation.
//!
//! Generators never fail: when the backing service is unavailable they
//! answer with [`fallback_narration`], a fixed keyword table.

use async_trait::async_trait;

/// Context describing the step being narrated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrationContext {
    pub demo_name: String,
    /// Human-readable description of the current step, e.g. `Step 2: click`.
    pub current_step: String,
    pub page_title: Option<String>,
    /// Kinds of the preceding steps, oldest first.
    pub previous_steps: Vec<String>,
}

/// Produces narration text for a step.
#[async_trait]
pub trait NarrationGenerator: Send + Sync {
    /// Returns the generator ID.
    fn id(&self) -> &str;

    /// Generate narration text. Falls back to [`fallback_narration`] on any failure.
    async fn generate(&self, context: &NarrationContext) -> String;
}

const FALLBACKS: &[(&str, &str)] = &[
    ("navigate", "Navigating to the next section"),
    ("click", "Clicking to explore this feature"),
    ("type", "Entering information"),
    ("highlight", "Notice this key feature"),
    ("zoom", "Taking a closer look"),
    ("spotlight", "Focusing on this important element"),
    ("scroll", "Scrolling to see more"),
];

const DEFAULT_FALLBACK: &str = "Exploring the next feature";

/// Deterministic narration derived from the step description.
pub fn fallback_narration(context: &NarrationContext) -> String {
    let step = context.current_step.to_lowercase();
    FALLBACKS
        .iter()
        .find(|(keyword, _)| step.contains(keyword))
        .map(|(_, text)| *text)
        .unwrap_or(DEFAULT_FALLBACK)
        .to_string()
}

/// Generator that only ever uses the fallback table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNarrator;

#[async_trait]
impl NarrationGenerator for FallbackNarrator {
    fn id(&self) -> &str {
        "fallback"
    }

    async fn generate(&self, context: &NarrationContext) -> String {
        fallback_narration(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(step: &str) -> NarrationContext {
        NarrationContext {
            demo_name: "Demo".to_string(),
            current_step: step.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fallback_matches_keyword() {
        assert_eq!(
            fallback_narration(&context("Step 1: navigate")),
            "Navigating to the next section"
        );
        assert_eq!(
            fallback_narration(&context("Step 4: ZOOM")),
            "Taking a closer look"
        );
    }

    #[test]
    fn test_fallback_default() {
        assert_eq!(
            fallback_narration(&context("Step 9: pause")),
            "Exploring the next feature"
        );
    }

    #[test]
    fn test_fallback_table_order_wins() {
        // "navigate" is checked before "click".
        assert_eq!(
            fallback_narration(&context("navigate then click")),
            "Navigating to the next section"
        );
    }

    #[tokio::test]
    async fn test_fallback_narrator() {
        let narrator = FallbackNarrator;
        assert_eq!(narrator.id(), "fallback");
        assert_eq!(
            narrator.generate(&context("Step 2: scroll")).await,
            "Scrolling to see more"
        );
    }
}
