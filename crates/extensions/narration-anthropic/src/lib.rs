//! Anthropic narration generator for demoreel.

mod api;
mod narrator;

pub use narrator::{AnthropicNarrator, AnthropicNarratorConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
