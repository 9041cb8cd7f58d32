//! Anthropic-backed narration generator.

use async_trait::async_trait;
use tracing::{debug, warn};

use demoreel_protocols::{NarrationContext, NarrationError, NarrationGenerator, fallback_narration};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";

/// Narrator settings.
#[derive(Debug, Clone)]
pub struct AnthropicNarratorConfig {
    pub api_key: String,
    /// API root; requests go to `{base_url}/messages`.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl AnthropicNarratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

/// Generates one narration sentence per step with the Messages API.
///
/// Never fails: any error degrades to [`fallback_narration`].
pub struct AnthropicNarrator {
    config: AnthropicNarratorConfig,
    client: reqwest::Client,
}

impl AnthropicNarrator {
    pub fn new(config: AnthropicNarratorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &AnthropicNarratorConfig {
        &self.config
    }

    fn build_request(&self, context: &NarrationContext) -> ApiRequest {
        ApiRequest {
            model: self.config.model.clone(),
            messages: vec![ApiMessage::user(build_prompt(context))],
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        }
    }

    /// One API round trip, without fallback.
    pub async fn request_narration(&self, context: &NarrationContext) -> Result<String, NarrationError> {
        let url = format!("{}/messages", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&self.build_request(context))
            .send()
            .await
            .map_err(|e| NarrationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(body);
            return Err(NarrationError::ApiError { status, message });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| NarrationError::Network(e.to_string()))?;

        api_response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| NarrationError::EmptyResponse("no text content in API response".to_string()))
    }
}

#[async_trait]
impl NarrationGenerator for AnthropicNarrator {
    fn id(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, context: &NarrationContext) -> String {
        match self.request_narration(context).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Narration generation failed, using fallback: {}", e);
                let text = fallback_narration(context);
                debug!("Fallback narration for {}: {}", context.current_step, text);
                text
            }
        }
    }
}

/// Prompt for one step.
pub(crate) fn build_prompt(context: &NarrationContext) -> String {
    let mut prompt = String::from(
        "You are generating concise, professional narration for a product demo video.\n\n",
    );
    prompt.push_str(&format!("Demo: {}\n", context.demo_name));
    prompt.push_str(&format!("Current Step: {}\n", context.current_step));
    if let Some(title) = &context.page_title {
        prompt.push_str(&format!("Page Title: {}\n", title));
    }
    if !context.previous_steps.is_empty() {
        prompt.push_str(&format!("Previous Steps: {}\n", context.previous_steps.join(", ")));
    }
    prompt.push_str(
        "\nGenerate a single, engaging sentence (max 15 words) that narrates what's happening in this step of the demo.\n\
         The narration should be:\n\
         - Professional and conversational\n\
         - Clear and concise\n\
         - Focused on user value\n\
         - Present tense\n\n\
         Return only the narration text, no quotes or additional formatting.",
    );
    prompt
}

#[cfg(test)]
#[path = "narrator_tests.rs"]
mod tests;
