//! Model provider trait and the Gemini implementation.

pub mod google;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::types::{FinishReason, GenerationSettings, Usage};

/// A single-turn request: the fixed system prompt plus the visitor's text.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub system_prompt: Arc<str>,
    pub user_text: String,
    pub settings: GenerationSettings,
}

/// Response from a provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse {
    /// Generated text. `None` when the model produced nothing usable.
    pub text: Option<String>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

impl ProviderResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: Some(FinishReason::Stop),
            usage: Usage::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Remote text-generation capability.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a reply (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, AssistantError>;
}

/// Create the provider described by `config`.
///
/// Returns `None` when no credential is configured.
pub fn create_provider(config: &AssistantConfig) -> Option<Arc<dyn ModelProvider>> {
    let api_key = config.api_key()?;
    Some(Arc::new(google::GeminiProvider::new(
        config.model.clone(),
        api_key.to_string(),
        Some(config.base_url.clone()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_provider_without_key() {
        assert!(create_provider(&AssistantConfig::new()).is_none());
    }

    #[test]
    fn gemini_provider_with_key() {
        let config = AssistantConfig::new()
            .with_api_key("k")
            .with_model("gemini-2.0-flash");
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "google");
        assert_eq!(provider.model_id(), "gemini-2.0-flash");
    }
}
