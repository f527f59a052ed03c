//! The assistant client: one visitor utterance in, one displayable reply out.
//!
//! [`AssistantClient::get_reply`] never fails. Missing configuration, remote
//! errors and empty model output each resolve to a fixed reply string, so
//! callers only ever see text to show.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::portfolio::Portfolio;
use crate::prompt::SystemContext;
use crate::provider::{self, ModelProvider, ProviderRequest, ProviderResponse};
use crate::types::GenerationSettings;
use crate::util::timeout::with_timeout;

/// Reply used when no API key is configured.
pub const DEGRADED_REPLY: &str =
    "I'm sorry, I'm not correctly configured to answer questions right now (API Key missing).";

/// Reply used when the model returns no text.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response at the moment.";

/// Reply used when the remote call fails.
pub const FAILURE_REPLY: &str =
    "Sorry, I'm having trouble connecting to the AI service right now. Please try again later.";

/// Append the support suffix unless `body` already mentions `support_url`.
///
/// `possessive` names whose work is being supported ("his", "Ada's").
pub fn append_support_link(body: &str, support_url: &str, possessive: &str) -> String {
    if body.contains(support_url) {
        return body.to_string();
    }
    format!(
        "{body}\n\n☕ If you found this helpful, consider supporting {possessive} work:\n👉 {support_url}"
    )
}

/// Wraps the remote model call.
pub struct AssistantClient {
    provider: Option<Arc<dyn ModelProvider>>,
    context: SystemContext,
    support_url: String,
    settings: GenerationSettings,
    timeout: Option<Duration>,
}

impl AssistantClient {
    /// Build from configuration. Without a credential the client is degraded.
    pub fn new(config: &AssistantConfig, portfolio: &Portfolio) -> Self {
        let context = SystemContext::build(portfolio);
        let client = match provider::create_provider(config) {
            Some(provider) => Self::with_provider(provider, context, &portfolio.support_url),
            None => Self::degraded(context, &portfolio.support_url),
        };
        client
            .with_settings(config.settings.clone())
            .with_timeout(config.request_timeout)
    }

    /// Client backed by an explicit provider.
    pub fn with_provider(
        provider: Arc<dyn ModelProvider>,
        context: SystemContext,
        support_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: Some(provider),
            context,
            support_url: support_url.into(),
            settings: GenerationSettings::default(),
            timeout: None,
        }
    }

    /// Client with no remote capability.
    pub fn degraded(context: SystemContext, support_url: impl Into<String>) -> Self {
        Self {
            provider: None,
            context,
            support_url: support_url.into(),
            settings: GenerationSettings::default(),
            timeout: None,
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a remote provider is available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn system_context(&self) -> &SystemContext {
        &self.context
    }

    pub fn support_url(&self) -> &str {
        &self.support_url
    }

    /// `body` with the support suffix for this portfolio.
    pub fn with_support_link(&self, body: &str) -> String {
        append_support_link(body, &self.support_url, self.context.possessive())
    }

    /// Produce a reply for `user_text`. Always returns non-empty text.
    pub async fn get_reply(&self, user_text: &str) -> String {
        let Some(provider) = self.provider.as_deref() else {
            info!("API key missing, answering in degraded mode");
            return DEGRADED_REPLY.to_string();
        };

        let body = match self.request_reply(provider, user_text).await {
            Ok(ProviderResponse {
                text: Some(text),
                finish_reason,
                usage,
            }) if !text.is_empty() => {
                debug!(
                    model = provider.model_id(),
                    finish_reason = ?finish_reason,
                    total_tokens = usage.total_tokens,
                    "Model replied"
                );
                text
            }
            Ok(response) => {
                debug!(
                    model = provider.model_id(),
                    finish_reason = ?response.finish_reason,
                    total_tokens = response.usage.total_tokens,
                    "Model returned no text"
                );
                EMPTY_REPLY.to_string()
            }
            Err(e) => {
                warn!(
                    provider = provider.provider_name(),
                    model = provider.model_id(),
                    category = %e.category(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Assistant request failed"
                );
                FAILURE_REPLY.to_string()
            }
        };

        self.with_support_link(&body)
    }

    async fn request_reply(
        &self,
        provider: &dyn ModelProvider,
        user_text: &str,
    ) -> Result<ProviderResponse> {
        let request = ProviderRequest {
            system_prompt: self.context.shared(),
            user_text: user_text.to_string(),
            settings: self.settings.clone(),
        };

        debug!(model = provider.model_id(), "Requesting assistant reply");
        with_timeout(self.timeout, provider.generate_text(&request)).await
    }
}
