//! Google Gemini API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::DEFAULT_BASE_URL;
use crate::error::AssistantError;
use crate::types::{FinishReason, GenerationSettings, Usage};

use super::http::{shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct GeminiProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(model: impl Into<String>, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": &*request.system_prompt}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": request.user_text}],
            }],
        });

        if let Some(gen_config) = generation_config(&request.settings) {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("generationConfig".into(), gen_config);
            }
        }

        body
    }
}

fn generation_config(settings: &GenerationSettings) -> Option<serde_json::Value> {
    let mut gen_config = serde_json::Map::new();
    if let Some(max) = settings.max_tokens {
        gen_config.insert("maxOutputTokens".into(), max.into());
    }
    if let Some(temp) = settings.temperature {
        gen_config.insert("temperature".into(), temp.into());
    }
    if let Some(top_p) = settings.top_p {
        gen_config.insert("topP".into(), top_p.into());
    }
    (!gen_config.is_empty()).then_some(serde_json::Value::Object(gen_config))
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AssistantError> {
        let body = self.build_request_body(request);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!(model = %self.model, "Gemini generate_text");

        let resp = shared_client()
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let bytes = resp.bytes().await?;
        let data: GeminiResponse = serde_json::from_slice(&bytes)?;
        Ok(data.into_response())
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

impl GeminiResponse {
    fn into_response(self) -> ProviderResponse {
        let usage = self
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        let Some(candidate) = self.candidates.into_iter().next() else {
            return ProviderResponse {
                text: None,
                finish_reason: None,
                usage,
            };
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        ProviderResponse {
            text: (!text.is_empty()).then_some(text),
            finish_reason: candidate.finish_reason.as_deref().map(FinishReason::from_gemini),
            usage,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
