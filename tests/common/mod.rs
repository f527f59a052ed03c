//! Shared test helpers and mock provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use portfolio_assistant::client::AssistantClient;
use portfolio_assistant::conversation::Conversation;
use portfolio_assistant::error::AssistantError;
use portfolio_assistant::portfolio::Portfolio;
use portfolio_assistant::prompt::SystemContext;
use portfolio_assistant::provider::{ModelProvider, ProviderRequest, ProviderResponse};

pub const SUPPORT_URL: &str = "http://ye-buna.com/kassahunmulatu";

enum MockReply {
    Text(String),
    Response(ProviderResponse),
    Empty,
    Fail(u16, String),
}

/// A mock provider that returns canned responses and records requests.
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ProviderRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Hold every call until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn queue_text(&self, text: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.to_string()));
    }

    pub fn queue_response(&self, response: ProviderResponse) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Response(response));
    }

    pub fn queue_empty(&self) {
        self.replies.lock().unwrap().push_back(MockReply::Empty);
    }

    pub fn queue_failure(&self, status: u16, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Fail(status, message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(ProviderResponse::text(text)),
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Empty) => Ok(ProviderResponse::empty()),
            Some(MockReply::Fail(status, message)) => Err(AssistantError::api(status, message)),
            None => Ok(ProviderResponse::text("Mock response")),
        }
    }
}

pub fn client_with(provider: Arc<MockProvider>) -> AssistantClient {
    let portfolio = Portfolio::default();
    AssistantClient::with_provider(
        provider,
        SystemContext::build(&portfolio),
        portfolio.support_url,
    )
}

pub fn conversation_with(provider: Arc<MockProvider>) -> Conversation {
    Conversation::new(client_with(provider))
}

pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
