//! Conversation session state machine.
//!
//! A [`Conversation`] owns the transcript and the `idle` / `awaiting reply`
//! state. Submitting non-blank text while idle appends the visitor message,
//! asks the [`AssistantClient`] for a reply and appends that reply. Anything
//! submitted while a reply is pending is dropped.
//!
//! The handle is cheap to clone so a UI can read the transcript and the
//! awaiting flag while a submission is in flight.

pub mod transcript;

pub use transcript::Transcript;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::client::{AssistantClient, FAILURE_REPLY};
use crate::portfolio::Portfolio;
use crate::types::Message;

/// Greeting naming the portfolio owner.
pub fn greeting_for(portfolio: &Portfolio) -> String {
    greeting(portfolio.first_name(), &portfolio.possessive())
}

fn greeting(owner: &str, possessive: &str) -> String {
    format!(
        "Hi! I'm {owner}'s AI assistant. Ask me anything about {possessive} projects, skills, or courses!"
    )
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// Change notifications for observers.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEvent {
    MessageAppended(Message),
    AwaitingChanged(bool),
}

/// Observer callback.
pub type ConversationEventSink = Arc<dyn Fn(ConversationEvent) + Send + Sync>;

/// Result of [`Conversation::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The submission was accepted; carries the assistant reply.
    Replied(Message),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

struct Session {
    transcript: Transcript,
    pending_input: String,
    state: SessionState,
}

struct Inner {
    session: Mutex<Session>,
    client: AssistantClient,
    sinks: Mutex<Vec<ConversationEventSink>>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, events: impl IntoIterator<Item = ConversationEvent>) {
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if sinks.is_empty() {
            return;
        }
        for event in events {
            for sink in &sinks {
                sink(event.clone());
            }
        }
    }

    /// `awaitingReply --replyArrives--> idle`.
    fn complete(&self, reply: String) -> Message {
        let message = Message::assistant(reply);
        {
            let mut session = self.session();
            session.transcript.append(message.clone());
            session.state = SessionState::Idle;
        }
        self.emit([
            ConversationEvent::MessageAppended(message.clone()),
            ConversationEvent::AwaitingChanged(false),
        ]);
        message
    }
}

/// Handle to one assistant session.
#[derive(Clone)]
pub struct Conversation {
    inner: Arc<Inner>,
}

impl Conversation {
    /// New session greeting the visitor on behalf of the client's portfolio owner.
    pub fn new(client: AssistantClient) -> Self {
        let context = client.system_context();
        let text = greeting(context.owner(), context.possessive());
        Self::with_greeting(client, text)
    }

    /// New session seeded with `greeting` as its only message.
    pub fn with_greeting(client: AssistantClient, greeting: impl Into<String>) -> Self {
        let mut transcript = Transcript::new();
        transcript.append(Message::assistant(greeting));
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(Session {
                    transcript,
                    pending_input: String::new(),
                    state: SessionState::Idle,
                }),
                client,
                sinks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register an observer for transcript and state changes.
    pub fn subscribe(&self, sink: ConversationEventSink) {
        self.inner
            .sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sink);
    }

    pub fn client(&self) -> &AssistantClient {
        &self.inner.client
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Vec<Message> {
        self.inner.session().transcript.messages().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.session().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.session().transcript.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.inner.session().state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state() == SessionState::AwaitingReply
    }

    /// Text the visitor is composing.
    pub fn input(&self) -> String {
        self.inner.session().pending_input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.inner.session().pending_input = text.into();
    }

    /// Submit the pending input.
    pub async fn send(&self) -> SubmitOutcome {
        let text = self.input();
        self.submit(&text).await
    }

    /// Submit `text`.
    ///
    /// Blank text, or any text while a reply is pending, is ignored. Otherwise
    /// the trimmed text is appended as a user message, pending input is
    /// cleared, and the call resolves once the assistant reply is appended.
    /// The reply runs on its own task, so dropping this future does not
    /// cancel it.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();
        let user_message = {
            let mut session = self.inner.session();
            if session.state == SessionState::AwaitingReply {
                debug!("Submission dropped while awaiting reply");
                return SubmitOutcome::Ignored(IgnoreReason::Busy);
            }
            if trimmed.is_empty() {
                return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
            }
            let message = Message::user(trimmed);
            session.transcript.append(message.clone());
            session.pending_input.clear();
            session.state = SessionState::AwaitingReply;
            message
        };
        self.inner.emit([
            ConversationEvent::MessageAppended(user_message),
            ConversationEvent::AwaitingChanged(true),
        ]);

        let inner = Arc::clone(&self.inner);
        let prompt = trimmed.to_string();
        let task = tokio::spawn(async move {
            let reply = inner.client.get_reply(&prompt).await;
            inner.complete(reply)
        });

        match task.await {
            Ok(message) => SubmitOutcome::Replied(message),
            Err(e) => {
                tracing::error!(error = %e, "Reply task aborted");
                let reply = self.inner.client.with_support_link(FAILURE_REPLY);
                SubmitOutcome::Replied(self.inner.complete(reply))
            }
        }
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.session();
        f.debug_struct("Conversation")
            .field("messages", &session.transcript.len())
            .field("state", &session.state)
            .finish()
    }
}
