//! Tests for the conversation state machine.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{conversation_with, count_occurrences, MockProvider, SUPPORT_URL};
use portfolio_assistant::conversation::{
    Conversation, ConversationEvent, IgnoreReason, SessionState, SubmitOutcome,
};
use portfolio_assistant::types::Role;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

async fn wait_until(conversation: &Conversation, awaiting: bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while conversation.is_awaiting_reply() != awaiting {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("state change");
}

#[test]
fn fresh_session_is_seeded_with_greeting() {
    let conversation = conversation_with(Arc::new(MockProvider::new()));

    let transcript = conversation.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role(), Role::Assistant);
    assert!(!conversation.is_awaiting_reply());
}

#[tokio::test]
async fn submit_appends_user_then_assistant() {
    let provider = Arc::new(MockProvider::new());
    provider.queue_text("He builds web apps.");
    let conversation = conversation_with(provider);

    let outcome = conversation.submit("  What does he do?  ").await;

    let transcript = conversation.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].role(), Role::User);
    assert_eq!(transcript[1].text(), "What does he do?");
    assert_eq!(transcript[2].role(), Role::Assistant);
    assert!(transcript[2].text().starts_with("He builds web apps."));
    assert_eq!(outcome, SubmitOutcome::Replied(transcript[2].clone()));
    assert_eq!(conversation.state(), SessionState::Idle);
}

#[tokio::test]
async fn repeated_submissions_grow_by_two_in_order() {
    let provider = Arc::new(MockProvider::new());
    let conversation = conversation_with(provider.clone());

    for (i, question) in ["one", "two", "three"].iter().enumerate() {
        conversation.submit(question).await;
        assert_eq!(conversation.len(), 1 + 2 * (i + 1));
    }

    let roles: Vec<Role> = conversation.transcript().iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
        ]
    );
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn blank_submissions_are_no_ops() {
    let provider = Arc::new(MockProvider::new());
    let conversation = conversation_with(provider.clone());
    let before = conversation.transcript();

    for text in ["", "   ", "\n\t "] {
        assert_eq!(
            conversation.submit(text).await,
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput)
        );
    }

    assert_eq!(conversation.transcript(), before);
    assert_eq!(conversation.state(), SessionState::Idle);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn submissions_while_awaiting_are_dropped() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(MockProvider::gated(gate.clone()));
    provider.queue_text("first answer");
    let conversation = conversation_with(provider.clone());

    let first = {
        let conversation = conversation.clone();
        tokio::spawn(async move { conversation.submit("first").await })
    };
    wait_until(&conversation, true).await;

    let during = conversation.transcript();
    assert_eq!(during.len(), 2);
    assert_eq!(during[1].text(), "first");

    assert_eq!(
        conversation.submit("second").await,
        SubmitOutcome::Ignored(IgnoreReason::Busy)
    );
    assert_eq!(conversation.transcript(), during);

    gate.notify_one();
    let outcome = first.await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Replied(ref m) if m.text().starts_with("first answer")));
    assert_eq!(conversation.len(), 3);
    assert_eq!(provider.calls(), 1);
    assert!(!conversation.is_awaiting_reply());
}

#[tokio::test]
async fn dropped_submit_still_completes_reply() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(MockProvider::gated(gate.clone()));
    let conversation = conversation_with(provider);

    let submit = {
        let conversation = conversation.clone();
        tokio::spawn(async move { conversation.submit("hello?").await })
    };
    wait_until(&conversation, true).await;
    submit.abort();

    gate.notify_one();
    wait_until(&conversation, false).await;

    let transcript = conversation.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].role(), Role::Assistant);
}

#[tokio::test]
async fn failure_still_yields_one_assistant_message() {
    let provider = Arc::new(MockProvider::new());
    provider.queue_failure(500, "boom");
    let conversation = conversation_with(provider);

    conversation.submit("hello").await;

    let transcript = conversation.transcript();
    assert_eq!(transcript.len(), 3);
    let reply = transcript[2].text();
    assert!(reply.contains("having trouble connecting"));
    assert_eq!(count_occurrences(reply, SUPPORT_URL), 1);
}

#[tokio::test]
async fn observers_see_events_in_order() {
    let conversation = conversation_with(Arc::new(MockProvider::new()));
    let seen: Arc<Mutex<Vec<ConversationEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    conversation.subscribe(Arc::new(move |event| sink_seen.lock().unwrap().push(event)));

    conversation.submit("hi").await;
    conversation.submit("   ").await;

    let events = seen.lock().unwrap().clone();
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], ConversationEvent::MessageAppended(m) if m.role() == Role::User));
    assert_eq!(events[1], ConversationEvent::AwaitingChanged(true));
    assert!(
        matches!(&events[2], ConversationEvent::MessageAppended(m) if m.role() == Role::Assistant)
    );
    assert_eq!(events[3], ConversationEvent::AwaitingChanged(false));
}
