//! Portfolio assistant.
//!
//! The conversational core behind a personal portfolio site: a session state
//! machine over an append-only transcript, a client that turns visitor
//! questions into replies using a remote Gemini model, and a link extractor
//! for rendering replies with clickable URLs.
//!
//! # Quick Start
//!
//! ```no_run
//! use portfolio_assistant::prelude::*;
//!
//! # async fn example() {
//! let config = AssistantConfig::from_env();
//! let portfolio = Portfolio::default();
//! let conversation = Conversation::new(AssistantClient::new(&config, &portfolio));
//!
//! if let SubmitOutcome::Replied(reply) = conversation.submit("What do you teach?").await {
//!     println!("{}", reply.text());
//! }
//! # }
//! ```

pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod links;
pub mod portfolio;
pub mod prelude;
pub mod prompt;
pub mod provider;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
