//! Convenience re-exports for common use.

pub use crate::client::AssistantClient;
pub use crate::config::AssistantConfig;
pub use crate::conversation::{Conversation, ConversationEvent, IgnoreReason, SubmitOutcome};
pub use crate::error::{AssistantError, Result};
pub use crate::links::{Link, Segment};
pub use crate::portfolio::Portfolio;
pub use crate::prompt::SystemContext;
pub use crate::provider::ModelProvider;
pub use crate::types::{Message, Role};
