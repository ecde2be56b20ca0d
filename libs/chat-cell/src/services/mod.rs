pub mod assistant;
pub mod conversation;

pub use assistant::{AssistantService, ASSISTANT_FALLBACK_REPLY};
pub use conversation::{channel_key, ConversationService};
