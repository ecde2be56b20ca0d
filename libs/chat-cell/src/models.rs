use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, ChatMessage};
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    pub appointment_id: Option<Uuid>,
}

/// A patient message to the assistant and the reply it produced, both
/// already appended to the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantExchange {
    pub request: ChatMessage,
    pub reply: ChatMessage,
}

#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Chat contact not found")]
    ContactNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ChatError {
    fn from(err: StoreError) -> Self {
        ChatError::Storage(err.to_string())
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::ContactNotFound => AppError::NotFound(err.to_string()),
            ChatError::Storage(msg) => AppError::Storage(msg),
        }
    }
}
