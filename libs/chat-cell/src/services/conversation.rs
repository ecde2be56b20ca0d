use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::ChatMessage;
use shared_store::ClinicStore;

use crate::models::ChatError;

const CHANNEL_SEPARATOR: &str = ":";

/// Deterministic two-party channel key: the two ids sorted and joined, so
/// either calling order resolves to the same channel.
pub fn channel_key(a: Uuid, b: Uuid) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{}{}{}", first, CHANNEL_SEPARATOR, second)
}

pub struct ConversationService {
    store: Arc<ClinicStore>,
}

impl ConversationService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Append a message to the pair's channel. Messages are never edited
    /// or deleted; append order is authoritative.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        text: String,
        appointment_id: Option<Uuid>,
    ) -> Result<ChatMessage, ChatError> {
        debug!("Message from {} to {}", sender_id, receiver_id);

        self.store
            .write(|data| {
                if data.user(receiver_id).is_none() {
                    return Err(ChatError::ContactNotFound);
                }

                let key = channel_key(sender_id, receiver_id);
                let message = ChatMessage {
                    id: Uuid::new_v4(),
                    chat_id: key.clone(),
                    sender_id,
                    receiver_id,
                    text,
                    timestamp: Utc::now(),
                    appointment_id,
                };
                data.chats.entry(key).or_default().push(message.clone());
                Ok(message)
            })
            .await
    }

    /// The pair's channel history, oldest first.
    pub async fn history(&self, a: Uuid, b: Uuid) -> Vec<ChatMessage> {
        let key = channel_key(a, b);
        self.store
            .read(|data| data.chats.get(&key).cloned().unwrap_or_default())
            .await
    }
}
