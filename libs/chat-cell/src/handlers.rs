use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared_models::{AppError, ChatMessage, ASSISTANT_ID};
use shared_store::AppState;

use crate::models::{AssistantExchange, SendMessageRequest};
use crate::services::{AssistantService, ConversationService};

/// Chat operations act on behalf of the signed-in user.
async fn current_user_id(state: &AppState) -> Result<Uuid, AppError> {
    state
        .store
        .read(|data| data.session)
        .await
        .ok_or_else(|| AppError::Auth("Not logged in".to_string()))
}

#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let user_id = current_user_id(&state).await?;
    let service = ConversationService::new(state.store.clone());
    Ok(Json(service.history(user_id, peer_id).await))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    Path(peer_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let user_id = current_user_id(&state).await?;
    let service = ConversationService::new(state.store.clone());
    let message = service
        .send_message(user_id, peer_id, request.text, request.appointment_id)
        .await?;
    Ok(Json(message))
}

/// Round-trip with the assistant: append the patient message, obtain a
/// reply, and append it as the assistant participant.
#[axum::debug_handler]
pub async fn message_assistant(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<AssistantExchange>, AppError> {
    let user_id = current_user_id(&state).await?;
    let conversations = ConversationService::new(state.store.clone());
    let assistant = AssistantService::new(&state.config, state.store.clone());

    let request_message = conversations
        .send_message(
            user_id,
            ASSISTANT_ID,
            request.text.clone(),
            request.appointment_id,
        )
        .await?;
    let reply_text = assistant.reply(user_id, &request.text).await;
    let reply = conversations
        .send_message(ASSISTANT_ID, user_id, reply_text, None)
        .await?;

    Ok(Json(AssistantExchange {
        request: request_message,
        reply,
    }))
}
