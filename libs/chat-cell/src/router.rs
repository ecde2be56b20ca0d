use axum::{
    routing::{get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers::*;

pub fn chat_routes(state: AppState) -> Router {
    Router::new()
        .route("/assistant", post(message_assistant))
        .route("/{peer_id}", get(get_history))
        .route("/{peer_id}", post(send_message))
        .with_state(state)
}
