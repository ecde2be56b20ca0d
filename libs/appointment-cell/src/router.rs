use axum::{
    routing::{get, patch, post},
    Router,
};

use shared_store::AppState;

use crate::handlers::*;

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(book_appointment))
        .route("/", get(search_appointments))
        .route("/{id}", get(get_appointment))
        .route("/{id}/status", patch(update_status))
        .with_state(state)
}
