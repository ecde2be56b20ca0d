use axum::{
    routing::{delete, get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers::*;

pub fn doctor_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_doctors))
        .route("/{id}/availability", get(list_availability))
        .route("/{id}/availability", post(add_availability))
        .route("/{id}/availability/bulk", post(bulk_add_availability))
        .route("/{id}/availability/{slot_id}", delete(remove_availability))
        .with_state(state)
}
