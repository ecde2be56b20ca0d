use axum::{
    routing::{get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers::*;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/users/{id}", get(get_user))
        .with_state(state)
}
