use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::{AppError, User};
use shared_store::AppState;

use crate::models::{LoginRequest, SignupRequest};
use crate::services::IdentityService;

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<User>, AppError> {
    let service = IdentityService::new(state.store.clone());
    let user = service.signup(request).await?;
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let service = IdentityService::new(state.store.clone());
    let user = service.login(request).await?;
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(state.store.clone());
    service.logout().await?;
    Ok(Json(json!({ "logged_out": true })))
}

/// The current session, or JSON null when logged out.
#[axum::debug_handler]
pub async fn me(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(state.store.clone());
    match service.current_user().await {
        Some(user) => Ok(Json(json!(user))),
        None => Ok(Json(Value::Null)),
    }
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let service = IdentityService::new(state.store.clone());
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}
