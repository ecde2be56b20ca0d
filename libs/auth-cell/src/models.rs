use serde::{Deserialize, Serialize};
use shared_models::AppError;
use shared_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: SignupRole,
    pub specialty: Option<String>,
}

/// The assistant identity is provisioned by the system, so signup only
/// offers the two human roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupRole {
    Patient,
    Doctor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("A user with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for IdentityError {
    fn from(err: StoreError) -> Self {
        IdentityError::Storage(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailTaken => AppError::ValidationError(err.to_string()),
            IdentityError::InvalidCredentials => AppError::Auth(err.to_string()),
            IdentityError::UserNotFound => AppError::NotFound(err.to_string()),
            IdentityError::Storage(msg) => AppError::Storage(msg),
        }
    }
}
