use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::AppError;
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAddSlotsRequest {
    pub date: NaiveDate,
    pub times: Vec<NaiveTime>,
}

/// Partial success is the normal outcome of a bulk add; `added` reports how
/// many of the requested times actually became slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAddSlotsResponse {
    pub added: usize,
}

#[derive(Debug, Clone, Error)]
pub enum AvailabilityError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("A slot already exists at this date and time")]
    DuplicateSlot,

    #[error("Slot date and time are in the past")]
    PastSlot,

    #[error("Slot not found")]
    SlotNotFound,

    #[error("Slot has an active booking; cancel the appointment first")]
    SlotInUse,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AvailabilityError {
    fn from(err: StoreError) -> Self {
        AvailabilityError::Storage(err.to_string())
    }
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::DoctorNotFound | AvailabilityError::SlotNotFound => {
                AppError::NotFound(err.to_string())
            }
            AvailabilityError::DuplicateSlot | AvailabilityError::PastSlot => {
                AppError::ValidationError(err.to_string())
            }
            AvailabilityError::SlotInUse => AppError::Conflict(err.to_string()),
            AvailabilityError::Storage(msg) => AppError::Storage(msg),
        }
    }
}
