// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, AppointmentStatus};
use shared_store::StoreError;

/// Patient and doctor names ride along so the appointment can snapshot
/// them; the slot is addressed by its (doctor, date, time) coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("No slot exists at the requested date and time")]
    SlotNotFound,

    #[error("Slot is already booked")]
    SlotAlreadyBooked,

    #[error("Appointment cannot move from {from} to {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        BookingError::Storage(err.to_string())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound
            | BookingError::DoctorNotFound
            | BookingError::SlotNotFound => AppError::NotFound(err.to_string()),
            BookingError::SlotAlreadyBooked => AppError::Conflict(err.to_string()),
            BookingError::IllegalTransition { .. } => AppError::ValidationError(err.to_string()),
            BookingError::Storage(msg) => AppError::Storage(msg),
        }
    }
}
