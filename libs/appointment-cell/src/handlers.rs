use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::{AppError, Appointment};
use shared_store::AppState;

use crate::models::{AppointmentSearchQuery, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::BookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(state.store.clone());
    let appointment = service.book(request).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(state.store.clone());
    let appointment = service.update_status(appointment_id, request.status).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let service = BookingService::new(state.store.clone());
    let appointment = service.get_appointment(appointment_id).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(state.store.clone());
    let appointments = service.search(query).await;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}
