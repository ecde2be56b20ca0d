use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use auth_cell::services::IdentityService;
use shared_models::{AppError, TimeSlot};
use shared_store::AppState;

use crate::models::{AddSlotRequest, BulkAddSlotsRequest, BulkAddSlotsResponse};
use crate::services::AvailabilityService;

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = IdentityService::new(state.store.clone());
    let doctors = service.list_doctors().await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let service = AvailabilityService::new(state.store.clone());
    let slots = service.list_slots(doctor_id).await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn add_availability(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<AddSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let service = AvailabilityService::new(state.store.clone());
    let slot = service
        .add_slot(doctor_id, request.date, request.time)
        .await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn bulk_add_availability(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<BulkAddSlotsRequest>,
) -> Result<Json<BulkAddSlotsResponse>, AppError> {
    let service = AvailabilityService::new(state.store.clone());
    let added = service
        .bulk_add(doctor_id, request.date, &request.times)
        .await?;
    Ok(Json(BulkAddSlotsResponse { added }))
}

#[axum::debug_handler]
pub async fn remove_availability(
    State(state): State<AppState>,
    Path((doctor_id, slot_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(state.store.clone());
    service.remove_slot(doctor_id, slot_id).await?;
    Ok(Json(json!({ "removed": slot_id })))
}
