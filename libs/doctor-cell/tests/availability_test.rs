use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use doctor_cell::models::AvailabilityError;
use doctor_cell::services::AvailabilityService;
use shared_models::{Profile, User};
use shared_store::{AppState, StoreError};

async fn setup() -> (AppState, AvailabilityService, Uuid) {
    let state = AppState::in_memory().await;
    let doctor_id = Uuid::new_v4();
    state
        .store
        .write(|data| {
            data.users.push(User {
                id: doctor_id,
                email: "doc@example.com".to_string(),
                name: "Dr. Test".to_string(),
                profile: Profile::Doctor {
                    specialty: "General Dentistry".to_string(),
                    availability: Vec::new(),
                },
            });
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();
    let service = AvailabilityService::new(state.store.clone());
    (state, service, doctor_id)
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

fn yesterday() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

#[tokio::test]
async fn add_slot_appends_unbooked_slot() {
    let (_state, service, doctor_id) = setup().await;

    let slot = service.add_slot(doctor_id, tomorrow(), hour(9)).await.unwrap();

    assert!(!slot.is_booked);
    assert_eq!(slot.patient_id, None);
    assert_eq!(slot.doctor_id, doctor_id);

    let slots = service.list_slots(doctor_id).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, slot.id);
}

#[tokio::test]
async fn add_slot_rejects_duplicate_date_time() {
    let (_state, service, doctor_id) = setup().await;
    service.add_slot(doctor_id, tomorrow(), hour(9)).await.unwrap();

    let duplicate = service.add_slot(doctor_id, tomorrow(), hour(9)).await;

    assert_matches!(duplicate, Err(AvailabilityError::DuplicateSlot));
    let slots = service.list_slots(doctor_id).await.unwrap();
    assert_eq!(slots.len(), 1);
}

#[tokio::test]
async fn repeated_adds_never_produce_duplicates() {
    let (_state, service, doctor_id) = setup().await;

    for _ in 0..3 {
        let _ = service.add_slot(doctor_id, tomorrow(), hour(9)).await;
    }

    let slots = service.list_slots(doctor_id).await.unwrap();
    let matching = slots
        .iter()
        .filter(|s| s.date == tomorrow() && s.time == hour(9))
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn add_slot_rejects_past_date_time() {
    let (_state, service, doctor_id) = setup().await;

    let past = service.add_slot(doctor_id, yesterday(), hour(9)).await;

    assert_matches!(past, Err(AvailabilityError::PastSlot));
    let slots = service.list_slots(doctor_id).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn add_slot_requires_existing_doctor() {
    let (_state, service, _doctor_id) = setup().await;

    let missing = service.add_slot(Uuid::new_v4(), tomorrow(), hour(9)).await;

    assert_matches!(missing, Err(AvailabilityError::DoctorNotFound));
}

#[tokio::test]
async fn bulk_add_skips_existing_times_and_reports_count() {
    let (_state, service, doctor_id) = setup().await;
    service.add_slot(doctor_id, tomorrow(), hour(9)).await.unwrap();

    let added = service
        .bulk_add(doctor_id, tomorrow(), &[hour(9), hour(10)])
        .await
        .unwrap();

    assert_eq!(added, 1);
    let slots = service.list_slots(doctor_id).await.unwrap();
    assert_eq!(slots.len(), 2);
}

#[tokio::test]
async fn bulk_add_skips_past_times() {
    let (_state, service, doctor_id) = setup().await;

    let added = service
        .bulk_add(doctor_id, yesterday(), &[hour(9), hour(10)])
        .await
        .unwrap();

    assert_eq!(added, 0);
    let slots = service.list_slots(doctor_id).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn remove_unbooked_slot_deletes_it() {
    let (_state, service, doctor_id) = setup().await;
    let slot = service.add_slot(doctor_id, tomorrow(), hour(9)).await.unwrap();

    service.remove_slot(doctor_id, slot.id).await.unwrap();

    let slots = service.list_slots(doctor_id).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn remove_booked_slot_fails_and_leaves_slot_intact() {
    let (state, service, doctor_id) = setup().await;
    let slot = service.add_slot(doctor_id, tomorrow(), hour(9)).await.unwrap();
    let patient_id = Uuid::new_v4();

    // Book the slot the way the booking service would.
    state
        .store
        .write(|data| {
            let slots = data.doctor_mut(doctor_id).unwrap().availability_mut().unwrap();
            let target = slots.iter_mut().find(|s| s.id == slot.id).unwrap();
            target.is_booked = true;
            target.patient_id = Some(patient_id);
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();

    let removed = service.remove_slot(doctor_id, slot.id).await;

    assert_matches!(removed, Err(AvailabilityError::SlotInUse));
    let slots = service.list_slots(doctor_id).await.unwrap();
    assert_eq!(slots.len(), 1);
    assert!(slots[0].is_booked);
    assert_eq!(slots[0].patient_id, Some(patient_id));
}

#[tokio::test]
async fn remove_unknown_slot_reports_not_found() {
    let (_state, service, doctor_id) = setup().await;

    let missing = service.remove_slot(doctor_id, Uuid::new_v4()).await;

    assert_matches!(missing, Err(AvailabilityError::SlotNotFound));
}
