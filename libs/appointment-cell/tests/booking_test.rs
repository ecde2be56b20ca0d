use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use appointment_cell::models::{AppointmentSearchQuery, BookAppointmentRequest, BookingError};
use appointment_cell::services::BookingService;
use doctor_cell::services::AvailabilityService;
use shared_models::{AppointmentStatus, Profile, TimeSlot, User};
use shared_store::{AppState, StoreError};

struct Fixture {
    state: AppState,
    booking: BookingService,
    availability: AvailabilityService,
    doctor_id: Uuid,
    patient_id: Uuid,
}

async fn setup() -> Fixture {
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

    Fixture {
        booking: BookingService::new(state.store.clone()),
        availability: AvailabilityService::new(state.store.clone()),
        state,
        doctor_id,
        patient_id: Uuid::new_v4(),
    }
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

fn nine_am() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

impl Fixture {
    fn book_request(&self) -> BookAppointmentRequest {
        BookAppointmentRequest {
            patient_id: self.patient_id,
            patient_name: "Pat Doe".to_string(),
            doctor_id: self.doctor_id,
            doctor_name: "Dr. Test".to_string(),
            date: tomorrow(),
            time: nine_am(),
            comments: None,
        }
    }

    async fn slot(&self) -> TimeSlot {
        self.availability
            .list_slots(self.doctor_id)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.date == tomorrow() && s.time == nine_am())
            .expect("slot should exist")
    }
}

#[tokio::test]
async fn booking_consumes_slot_and_records_appointment() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();

    let appointment = fixture.booking.book(fixture.book_request()).await.unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Booked);
    assert_eq!(appointment.patient_name, "Pat Doe");
    assert_eq!(appointment.doctor_name, "Dr. Test");

    let slot = fixture.slot().await;
    assert!(slot.is_booked);
    assert_eq!(slot.patient_id, Some(fixture.patient_id));
}

#[tokio::test]
async fn second_booking_of_same_slot_is_rejected() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();

    fixture.booking.book(fixture.book_request()).await.unwrap();
    let second = fixture.booking.book(fixture.book_request()).await;

    assert_matches!(second, Err(BookingError::SlotAlreadyBooked));
    // The first booking is untouched and remains the only appointment.
    let appointments = fixture
        .booking
        .appointments_for_doctor(fixture.doctor_id)
        .await;
    assert_eq!(appointments.len(), 1);
}

#[tokio::test]
async fn booking_requires_doctor_and_slot() {
    let fixture = setup().await;

    let mut unknown_doctor = fixture.book_request();
    unknown_doctor.doctor_id = Uuid::new_v4();
    assert_matches!(
        fixture.booking.book(unknown_doctor).await,
        Err(BookingError::DoctorNotFound)
    );

    // Doctor exists but has no slot at the requested time.
    assert_matches!(
        fixture.booking.book(fixture.book_request()).await,
        Err(BookingError::SlotNotFound)
    );

    // Nothing was recorded by the failed attempts.
    let appointments = fixture
        .booking
        .appointments_for_doctor(fixture.doctor_id)
        .await;
    assert!(appointments.is_empty());
}

#[tokio::test]
async fn cancelling_releases_the_paired_slot() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();
    let appointment = fixture.booking.book(fixture.book_request()).await.unwrap();

    let cancelled = fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    let slot = fixture.slot().await;
    assert!(!slot.is_booked);
    assert_eq!(slot.patient_id, None);
}

#[tokio::test]
async fn completing_keeps_the_slot_consumed() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();
    let appointment = fixture.booking.book(fixture.book_request()).await.unwrap();

    let completed = fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Completed)
        .await
        .unwrap();

    assert_eq!(completed.status, AppointmentStatus::Completed);
    let slot = fixture.slot().await;
    assert!(slot.is_booked);
    assert_eq!(slot.patient_id, Some(fixture.patient_id));
}

#[tokio::test]
async fn slot_can_be_rebooked_after_cancellation() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();
    let first = fixture.booking.book(fixture.book_request()).await.unwrap();
    fixture
        .booking
        .update_status(first.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    let second = fixture.booking.book(fixture.book_request()).await.unwrap();

    assert_eq!(second.status, AppointmentStatus::Booked);
    // Both appointments persist as history.
    let appointments = fixture
        .booking
        .appointments_for_patient(fixture.patient_id)
        .await;
    assert_eq!(appointments.len(), 2);
}

#[tokio::test]
async fn cancellation_survives_a_deleted_slot() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();
    let appointment = fixture.booking.book(fixture.book_request()).await.unwrap();

    // Drop the slot out from under the appointment.
    let doctor_id = fixture.doctor_id;
    fixture
        .state
        .store
        .write(|data| {
            data.doctor_mut(doctor_id)
                .unwrap()
                .availability_mut()
                .unwrap()
                .clear();
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();

    let cancelled = fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn terminal_statuses_accept_no_transitions() {
    let fixture = setup().await;
    fixture
        .availability
        .add_slot(fixture.doctor_id, tomorrow(), nine_am())
        .await
        .unwrap();
    let appointment = fixture.booking.book(fixture.book_request()).await.unwrap();
    fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    let rebook = fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Booked)
        .await;
    assert_matches!(rebook, Err(BookingError::IllegalTransition { .. }));

    let complete = fixture
        .booking
        .update_status(appointment.id, AppointmentStatus::Completed)
        .await;
    assert_matches!(complete, Err(BookingError::IllegalTransition { .. }));
}

#[tokio::test]
async fn updating_a_missing_appointment_reports_not_found() {
    let fixture = setup().await;

    let missing = fixture
        .booking
        .update_status(Uuid::new_v4(), AppointmentStatus::Cancelled)
        .await;

    assert_matches!(missing, Err(BookingError::NotFound));
}

#[tokio::test]
async fn search_filters_by_party_and_status() {
    let fixture = setup().await;
    fixture
        .availability
        .bulk_add(
            fixture.doctor_id,
            tomorrow(),
            &[nine_am(), NaiveTime::from_hms_opt(10, 0, 0).unwrap()],
        )
        .await
        .unwrap();

    let first = fixture.booking.book(fixture.book_request()).await.unwrap();
    let mut other = fixture.book_request();
    other.patient_id = Uuid::new_v4();
    other.time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    fixture.booking.book(other).await.unwrap();
    fixture
        .booking
        .update_status(first.id, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    let for_patient = fixture
        .booking
        .appointments_for_patient(fixture.patient_id)
        .await;
    assert_eq!(for_patient.len(), 1);

    let cancelled = fixture
        .booking
        .search(AppointmentSearchQuery {
            doctor_id: Some(fixture.doctor_id),
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        })
        .await;
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, first.id);
}
