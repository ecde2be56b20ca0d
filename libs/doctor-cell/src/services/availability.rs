use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_models::TimeSlot;
use shared_store::ClinicStore;

use crate::models::AvailabilityError;

/// Operations on one doctor's slot collection. Booking state (`is_booked`,
/// `patient_id`) is owned by the booking service; this service only ever
/// creates and deletes unbooked slots.
pub struct AvailabilityService {
    store: Arc<ClinicStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Append a new unbooked slot. Rejects past date/times and duplicates
    /// of an existing (date, time) pair for this doctor.
    pub async fn add_slot(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<TimeSlot, AvailabilityError> {
        debug!("Adding slot for doctor {} at {} {}", doctor_id, date, time);

        let now = Utc::now().naive_utc();
        self.store
            .write(|data| {
                let doctor = data
                    .doctor_mut(doctor_id)
                    .ok_or(AvailabilityError::DoctorNotFound)?;
                let slots = doctor
                    .availability_mut()
                    .ok_or(AvailabilityError::DoctorNotFound)?;

                if date.and_time(time) <= now {
                    return Err(AvailabilityError::PastSlot);
                }
                if slots.iter().any(|s| s.date == date && s.time == time) {
                    return Err(AvailabilityError::DuplicateSlot);
                }

                let slot = TimeSlot::new(doctor_id, date, time);
                slots.push(slot.clone());
                Ok(slot)
            })
            .await
    }

    /// Add one slot per requested time, silently skipping times that are in
    /// the past or already present. Returns the count actually added.
    pub async fn bulk_add(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        times: &[NaiveTime],
    ) -> Result<usize, AvailabilityError> {
        debug!(
            "Bulk-adding {} slots for doctor {} on {}",
            times.len(),
            doctor_id,
            date
        );

        let now = Utc::now().naive_utc();
        self.store
            .write(|data| {
                let doctor = data
                    .doctor_mut(doctor_id)
                    .ok_or(AvailabilityError::DoctorNotFound)?;
                let slots = doctor
                    .availability_mut()
                    .ok_or(AvailabilityError::DoctorNotFound)?;

                let mut added = 0;
                for &time in times {
                    if date.and_time(time) <= now {
                        continue;
                    }
                    if slots.iter().any(|s| s.date == date && s.time == time) {
                        continue;
                    }
                    slots.push(TimeSlot::new(doctor_id, date, time));
                    added += 1;
                }
                Ok(added)
            })
            .await
    }

    /// Delete an unbooked slot. A booked slot stays until its appointment
    /// is cancelled.
    pub async fn remove_slot(
        &self,
        doctor_id: Uuid,
        slot_id: Uuid,
    ) -> Result<(), AvailabilityError> {
        debug!("Removing slot {} for doctor {}", slot_id, doctor_id);

        self.store
            .write(|data| {
                let doctor = data
                    .doctor_mut(doctor_id)
                    .ok_or(AvailabilityError::DoctorNotFound)?;
                let slots = doctor
                    .availability_mut()
                    .ok_or(AvailabilityError::DoctorNotFound)?;

                let position = slots
                    .iter()
                    .position(|s| s.id == slot_id)
                    .ok_or(AvailabilityError::SlotNotFound)?;
                if slots[position].is_booked {
                    warn!("Refusing to remove booked slot {}", slot_id);
                    return Err(AvailabilityError::SlotInUse);
                }
                slots.remove(position);
                Ok(())
            })
            .await
    }

    /// The doctor's full ledger, unfiltered; callers narrow to future or
    /// unbooked slots as needed.
    pub async fn list_slots(&self, doctor_id: Uuid) -> Result<Vec<TimeSlot>, AvailabilityError> {
        self.store
            .read(|data| {
                data.doctor(doctor_id)
                    .and_then(|d| d.availability())
                    .map(|slots| slots.to_vec())
                    .ok_or(AvailabilityError::DoctorNotFound)
            })
            .await
    }
}
