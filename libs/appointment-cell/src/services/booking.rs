// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus};
use shared_store::ClinicStore;

use crate::models::{AppointmentSearchQuery, BookAppointmentRequest, BookingError};
use crate::services::lifecycle::AppointmentLifecycle;

/// Orchestrates the availability ledger and the appointment ledger. This is
/// the only component that flips a slot's booking state or moves an
/// appointment through its lifecycle.
pub struct BookingService {
    store: Arc<ClinicStore>,
    lifecycle: AppointmentLifecycle,
}

impl BookingService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self {
            store,
            lifecycle: AppointmentLifecycle::new(),
        }
    }

    /// Book the slot at (doctor, date, time) and record the appointment.
    ///
    /// Runs as one unit under the store's write lock: every check precedes
    /// the first mutation, so the slot flip and the appointment insert
    /// either both commit or neither does, and a concurrent call against
    /// the same slot observes `is_booked` already set.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, BookingError> {
        info!(
            "Booking appointment for patient {} with doctor {} at {} {}",
            request.patient_id, request.doctor_id, request.date, request.time
        );

        self.store
            .write(|data| {
                let doctor = data
                    .doctor_mut(request.doctor_id)
                    .ok_or(BookingError::DoctorNotFound)?;
                let slots = doctor
                    .availability_mut()
                    .ok_or(BookingError::DoctorNotFound)?;
                let slot = slots
                    .iter_mut()
                    .find(|s| s.date == request.date && s.time == request.time)
                    .ok_or(BookingError::SlotNotFound)?;

                if slot.is_booked {
                    warn!(
                        "Slot {} already booked for doctor {}",
                        slot.id, request.doctor_id
                    );
                    return Err(BookingError::SlotAlreadyBooked);
                }

                slot.is_booked = true;
                slot.patient_id = Some(request.patient_id);

                let appointment = Appointment {
                    id: Uuid::new_v4(),
                    patient_id: request.patient_id,
                    patient_name: request.patient_name.clone(),
                    doctor_id: request.doctor_id,
                    doctor_name: request.doctor_name.clone(),
                    date: request.date,
                    time: request.time,
                    status: AppointmentStatus::Booked,
                    comments: request.comments.clone(),
                };
                data.appointments.push(appointment.clone());
                Ok(appointment)
            })
            .await
    }

    /// Move an appointment to a new status.
    ///
    /// Cancelling releases the paired slot on a best-effort basis: if the
    /// slot was deleted in the meantime the appointment is still cancelled.
    /// Completing leaves the slot consumed as a historical record.
    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        debug!("Updating appointment {} to {}", appointment_id, new_status);

        self.store
            .write(|data| {
                let index = data
                    .appointments
                    .iter()
                    .position(|a| a.id == appointment_id)
                    .ok_or(BookingError::NotFound)?;
                let current = data.appointments[index].status;
                self.lifecycle
                    .validate_status_transition(&current, &new_status)?;

                data.appointments[index].status = new_status;
                let appointment = data.appointments[index].clone();

                if new_status == AppointmentStatus::Cancelled {
                    let released = data
                        .doctor_mut(appointment.doctor_id)
                        .and_then(|d| d.availability_mut())
                        .and_then(|slots| {
                            slots.iter_mut().find(|s| {
                                s.date == appointment.date
                                    && s.time == appointment.time
                                    && s.patient_id == Some(appointment.patient_id)
                            })
                        })
                        .map(|slot| {
                            slot.is_booked = false;
                            slot.patient_id = None;
                        })
                        .is_some();
                    if !released {
                        warn!(
                            "No matching slot to release for cancelled appointment {}",
                            appointment_id
                        );
                    }
                }

                Ok(appointment)
            })
            .await
    }

    pub async fn get_appointment(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.store
            .read(|data| {
                data.appointments
                    .iter()
                    .find(|a| a.id == appointment_id)
                    .cloned()
                    .ok_or(BookingError::NotFound)
            })
            .await
    }

    /// Filtered view of the appointment ledger. Records are never deleted,
    /// so this is the full history for the given party.
    pub async fn search(&self, query: AppointmentSearchQuery) -> Vec<Appointment> {
        self.store
            .read(|data| {
                data.appointments
                    .iter()
                    .filter(|a| query.patient_id.map_or(true, |id| a.patient_id == id))
                    .filter(|a| query.doctor_id.map_or(true, |id| a.doctor_id == id))
                    .filter(|a| query.status.map_or(true, |s| a.status == s))
                    .cloned()
                    .collect()
            })
            .await
    }

    pub async fn appointments_for_patient(&self, patient_id: Uuid) -> Vec<Appointment> {
        self.search(AppointmentSearchQuery {
            patient_id: Some(patient_id),
            ..Default::default()
        })
        .await
    }

    pub async fn appointments_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.search(AppointmentSearchQuery {
            doctor_id: Some(doctor_id),
            ..Default::default()
        })
        .await
    }
}
