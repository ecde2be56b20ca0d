use tracing::{debug, warn};

use shared_models::AppointmentStatus;

use crate::models::BookingError;

/// Appointment state machine. Booked is the only active state; cancelled
/// and completed are terminal.
pub struct AppointmentLifecycle;

impl AppointmentLifecycle {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_status_transition(
        &self,
        current: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) -> Result<(), BookingError> {
        debug!(
            "Validating status transition from {} to {}",
            current, new_status
        );

        if !self.valid_transitions(current).contains(new_status) {
            warn!(
                "Invalid status transition attempted: {} -> {}",
                current, new_status
            );
            return Err(BookingError::IllegalTransition {
                from: *current,
                to: *new_status,
            });
        }

        Ok(())
    }

    /// All valid next statuses for a given current status.
    pub fn valid_transitions(&self, current: &AppointmentStatus) -> &'static [AppointmentStatus] {
        match current {
            AppointmentStatus::Booked => {
                &[AppointmentStatus::Cancelled, AppointmentStatus::Completed]
            }
            // Terminal states - no transitions allowed
            AppointmentStatus::Cancelled => &[],
            AppointmentStatus::Completed => &[],
        }
    }
}

impl Default for AppointmentLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
