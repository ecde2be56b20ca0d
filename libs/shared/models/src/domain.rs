use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::{uuid, Uuid};

/// Well-known identity of the scripted assistant participant.
pub const ASSISTANT_ID: Uuid = uuid!("5f1c9b52-0f0a-4c57-9f64-1d1f2f3a4b5c");
pub const ASSISTANT_NAME: &str = "Clinic Assistant";
pub const ASSISTANT_EMAIL: &str = "assistant@dentalconnect.local";

/// The clinic's designated primary doctor, highlighted first in assistant
/// replies. Seeded on first run.
pub const PRIMARY_DOCTOR_ID: Uuid = uuid!("2b7d8e10-6a3f-4d2c-8b91-0c5e6f7a8d9e");

pub const DOCTOR_SPECIALTIES: [&str; 6] = [
    "General Dentistry",
    "Orthodontics",
    "Periodontics",
    "Endodontics",
    "Oral Surgery",
    "Pediatric Dentistry",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "PATIENT"),
            Role::Doctor => write!(f, "DOCTOR"),
            Role::Assistant => write!(f, "ASSISTANT"),
        }
    }
}

/// Role-specific payload. Each variant carries exactly the fields that role
/// requires; the `role` tag doubles as the discriminant on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    Patient,
    Doctor {
        specialty: String,
        availability: Vec<TimeSlot>,
    },
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl User {
    pub fn role(&self) -> Role {
        match self.profile {
            Profile::Patient => Role::Patient,
            Profile::Doctor { .. } => Role::Doctor,
            Profile::Assistant => Role::Assistant,
        }
    }

    pub fn specialty(&self) -> Option<&str> {
        match &self.profile {
            Profile::Doctor { specialty, .. } => Some(specialty),
            _ => None,
        }
    }

    pub fn availability(&self) -> Option<&[TimeSlot]> {
        match &self.profile {
            Profile::Doctor { availability, .. } => Some(availability),
            _ => None,
        }
    }

    pub fn availability_mut(&mut self) -> Option<&mut Vec<TimeSlot>> {
        match &mut self.profile {
            Profile::Doctor { availability, .. } => Some(availability),
            _ => None,
        }
    }
}

/// A bookable one-hour slot owned by a doctor's availability ledger.
///
/// Invariants: `(doctor_id, date, time)` is unique within the owning
/// doctor's ledger, and `patient_id` is present iff `is_booked`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub is_booked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
}

impl TimeSlot {
    pub fn new(doctor_id: Uuid, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor_id,
            date,
            time,
            is_booked: false,
            patient_id: None,
        }
    }

    /// The moment this slot starts, interpreted as UTC.
    pub fn starts_at(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Booked => write!(f, "booked"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A booked visit. Patient and doctor names are copied in at creation time
/// so the record stays historically accurate if a user is later renamed.
/// Appointments are never deleted; cancellation is a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
}
