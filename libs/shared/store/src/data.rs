use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_models::{Appointment, ChatMessage, Role, User};
use uuid::Uuid;

/// The persisted state: the four top-level records (users with their
/// embedded availability ledgers, appointments, conversations, and the
/// current-session pointer) plus the demo credential map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicData {
    pub users: Vec<User>,
    #[serde(default)]
    pub credentials: HashMap<Uuid, String>,
    pub appointments: Vec<Appointment>,
    pub chats: HashMap<String, Vec<ChatMessage>>,
    pub session: Option<Uuid>,
}

impl ClinicData {
    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn doctor(&self, id: Uuid) -> Option<&User> {
        self.user(id).filter(|u| u.role() == Role::Doctor)
    }

    pub fn doctor_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.user_mut(id).filter(|u| u.role() == Role::Doctor)
    }

    pub fn doctors(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.role() == Role::Doctor)
    }
}
