use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Profile, User, DOCTOR_SPECIALTIES};
use shared_store::ClinicStore;

use crate::models::{IdentityError, LoginRequest, SignupRequest, SignupRole};

pub struct IdentityService {
    store: Arc<ClinicStore>,
}

impl IdentityService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Create an account and sign the new user in. Role is fixed at
    /// creation; doctors start with an empty availability ledger.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, IdentityError> {
        info!("Signing up {} as {:?}", request.email, request.role);

        self.store
            .write(|data| {
                if data.user_by_email(&request.email).is_some() {
                    return Err(IdentityError::EmailTaken);
                }

                let profile = match request.role {
                    SignupRole::Patient => Profile::Patient,
                    SignupRole::Doctor => Profile::Doctor {
                        specialty: request
                            .specialty
                            .clone()
                            .unwrap_or_else(|| DOCTOR_SPECIALTIES[0].to_string()),
                        availability: Vec::new(),
                    },
                };
                let user = User {
                    id: Uuid::new_v4(),
                    email: request.email.clone(),
                    name: request.name.clone(),
                    profile,
                };

                data.credentials.insert(user.id, request.password.clone());
                data.session = Some(user.id);
                data.users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Demo-grade login: plain equality against the stored credential.
    pub async fn login(&self, request: LoginRequest) -> Result<User, IdentityError> {
        debug!("Login attempt for {}", request.email);

        self.store
            .write(|data| {
                let user = data
                    .user_by_email(&request.email)
                    .cloned()
                    .ok_or(IdentityError::InvalidCredentials)?;
                match data.credentials.get(&user.id) {
                    Some(stored) if *stored == request.password => {}
                    _ => return Err(IdentityError::InvalidCredentials),
                }
                data.session = Some(user.id);
                Ok(user)
            })
            .await
    }

    pub async fn logout(&self) -> Result<(), IdentityError> {
        self.store
            .write(|data| {
                data.session = None;
                Ok::<_, IdentityError>(())
            })
            .await
    }

    /// The session pointer resolved to a user, or `None` when logged out.
    pub async fn current_user(&self) -> Option<User> {
        self.store
            .read(|data| data.session.and_then(|id| data.user(id)).cloned())
            .await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, IdentityError> {
        self.store
            .read(|data| data.user(id).cloned().ok_or(IdentityError::UserNotFound))
            .await
    }

    pub async fn list_doctors(&self) -> Vec<User> {
        self.store
            .read(|data| data.doctors().cloned().collect())
            .await
    }
}
