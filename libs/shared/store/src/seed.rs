use chrono::{Duration, NaiveTime, Utc};
use shared_models::{
    Profile, TimeSlot, User, ASSISTANT_EMAIL, ASSISTANT_ID, ASSISTANT_NAME, DOCTOR_SPECIALTIES,
    PRIMARY_DOCTOR_ID,
};
use tracing::info;
use uuid::Uuid;

use crate::backend::StoreError;
use crate::store::ClinicStore;

const DEMO_PASSWORD: &str = "password";

/// Seed the assistant identity and a few demo doctors so a fresh store is
/// immediately usable. Idempotent: only missing records are inserted.
pub async fn ensure_seed_data(store: &ClinicStore) -> Result<(), StoreError> {
    store
        .write(|data| {
            let mut inserted = 0;

            if data.user(ASSISTANT_ID).is_none() {
                data.users.push(User {
                    id: ASSISTANT_ID,
                    email: ASSISTANT_EMAIL.to_string(),
                    name: ASSISTANT_NAME.to_string(),
                    profile: Profile::Assistant,
                });
                inserted += 1;
            }

            if data.user(PRIMARY_DOCTOR_ID).is_none() {
                let today = Utc::now().date_naive();
                let availability = [(1, 9), (1, 10), (1, 11), (2, 14), (2, 15)]
                    .iter()
                    .map(|&(days, hour)| {
                        TimeSlot::new(
                            PRIMARY_DOCTOR_ID,
                            today + Duration::days(days),
                            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                        )
                    })
                    .collect();
                data.users.push(User {
                    id: PRIMARY_DOCTOR_ID,
                    email: "asha.prabhu@dentalconnect.local".to_string(),
                    name: "Dr. Asha Prabhu".to_string(),
                    profile: Profile::Doctor {
                        specialty: DOCTOR_SPECIALTIES[0].to_string(),
                        availability,
                    },
                });
                data.credentials
                    .insert(PRIMARY_DOCTOR_ID, DEMO_PASSWORD.to_string());
                inserted += 1;
            }

            let extra_doctors = [
                ("ben.ortiz@dentalconnect.local", "Dr. Ben Ortiz", 1),
                ("carla.nguyen@dentalconnect.local", "Dr. Carla Nguyen", 2),
            ];
            for (email, name, specialty_index) in extra_doctors {
                if data.user_by_email(email).is_none() {
                    let id = Uuid::new_v4();
                    data.users.push(User {
                        id,
                        email: email.to_string(),
                        name: name.to_string(),
                        profile: Profile::Doctor {
                            specialty: DOCTOR_SPECIALTIES[specialty_index].to_string(),
                            availability: Vec::new(),
                        },
                    });
                    data.credentials.insert(id, DEMO_PASSWORD.to_string());
                    inserted += 1;
                }
            }

            if inserted > 0 {
                info!("Seeded {} demo records", inserted);
            }
            Ok::<_, StoreError>(())
        })
        .await
}
