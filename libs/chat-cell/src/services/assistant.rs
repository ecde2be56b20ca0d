use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Utc};
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{error, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{TimeSlot, User, ASSISTANT_NAME, PRIMARY_DOCTOR_ID};
use shared_store::{ClinicData, ClinicStore};

/// Fixed reply used whenever the text-generation collaborator is missing
/// its credential or cannot be reached. A raw failure never reaches the
/// patient-visible chat.
pub const ASSISTANT_FALLBACK_REPLY: &str = "I'm sorry, I can't look that up right now. \
Please try again later, or use the booking page to see current availability.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const PRIMARY_DOCTOR_SLOT_LIMIT: usize = 5;
const OTHER_DOCTOR_SLOT_LIMIT: usize = 2;

/// Thin prompt-construction layer over a chat-completions endpoint. Reads
/// the availability ledger, never writes it.
pub struct AssistantService {
    store: Arc<ClinicStore>,
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AssistantService {
    pub fn new(config: &AppConfig, store: Arc<ClinicStore>) -> Self {
        Self {
            store,
            http_client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.assistant_model.clone(),
        }
    }

    /// Produce a reply to a patient message. Never fails: a missing
    /// credential or a collaborator error degrades to the fixed fallback.
    pub async fn reply(&self, patient_id: Uuid, message: &str) -> String {
        if self.api_key.is_empty() {
            warn!("Assistant credential missing, returning fallback reply");
            return ASSISTANT_FALLBACK_REPLY.to_string();
        }

        let context = self.store.read(availability_context).await;
        match self.generate(patient_id, message, &context).await {
            Ok(text) => text,
            Err(err) => {
                error!("Assistant generation failed: {}", err);
                ASSISTANT_FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, patient_id: Uuid, message: &str, context: &str) -> Result<String> {
        let contents = format!("{}\nPatient question: \"{}\"", context, message);
        let prompt = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_instruction(patient_id) },
                { "role": "user", "content": contents }
            ],
            "temperature": 0.5
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&prompt)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Chat completion error: {}", error_text));
        }

        let body: Value = response.json().await?;
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid chat completion response format"))?
            .to_string();

        Ok(text)
    }
}

/// Render the facts the assistant is allowed to speak about: the primary
/// doctor's upcoming unbooked slots first, then a couple per other doctor.
pub fn availability_context(data: &ClinicData) -> String {
    let now = Utc::now().naive_utc();
    let mut context =
        String::from("Current available doctors and their upcoming unbooked slots:\n");

    let primary = data.doctor(PRIMARY_DOCTOR_ID);
    match primary {
        Some(doctor) => {
            let slots = future_unbooked_slots(doctor, now, PRIMARY_DOCTOR_SLOT_LIMIT);
            if slots.is_empty() {
                context.push_str(&format!(
                    "{} ({}) has no upcoming unbooked slots at the moment.\n",
                    doctor.name,
                    doctor.specialty().unwrap_or_default()
                ));
            } else {
                push_doctor_slots(&mut context, doctor, &slots);
            }
        }
        None => context.push_str("The primary doctor's information is currently unavailable.\n"),
    }

    let mut others_listed = false;
    for doctor in data.doctors() {
        if doctor.id == PRIMARY_DOCTOR_ID {
            continue;
        }
        let slots = future_unbooked_slots(doctor, now, OTHER_DOCTOR_SLOT_LIMIT);
        if slots.is_empty() {
            continue;
        }
        if !others_listed {
            context.push_str("\nOther available doctors:\n");
            others_listed = true;
        }
        push_doctor_slots(&mut context, doctor, &slots);
    }

    if primary.is_none() && !others_listed {
        return "No upcoming unbooked slots found for any doctors. \
Please check back later or ask for general information.\n"
            .to_string();
    }

    context
}

fn future_unbooked_slots(doctor: &User, now: NaiveDateTime, limit: usize) -> Vec<TimeSlot> {
    let mut slots: Vec<TimeSlot> = doctor
        .availability()
        .unwrap_or(&[])
        .iter()
        .filter(|s| !s.is_booked && s.starts_at() > now)
        .cloned()
        .collect();
    slots.sort_by_key(|s| s.starts_at());
    slots.truncate(limit);
    slots
}

fn push_doctor_slots(context: &mut String, doctor: &User, slots: &[TimeSlot]) {
    context.push_str(&format!(
        "{} ({}):\n",
        doctor.name,
        doctor.specialty().unwrap_or_default()
    ));
    for slot in slots {
        context.push_str(&format!(
            "- {} at {}\n",
            slot.date,
            slot.time.format("%H:%M")
        ));
    }
}

fn system_instruction(patient_id: Uuid) -> String {
    format!(
        "You are {}, a friendly assistant for the Dental Connect clinic. \
The clinic's primary and recommended dentist is listed first in the availability context. \
You are currently helping the patient with id {}. \
Answer only from the list of available slots provided; never invent doctors, services, or slots. \
When suggesting slots, mention the primary dentist's availability first whenever it exists. \
If a doctor the patient asks about has no listed slots, say so and offer the primary dentist's \
slots instead. \
You cannot book appointments yourself: when asked to book, direct the patient to the \
Book New Appointment page. \
If no slots are listed at all, say none are currently available and suggest checking back later. \
If asked about topics unrelated to this clinic, politely say you can only help with clinic queries. \
Keep replies concise and polite.",
        ASSISTANT_NAME, patient_id
    )
}
