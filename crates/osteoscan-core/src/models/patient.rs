use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient record created by clinical staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub full_name: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub medical_record_number: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_history: Option<String>,
    pub referring_physician: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// The editable fields of a patient, as submitted by the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientInput {
    pub full_name: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    #[serde(default)]
    pub medical_record_number: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub referring_physician: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl PatientInput {
    /// Check the field-level rules. Uniqueness of the medical record number
    /// needs the store and is checked there.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.full_name.trim().is_empty() {
            return Err(CoreError::invalid("full_name", "must not be blank"));
        }
        check_positive("height_cm", self.height_cm)?;
        check_positive("weight_kg", self.weight_kg)?;
        if let Some(email) = &self.contact_email
            && !is_plausible_email(email)
        {
            return Err(CoreError::invalid(
                "contact_email",
                format!("'{email}' is not an email address"),
            ));
        }
        if let Some(mrn) = &self.medical_record_number
            && mrn.trim().is_empty()
        {
            return Err(CoreError::invalid(
                "medical_record_number",
                "must be omitted rather than blank",
            ));
        }
        Ok(())
    }
}

impl Patient {
    /// Build a new patient from validated input.
    pub fn create(input: PatientInput, now: jiff::Timestamp) -> Result<Self, CoreError> {
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            full_name: input.full_name.trim().to_string(),
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            medical_record_number: input.medical_record_number,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            medical_history: input.medical_history,
            referring_physician: input.referring_physician,
            contact_email: input.contact_email,
            contact_phone: input.contact_phone,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an explicit edit. `id` and `created_at` never change.
    pub fn apply_edit(
        &mut self,
        input: PatientInput,
        now: jiff::Timestamp,
    ) -> Result<(), CoreError> {
        input.validate()?;
        self.full_name = input.full_name.trim().to_string();
        self.date_of_birth = input.date_of_birth;
        self.gender = input.gender;
        self.medical_record_number = input.medical_record_number;
        self.height_cm = input.height_cm;
        self.weight_kg = input.weight_kg;
        self.medical_history = input.medical_history;
        self.referring_physician = input.referring_physician;
        self.contact_email = input.contact_email;
        self.contact_phone = input.contact_phone;
        self.updated_at = now;
        Ok(())
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, today: Date) -> i16 {
        let dob = self.date_of_birth;
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        years.max(0)
    }

    /// Case-insensitive substring match on name or medical record number.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.full_name.to_lowercase().contains(&term)
            || self
                .medical_record_number
                .as_ref()
                .is_some_and(|mrn| mrn.to_lowercase().contains(&term))
    }

    /// True if this patient carries `mrn`, ignoring case and padding.
    pub fn shares_mrn_with(&self, mrn: &str) -> bool {
        self.medical_record_number
            .as_ref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(mrn.trim()))
    }
}

fn check_positive(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(CoreError::invalid(field, format!("{v} is not a positive number")))
        }
        _ => Ok(()),
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}
