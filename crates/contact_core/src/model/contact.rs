//! Contact domain model and field validation.
//!
//! # Responsibility
//! - Define the canonical contact record stored in the `contacts` table.
//! - Define creation and partial-update payloads.
//! - Enforce every field constraint before data reaches SQL.
//!
//! # Invariants
//! - `id` is store-assigned and immutable after creation.
//! - Name fields hold 3..=32 characters, `email` 8..=64 with valid syntax,
//!   `phone_number` 1..=24 ASCII digits.
//! - `crm_status` defaults to `operational` when the creation payload
//!   leaves it unset.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = i64;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 32;
const EMAIL_MIN_CHARS: usize = 8;
const EMAIL_MAX_CHARS: usize = 64;
const PHONE_MAX_CHARS: usize = 24;

// Conservative pattern: printable local part, dotted domain, alphabetic TLD.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is a fixed literal and must compile")
});

/// CRM pipeline classification for a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmStatus {
    /// Day-to-day operational contact. Default for new records.
    #[default]
    Operational,
    /// Tracked for analytics/reporting purposes.
    Analytic,
    /// Corporate/organizational contact.
    Corporate,
}

impl CrmStatus {
    /// Canonical storage spelling, shared by SQL writes and row decoding.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Analytic => "analytic",
            Self::Corporate => "corporate",
        }
    }

    /// Parses the storage spelling back into the enum.
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "operational" => Some(Self::Operational),
            "analytic" => Some(Self::Analytic),
            "corporate" => Some(Self::Corporate),
            _ => None,
        }
    }
}

/// Canonical contact record as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier, immutable after creation.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// ASCII digits only, no separators.
    pub phone_number: String,
    /// Only month/day are semantically used by the birthday query; the
    /// year is informational.
    pub birth_date: NaiveDate,
    pub crm_status: CrmStatus,
}

impl Contact {
    /// Checks every field constraint. Read paths use this to reject
    /// invalid persisted state instead of masking it.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_first_name(&self.first_name)?;
        validate_last_name(&self.last_name)?;
        validate_email(&self.email)?;
        validate_phone_number(&self.phone_number)?;
        Ok(())
    }
}

/// Creation payload: every contact field except the store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
    /// `None` means "unset"; the store default `operational` applies.
    #[serde(default)]
    pub crm_status: Option<CrmStatus>,
}

impl NewContact {
    /// Checks every field constraint before the payload reaches SQL.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        validate_first_name(&self.first_name)?;
        validate_last_name(&self.last_name)?;
        validate_email(&self.email)?;
        validate_phone_number(&self.phone_number)?;
        Ok(())
    }
}

/// Partial-update payload: only `Some` fields are applied.
///
/// An explicit diff object avoids the "unset vs default" ambiguity of
/// reusing the creation payload for updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub crm_status: Option<CrmStatus>,
}

impl ContactPatch {
    /// Returns whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.birth_date.is_none()
            && self.crm_status.is_none()
    }

    /// Checks constraints for every field the patch supplies.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if let Some(first_name) = &self.first_name {
            validate_first_name(first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_last_name(last_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone_number) = &self.phone_number {
            validate_phone_number(phone_number)?;
        }
        Ok(())
    }
}

/// Field-level constraint violation detected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    FirstNameLength { chars: usize },
    LastNameLength { chars: usize },
    EmailLength { chars: usize },
    EmailSyntax { email: String },
    PhoneNumberLength { chars: usize },
    PhoneNumberNotDigits { phone_number: String },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstNameLength { chars } => write!(
                f,
                "first_name must be {NAME_MIN_CHARS}..={NAME_MAX_CHARS} characters, got {chars}"
            ),
            Self::LastNameLength { chars } => write!(
                f,
                "last_name must be {NAME_MIN_CHARS}..={NAME_MAX_CHARS} characters, got {chars}"
            ),
            Self::EmailLength { chars } => write!(
                f,
                "email must be {EMAIL_MIN_CHARS}..={EMAIL_MAX_CHARS} characters, got {chars}"
            ),
            Self::EmailSyntax { email } => write!(f, "email `{email}` is not valid email syntax"),
            Self::PhoneNumberLength { chars } => write!(
                f,
                "phone_number must be 1..={PHONE_MAX_CHARS} characters, got {chars}"
            ),
            Self::PhoneNumberNotDigits { phone_number } => write!(
                f,
                "phone_number `{phone_number}` must contain ASCII digits only"
            ),
        }
    }
}

impl Error for ContactValidationError {}

fn validate_first_name(value: &str) -> Result<(), ContactValidationError> {
    let chars = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(ContactValidationError::FirstNameLength { chars });
    }
    Ok(())
}

fn validate_last_name(value: &str) -> Result<(), ContactValidationError> {
    let chars = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(ContactValidationError::LastNameLength { chars });
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ContactValidationError> {
    let chars = value.chars().count();
    if !(EMAIL_MIN_CHARS..=EMAIL_MAX_CHARS).contains(&chars) {
        return Err(ContactValidationError::EmailLength { chars });
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ContactValidationError::EmailSyntax {
            email: value.to_string(),
        });
    }
    Ok(())
}

fn validate_phone_number(value: &str) -> Result<(), ContactValidationError> {
    let chars = value.chars().count();
    if chars == 0 || chars > PHONE_MAX_CHARS {
        return Err(ContactValidationError::PhoneNumberLength { chars });
    }
    if !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ContactValidationError::PhoneNumberNotDigits {
            phone_number: value.to_string(),
        });
    }
    Ok(())
}
