//! Client-side form validation.
//!
//! Each validator collects every failing field into a [`ValidationError`]
//! and, on success, returns the typed value the service expects.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ValidationError;
use crate::types::{EventType, Participant, Ra, Workshop, WorkshopDraft};

pub const REQUIRED: &str = "field is required";
pub const EMAIL_DOMAIN_MESSAGE: &str = "must be a valid @utfpr.edu.br address";
pub const PASSWORD_MESSAGE: &str = "must have at least 8 characters including a lowercase \
     letter, an uppercase letter, a digit and one of @$!%*?&";
pub const PASSWORD_MISMATCH: &str = "passwords do not match";
pub const DURATION_MESSAGE: &str = "duration must be at least 1 hour";
pub const CAPACITY_MESSAGE: &str = "must allow at least 1 participant";
pub const DATE_MESSAGE: &str = "expected a date in YYYY-MM-DD format";
pub const DUPLICATE_RA: &str = "RA already registered";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^[A-Z0-9._%+-]+@utfpr\.edu\.br$").expect("email regex is valid")
});

// The `regex` crate has no look-ahead, so the charset and each required
// class are checked separately. Both patterns are ASCII-only: no Unicode
// digits and no case folding of letters such as `ſ` onto `s`.
static PASSWORD_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("password regex is valid")
});

const PASSWORD_SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Institutional e-mail check (case-insensitive, `@utfpr.edu.br` only).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Password complexity check.
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARSET.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Validate an instructor sign-up form. Pass `None` as `confirmation` for
/// the login form, which has no confirmation field.
pub fn credentials(
    email: &str,
    password: &str,
    confirmation: Option<&str>,
) -> Result<(), ValidationError> {
    let mut errors = Errors::default();
    if !is_valid_email(email) {
        errors.add("email", EMAIL_DOMAIN_MESSAGE);
    }
    if !is_valid_password(password) {
        errors.add("password", PASSWORD_MESSAGE);
    }
    if let Some(confirmation) = confirmation {
        if confirmation != password {
            errors.add("confirm_password", PASSWORD_MISMATCH);
        }
    }
    errors.finish(())
}

/// Raw workshop form input, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopForm {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration_hours: Option<i64>,
    pub max_participants: Option<i64>,
    pub event_type: EventType,
}

impl Default for WorkshopForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            date: None,
            duration_hours: Some(1),
            max_participants: None,
            event_type: EventType::InPerson,
        }
    }
}

impl From<&Workshop> for WorkshopForm {
    fn from(w: &Workshop) -> Self {
        Self {
            title: w.title.clone(),
            description: w.description.clone(),
            date: Some(w.date.format("%Y-%m-%d").to_string()),
            duration_hours: Some(i64::from(w.duration_hours)),
            max_participants: Some(i64::from(w.max_participants)),
            event_type: w.event_type,
        }
    }
}

/// Validate a workshop form into a draft with an empty roster.
pub fn workshop(form: &WorkshopForm) -> Result<WorkshopDraft, ValidationError> {
    let mut errors = Errors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.add("title", REQUIRED);
    }

    let date = match form.date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("date", REQUIRED);
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("date", DATE_MESSAGE);
                None
            }
        },
    };

    let duration_hours = positive(form.duration_hours);
    if duration_hours.is_none() {
        errors.add("duration_hours", DURATION_MESSAGE);
    }
    let max_participants = positive(form.max_participants);
    if max_participants.is_none() {
        errors.add("max_participants", CAPACITY_MESSAGE);
    }

    match (date, duration_hours, max_participants) {
        (Some(date), Some(duration_hours), Some(max_participants)) if errors.is_empty() => {
            Ok(WorkshopDraft {
                title: title.to_string(),
                description: form
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
                date,
                duration_hours,
                max_participants,
                event_type: form.event_type,
                participants: Vec::new(),
            })
        }
        _ => Err(errors.into_error()),
    }
}

/// Validate a participant registration against the current catalog.
pub fn participant(
    ra: &str,
    name: &str,
    catalog: &[Participant],
) -> Result<Participant, ValidationError> {
    let mut errors = Errors::default();
    let ra = ra.trim();
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", REQUIRED);
    }
    if ra.is_empty() {
        errors.add("ra", REQUIRED);
    } else if catalog.iter().any(|p| p.ra.as_str() == ra) {
        errors.add("ra", DUPLICATE_RA);
    }
    errors.finish(Participant::new(Ra::from(ra), name))
}

fn positive(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v >= 1)
        .and_then(|v| u32::try_from(v).ok())
}

#[derive(Default)]
struct Errors {
    fields: BTreeMap<&'static str, String>,
}

impl Errors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.fields.entry(field).or_insert_with(|| message.to_string());
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError {
            fields: self.fields,
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self.into_error())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
