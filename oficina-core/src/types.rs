//! Domain types for workshops and participants.
//!
//! Rust field names are English; the wire names used by the workshop service
//! are kept through `#[serde(rename)]` so the JSON stays bit-compatible with
//! the remote API (`titulo`, `numeroMaxParticipantes`, …).

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Academic registration identifier — the unique key of a [`Participant`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ra(pub String);

impl Ra {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Ra {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ra {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Server-assigned identifier of a [`Workshop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkshopId(pub i64);

impl fmt::Display for WorkshopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for WorkshopId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a workshop is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EventType {
    #[default]
    #[serde(rename = "PRESENCIAL")]
    InPerson,
    #[serde(rename = "ONLINE")]
    Online,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::InPerson => write!(f, "PRESENCIAL"),
            EventType::Online => write!(f, "ONLINE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub ra: Ra,
    /// Older service builds send `fullName`.
    #[serde(alias = "fullName")]
    pub name: String,
}

impl Participant {
    pub fn new(ra: impl Into<Ra>, name: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            name: name.into(),
        }
    }
}

/// A workshop as stored by the service, including its current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: WorkshopId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    /// Length in hours.
    #[serde(rename = "duracao")]
    pub duration_hours: u32,
    #[serde(rename = "numeroMaxParticipantes")]
    pub max_participants: u32,
    #[serde(rename = "tipoEvento", default)]
    pub event_type: EventType,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<Participant>,
}

/// Body of `POST /workshops`: a validated workshop that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "duracao")]
    pub duration_hours: u32,
    #[serde(rename = "numeroMaxParticipantes")]
    pub max_participants: u32,
    #[serde(rename = "tipoEvento")]
    pub event_type: EventType,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<Participant>,
}

impl WorkshopDraft {
    /// Attach an id and roster, producing the full record sent on `PUT /workshops/{id}`.
    pub fn into_workshop(self, id: WorkshopId, participants: Vec<Participant>) -> Workshop {
        Workshop {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            duration_hours: self.duration_hours,
            max_participants: self.max_participants,
            event_type: self.event_type,
            participants,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(Ra::from("RA001").to_string(), "RA001");
        assert_eq!(WorkshopId::from(7).to_string(), "7");
    }

    #[test]
    fn workshop_uses_service_field_names() {
        let json = r#"{
            "id": 3,
            "titulo": "Rust 101",
            "data": "2026-03-14",
            "duracao": 4,
            "numeroMaxParticipantes": 20,
            "tipoEvento": "ONLINE",
            "participantes": [{"ra": "RA001", "name": "Ana"}]
        }"#;
        let w: Workshop = serde_json::from_str(json).expect("parse");
        assert_eq!(w.id, WorkshopId(3));
        assert_eq!(w.title, "Rust 101");
        assert!(w.description.is_none());
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2026, 3, 14).expect("date"));
        assert_eq!(w.max_participants, 20);
        assert_eq!(w.event_type, EventType::Online);
        assert_eq!(w.participants, vec![Participant::new("RA001", "Ana")]);

        let back = serde_json::to_value(&w).expect("serialize");
        assert_eq!(back["numeroMaxParticipantes"], 20);
        assert_eq!(back["tipoEvento"], "ONLINE");
        assert!(back.get("descricao").is_none());
    }

    #[test]
    fn participant_accepts_legacy_full_name() {
        let p: Participant =
            serde_json::from_str(r#"{"ra": "RA009", "fullName": "Bia"}"#).expect("parse");
        assert_eq!(p, Participant::new("RA009", "Bia"));
    }

    #[test]
    fn missing_roster_defaults_to_empty() {
        let json = r#"{"id": 1, "titulo": "x", "data": "2026-01-01", "duracao": 1,
                       "numeroMaxParticipantes": 1}"#;
        let w: Workshop = serde_json::from_str(json).expect("parse");
        assert!(w.participants.is_empty());
        assert_eq!(w.event_type, EventType::InPerson);
    }

    #[test]
    fn event_type_display() {
        assert_eq!(EventType::InPerson.to_string(), "PRESENCIAL");
        assert_eq!(EventType::Online.to_string(), "ONLINE");
    }
}
