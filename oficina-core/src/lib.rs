//! Oficina core library — domain types, roster reconciliation, validation, config.
//!
//! - [`types`] — newtypes and domain structs
//! - [`roster`] — pure selection / diff operations
//! - [`validation`] — form validation
//! - [`config`] — `~/.oficina/config.yaml` load / save
//! - [`error`] — [`ConfigError`], [`ValidationError`]

pub mod config;
pub mod error;
pub mod roster;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{ConfigError, ValidationError};
pub use roster::{RosterDiff, SelectionState};
pub use types::{EventType, Participant, Ra, Workshop, WorkshopDraft, WorkshopId};
