//! # oficina-client
//!
//! Blocking client for the workshop service and roster submission.
//!
//! Build an [`HttpApi`] from the local [`oficina_core::Config`], then use a
//! [`RosterReconciler`] to submit edited selections, or [`certificates::download`]
//! to fetch certificate archives.

pub mod api;
pub mod certificates;
pub mod error;
pub mod reconciler;

pub use api::{HttpApi, RosterPayload, WorkshopApi};
pub use error::{ApiError, RosterError};
pub use reconciler::{RosterReconciler, UpdatedRoster};
