//! Roster submission.
//!
//! [`RosterReconciler::submit`] sends the complete desired selection, never a
//! diff, so resubmitting an unchanged selection after a failure cannot apply
//! an addition or removal twice.

use std::collections::BTreeSet;

use oficina_core::roster::{self, RosterDiff, SelectionState};
use oficina_core::types::{Participant, Ra, Workshop, WorkshopId};

use crate::api::WorkshopApi;
use crate::error::{ApiError, RosterError};

/// Roster accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedRoster {
    pub workshop_id: WorkshopId,
    /// Catalog entries for the submitted selection, in catalog order.
    pub participants: Vec<Participant>,
}

impl UpdatedRoster {
    /// Copy of `workshop` carrying the new roster.
    pub fn apply(&self, workshop: &Workshop) -> Workshop {
        Workshop {
            participants: self.participants.clone(),
            ..workshop.clone()
        }
    }
}

/// Submits roster selections for workshops, resolving identifiers against
/// the participant catalog.
///
/// Callers must not issue a second `submit` for the same workshop while one
/// is outstanding; concurrent submissions are not serialized here.
pub struct RosterReconciler<'a, A: WorkshopApi + ?Sized> {
    api: &'a A,
    catalog: Vec<Participant>,
}

impl<'a, A: WorkshopApi + ?Sized> RosterReconciler<'a, A> {
    pub fn new(api: &'a A, catalog: Vec<Participant>) -> Self {
        Self { api, catalog }
    }

    /// Fetch the participant catalog and build a reconciler around it.
    pub fn load(api: &'a A) -> Result<Self, ApiError> {
        let catalog = api.list_participants()?;
        tracing::debug!(participants = catalog.len(), "catalog loaded");
        Ok(Self::new(api, catalog))
    }

    pub fn catalog(&self) -> &[Participant] {
        &self.catalog
    }

    /// Selected identifiers that are not in the catalog.
    pub fn unknown(&self, selection: &SelectionState) -> Vec<Ra> {
        let known = roster::roster_ras(&self.catalog);
        selection
            .iter()
            .filter(|ra| !known.contains(*ra))
            .cloned()
            .collect()
    }

    /// What submitting `selection` would change on `workshop`.
    pub fn preview(&self, workshop: &Workshop, selection: &SelectionState) -> RosterDiff {
        roster::diff(&roster::roster_ras(&workshop.participants), selection)
    }

    /// Replace the roster of `workshop` with `selection`.
    ///
    /// Neither argument is modified; on error the caller's state stays
    /// authoritative and the same selection may be submitted again.
    pub fn submit(
        &self,
        workshop: &Workshop,
        selection: &SelectionState,
    ) -> Result<UpdatedRoster, RosterError> {
        let ras: Vec<Ra> = selection.iter().cloned().collect();
        tracing::debug!(
            workshop = %workshop.id,
            selected = ras.len(),
            max = workshop.max_participants,
            "submitting roster"
        );

        match self.api.replace_roster(workshop.id, &ras) {
            Ok(()) => {}
            Err(err) if err.is_conflict() => {
                tracing::warn!(
                    workshop = %workshop.id,
                    attempted = ras.len(),
                    max = workshop.max_participants,
                    "roster rejected: capacity exceeded"
                );
                return Err(RosterError::CapacityExceeded {
                    attempted: ras.len(),
                    max: workshop.max_participants,
                });
            }
            Err(err) => return Err(RosterError::RequestFailed(err)),
        }

        let participants = self.resolve(selection);
        tracing::info!(
            workshop = %workshop.id,
            participants = participants.len(),
            "roster updated"
        );
        Ok(UpdatedRoster {
            workshop_id: workshop.id,
            participants,
        })
    }

    fn resolve(&self, selection: &SelectionState) -> Vec<Participant> {
        let resolved: Vec<Participant> = self
            .catalog
            .iter()
            .filter(|p| selection.contains(&p.ra))
            .cloned()
            .collect();
        if resolved.len() < selection.len() {
            let found: BTreeSet<&Ra> = resolved.iter().map(|p| &p.ra).collect();
            for ra in selection.iter().filter(|ra| !found.contains(ra)) {
                tracing::warn!(ra = %ra, "selected participant missing from catalog");
            }
        }
        resolved
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
