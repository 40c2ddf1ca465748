//! Roster selection and reconciliation.
//!
//! A [`SelectionState`] is the desired roster of one workshop while it is
//! being edited. Every operation here is pure: it borrows its inputs and
//! returns a new value, so the caller (the view layer) is the only owner of
//! mutation. Submitting a selection is done by `oficina-client`.

use std::collections::BTreeSet;

use crate::types::{Participant, Ra, Workshop};

/// Immutable set of selected participant identifiers.
///
/// Backed by a `BTreeSet` so iteration order, and therefore the request
/// payload, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<Ra>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ra: &Ra) -> bool {
        self.selected.contains(ra)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ra> {
        self.selected.iter()
    }

    pub fn as_set(&self) -> &BTreeSet<Ra> {
        &self.selected
    }

    /// Copy of the selection that is guaranteed to contain `ra`.
    pub fn with(&self, ra: &Ra) -> Self {
        if self.contains(ra) {
            self.clone()
        } else {
            toggle(self, ra)
        }
    }

    /// Copy of the selection that is guaranteed not to contain `ra`.
    pub fn without(&self, ra: &Ra) -> Self {
        if self.contains(ra) {
            toggle(self, ra)
        } else {
            self.clone()
        }
    }
}

impl FromIterator<Ra> for SelectionState {
    fn from_iter<I: IntoIterator<Item = Ra>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

/// Additions and removals that turn an original roster into a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDiff {
    pub to_add: BTreeSet<Ra>,
    pub to_remove: BTreeSet<Ra>,
}

impl RosterDiff {
    /// `true` when the selection equals the original roster.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// `original ∪ to_add − to_remove`.
    pub fn apply(&self, original: &BTreeSet<Ra>) -> BTreeSet<Ra> {
        original
            .union(&self.to_add)
            .filter(|ra| !self.to_remove.contains(*ra))
            .cloned()
            .collect()
    }
}

/// Seed a selection with every participant currently on the workshop roster.
pub fn initialize(workshop: &Workshop) -> SelectionState {
    roster_ras(&workshop.participants).into_iter().collect()
}

/// Add `ra` if absent, remove it if present.
pub fn toggle(selection: &SelectionState, ra: &Ra) -> SelectionState {
    let mut selected = selection.selected.clone();
    if !selected.remove(ra) {
        selected.insert(ra.clone());
    }
    SelectionState { selected }
}

/// Compute what a submission of `selection` would change relative to `original`.
pub fn diff(original: &BTreeSet<Ra>, selection: &SelectionState) -> RosterDiff {
    RosterDiff {
        to_add: selection.selected.difference(original).cloned().collect(),
        to_remove: original.difference(&selection.selected).cloned().collect(),
    }
}

/// The set of identifiers on a roster.
pub fn roster_ras(participants: &[Participant]) -> BTreeSet<Ra> {
    participants.iter().map(|p| p.ra.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
