// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The submitted peer selections for one review cycle.
///
/// Each entry maps a selector to the set of peers that selector chose to be
/// reviewed by. Re-submission overwrites the selector's previous entry.
/// Ordered containers are used throughout so iteration order is
/// deterministic; the solver depends on that for reproducible output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PeerSelections {
    /// Selector → chosen peers.
    entries: BTreeMap<EmployeeId, BTreeSet<EmployeeId>>,
}

impl PeerSelections {
    /// Creates an empty `PeerSelections`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records a selector's choices, replacing any previous submission.
    ///
    /// Self-selections are discarded on entry; an employee can never choose
    /// themselves as a reviewer.
    ///
    /// # Arguments
    ///
    /// * `selector_id` - The employee submitting selections
    /// * `choices` - The peers the selector chose to be reviewed by
    pub fn submit(&mut self, selector_id: EmployeeId, choices: BTreeSet<EmployeeId>) {
        let filtered: BTreeSet<EmployeeId> = choices
            .into_iter()
            .filter(|choice| *choice != selector_id)
            .collect();
        self.entries.insert(selector_id, filtered);
    }

    /// Returns the choices submitted by an employee, if any.
    #[must_use]
    pub fn choices_of(&self, selector_id: &EmployeeId) -> Option<&BTreeSet<EmployeeId>> {
        self.entries.get(selector_id)
    }

    /// Checks whether `selector_id` named `candidate_id` in their selections.
    #[must_use]
    pub fn named(&self, selector_id: &EmployeeId, candidate_id: &EmployeeId) -> bool {
        self.entries
            .get(selector_id)
            .is_some_and(|choices| choices.contains(candidate_id))
    }

    /// Checks whether two employees each named the other.
    #[must_use]
    pub fn is_mutual(&self, a: &EmployeeId, b: &EmployeeId) -> bool {
        self.named(a, b) && self.named(b, a)
    }

    /// Checks whether an employee has submitted selections for this cycle.
    #[must_use]
    pub fn has_submitted(&self, selector_id: &EmployeeId) -> bool {
        self.entries.contains_key(selector_id)
    }

    /// Iterates over all submissions in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (&EmployeeId, &BTreeSet<EmployeeId>)> {
        self.entries.iter()
    }

    /// Returns the number of employees who have submitted selections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no selections have been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EmployeeId, BTreeSet<EmployeeId>)> for PeerSelections {
    fn from_iter<I: IntoIterator<Item = (EmployeeId, BTreeSet<EmployeeId>)>>(iter: I) -> Self {
        let mut selections: Self = Self::new();
        for (selector_id, choices) in iter {
            selections.submit(selector_id, choices);
        }
        selections
    }
}
