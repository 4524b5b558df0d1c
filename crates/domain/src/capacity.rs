// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Capacity configuration for one review cycle.
///
/// `max_reviews_allowed` is the engine's target capacity `K`: the number of
/// reviewers every employee should end up with, and the hard ceiling no
/// committed graph may exceed. The optional limits default to off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Cap on how many peers one employee may name when submitting
    /// selections. Enforced upstream by the peer-selection collaborator;
    /// carried here read-only for reporting.
    pub max_peer_selection: u32,
    /// The required/target number of reviewers per employee (`K`).
    /// Hard ceiling on any employee's inbound reviewer count.
    pub max_reviews_allowed: u32,
    /// Optional ceiling on how many reviews a single reviewer may owe.
    /// Unbounded when unset.
    pub reviewer_load_limit: Option<u32>,
    /// Optional cap on how many of a reviewee's reviewers may come from the
    /// reviewee's own department. Off when unset.
    pub department_cap: Option<u32>,
    /// Whether pairings between a manager and a direct subordinate are
    /// disallowed (in either direction). Off by default.
    pub forbid_manager_pairs: bool,
}

impl CapacityConfig {
    /// Creates a new `CapacityConfig` with optional rules switched off.
    ///
    /// # Arguments
    ///
    /// * `max_peer_selection` - Cap on submitted peer selections
    /// * `max_reviews_allowed` - The target reviewer count `K`
    #[must_use]
    pub const fn new(max_peer_selection: u32, max_reviews_allowed: u32) -> Self {
        Self {
            max_peer_selection,
            max_reviews_allowed,
            reviewer_load_limit: None,
            department_cap: None,
            forbid_manager_pairs: false,
        }
    }

    /// Validates the configuration.
    ///
    /// A zero target or a configured zero limit makes every assignment
    /// impossible and indicates a malformed upstream configuration rather
    /// than a legitimate cycle, so the solver refuses to run on it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if `max_reviews_allowed` or
    /// `max_peer_selection` is zero, or if a configured optional limit is
    /// zero.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if self.max_reviews_allowed == 0 {
            return Err(DomainError::InvalidCapacity {
                field: "max_reviews_allowed",
                value: 0,
            });
        }
        if self.max_peer_selection == 0 {
            return Err(DomainError::InvalidCapacity {
                field: "max_peer_selection",
                value: 0,
            });
        }
        if matches!(self.reviewer_load_limit, Some(0)) {
            return Err(DomainError::InvalidCapacity {
                field: "reviewer_load_limit",
                value: 0,
            });
        }
        if matches!(self.department_cap, Some(0)) {
            return Err(DomainError::InvalidCapacity {
                field: "department_cap",
                value: 0,
            });
        }
        Ok(())
    }
}
