// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::EmployeeId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Provenance of an assignment edge.
///
/// Auto edges are produced by the pairing solver and are replaced wholesale
/// on every re-solve. Manual edges are placed by a human and survive
/// re-solves untouched; they may deliberately cross outside stated
/// preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EdgeOrigin {
    /// Generated by the auto-pairing solver.
    #[default]
    Auto,
    /// Placed or moved by a human through the manual adjustment engine.
    Manual,
}

impl EdgeOrigin {
    /// Converts this origin to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for EdgeOrigin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::InvalidEdgeOrigin(s.to_owned())),
        }
    }
}

impl std::fmt::Display for EdgeOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed reviewer → reviewee assignment.
///
/// The existence of an edge means "`reviewer_id` owes a review to
/// `reviewee_id`" within the edge's review cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentEdge {
    /// The employee performing the review.
    pub reviewer_id: EmployeeId,
    /// The employee being reviewed.
    pub reviewee_id: EmployeeId,
    /// Whether this edge was solver-generated or human-placed.
    pub origin: EdgeOrigin,
}

impl AssignmentEdge {
    /// Creates a new `AssignmentEdge`.
    ///
    /// # Arguments
    ///
    /// * `reviewer_id` - The employee performing the review
    /// * `reviewee_id` - The employee being reviewed
    /// * `origin` - The edge's provenance
    #[must_use]
    pub const fn new(reviewer_id: EmployeeId, reviewee_id: EmployeeId, origin: EdgeOrigin) -> Self {
        Self {
            reviewer_id,
            reviewee_id,
            origin,
        }
    }

    /// Returns whether this edge was placed by a human.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self.origin, EdgeOrigin::Manual)
    }
}
