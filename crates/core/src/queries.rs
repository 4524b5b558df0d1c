// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only projections over an assignment graph.
//!
//! Everything here is derived and recomputed on read; nothing mutates the
//! graph and nothing triggers a re-solve. Dashboards and the manual-pairing
//! screen are built entirely from these projections.

use crate::graph::AssignmentGraph;
use peer_pair_domain::{EmployeeId, PeerSelections, ReviewCycleId, Roster};
use std::collections::BTreeSet;

/// Per-employee assignment load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLoad {
    /// The employee.
    pub employee_id: EmployeeId,
    /// How many reviewers are assigned to this employee.
    pub in_degree: u32,
    /// How many reviews this employee owes.
    pub out_degree: u32,
}

/// Assignment load for every employee in a cycle, in roster order.
///
/// Backs the dashboard progress widgets ("selections completed / pending").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// The review cycle summarized.
    pub review_cycle_id: ReviewCycleId,
    /// One row per roster employee, in directory order.
    pub rows: Vec<EmployeeLoad>,
}

/// Returns the reviewers assigned to an employee, in edge insertion order.
#[must_use]
pub fn reviewers_of(graph: &AssignmentGraph, employee_id: &EmployeeId) -> Vec<EmployeeId> {
    graph
        .edges()
        .iter()
        .filter(|edge| edge.reviewee_id == *employee_id)
        .map(|edge| edge.reviewer_id.clone())
        .collect()
}

/// Returns the reviewees an employee must review, in edge insertion order.
#[must_use]
pub fn reviewees_of(graph: &AssignmentGraph, employee_id: &EmployeeId) -> Vec<EmployeeId> {
    graph
        .edges()
        .iter()
        .filter(|edge| edge.reviewer_id == *employee_id)
        .map(|edge| edge.reviewee_id.clone())
        .collect()
}

/// Returns the peers who mutually selected each other with an employee.
///
/// This is computed from the submitted selections, not from the graph: it
/// backs the "Mutual Selections" pool in the manual-pairing screen, which
/// is shown whether or not the solver has run yet.
#[must_use]
pub fn mutual_selections(
    selections: &PeerSelections,
    employee_id: &EmployeeId,
) -> BTreeSet<EmployeeId> {
    selections
        .choices_of(employee_id)
        .map(|choices| {
            choices
                .iter()
                .filter(|choice| selections.named(choice, employee_id))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Computes the per-employee load summary for a cycle.
#[must_use]
pub fn load_summary(graph: &AssignmentGraph, roster: &Roster) -> LoadSummary {
    let rows: Vec<EmployeeLoad> = roster
        .employees()
        .iter()
        .map(|employee| EmployeeLoad {
            employee_id: employee.employee_id.clone(),
            in_degree: graph.in_degree(&employee.employee_id),
            out_degree: graph.out_degree(&employee.employee_id),
        })
        .collect();

    LoadSummary {
        review_cycle_id: graph.review_cycle_id(),
        rows,
    }
}
