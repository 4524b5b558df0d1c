// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::graph::AssignmentGraph;
use peer_pair_domain::{
    AssignmentEdge, CapacityConfig, DomainError, EdgeOrigin, EmployeeId, PeerSelections, Roster,
    validate_roster, validate_selections,
};
use std::cmp::Reverse;

/// An employee the solver could not bring up to the target reviewer count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// The under-capacity employee.
    pub employee_id: EmployeeId,
    /// How many reviewers the employee ended up with.
    pub assigned: u32,
    /// How many more reviewers the employee still needs to reach the target.
    pub needed: u32,
}

/// The result of a successful solve.
///
/// Under-capacity is not an error: employees who could not reach the target
/// are reported in `unsatisfied` for human follow-up, never silently
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// The candidate assignment graph.
    pub graph: AssignmentGraph,
    /// Employees still under the target reviewer count, in roster order.
    pub unsatisfied: Vec<Shortfall>,
}

/// Runs the auto-pairing solver for one review cycle.
///
/// Greedy bipartite assignment with preference scoring: mutual selections
/// (score 2) are placed before one-sided selections (score 1), ties broken
/// by ascending `(reviewer_id, reviewee_id)`. Employees still under the
/// target after the preference pass receive reviewers from a load-balanced
/// fill pass. All ordering is deterministic — identical inputs produce a
/// byte-identical edge list.
///
/// Existing manual edges are seeded into the graph first and counted
/// against capacity; the solver never alters or removes them. Re-running
/// with unchanged inputs is therefore idempotent, and re-running after a
/// preference change replaces only auto-origin edges.
///
/// # Arguments
///
/// * `roster` - The cycle's employee snapshot
/// * `selections` - The submitted peer selections
/// * `capacity` - The cycle's capacity configuration
/// * `manual_edges` - Human-placed edges that must be preserved untouched
///
/// # Returns
///
/// * `Ok(SolveOutcome)` with the candidate graph and any shortfalls
/// * `Err(CoreError)` for structurally invalid input only
///
/// # Errors
///
/// Returns an error if the capacity configuration is invalid, the roster is
/// empty or inconsistent, the selections reference unknown employees, or
/// the preserved manual edges are structurally corrupt. Under-capacity is
/// reported via `SolveOutcome::unsatisfied`, not as an error.
pub fn solve(
    roster: &Roster,
    selections: &PeerSelections,
    capacity: &CapacityConfig,
    manual_edges: &[AssignmentEdge],
) -> Result<SolveOutcome, CoreError> {
    capacity.validate()?;
    validate_roster(roster)?;
    validate_selections(roster, selections)?;

    let mut graph: AssignmentGraph = AssignmentGraph::new(roster.review_cycle_id());
    seed_manual_edges(&mut graph, roster, manual_edges)?;

    place_preferred_edges(&mut graph, roster, selections, capacity);
    fill_remaining_slots(&mut graph, roster, capacity);

    let unsatisfied: Vec<Shortfall> = collect_shortfalls(&graph, roster, capacity);

    Ok(SolveOutcome { graph, unsatisfied })
}

/// Seeds preserved manual edges into an empty graph.
///
/// Manual edges are only checked for structural soundness and roster
/// membership. Capacity rules are not re-applied: the edges were valid when
/// an operator placed them, and they are preserved verbatim even if the
/// configuration has tightened since.
fn seed_manual_edges(
    graph: &mut AssignmentGraph,
    roster: &Roster,
    manual_edges: &[AssignmentEdge],
) -> Result<(), CoreError> {
    for edge in manual_edges {
        if !roster.contains(&edge.reviewer_id) {
            return Err(DomainError::UnknownEmployee {
                employee_id: edge.reviewer_id.clone(),
            }
            .into());
        }
        if !roster.contains(&edge.reviewee_id) {
            return Err(DomainError::UnknownEmployee {
                employee_id: edge.reviewee_id.clone(),
            }
            .into());
        }
        if edge.reviewer_id == edge.reviewee_id {
            return Err(DomainError::SelfAssignment {
                employee_id: edge.reviewer_id.clone(),
            }
            .into());
        }
        if graph.contains_edge(&edge.reviewer_id, &edge.reviewee_id) {
            return Err(DomainError::DuplicateEdge {
                reviewer_id: edge.reviewer_id.clone(),
                reviewee_id: edge.reviewee_id.clone(),
            }
            .into());
        }
        graph.insert(AssignmentEdge::new(
            edge.reviewer_id.clone(),
            edge.reviewee_id.clone(),
            EdgeOrigin::Manual,
        ));
    }
    Ok(())
}

/// Places preference-derived edges, mutual selections first.
fn place_preferred_edges(
    graph: &mut AssignmentGraph,
    roster: &Roster,
    selections: &PeerSelections,
    capacity: &CapacityConfig,
) {
    // Candidate (reviewer, reviewee) pairs: the reviewer named the reviewee.
    // Mutual pairs score 2, one-sided pairs score 1.
    let mut candidates: Vec<(u8, &EmployeeId, &EmployeeId)> = Vec::new();
    for (reviewer_id, choices) in selections.iter() {
        for reviewee_id in choices {
            let score: u8 = if selections.named(reviewee_id, reviewer_id) {
                2
            } else {
                1
            };
            candidates.push((score, reviewer_id, reviewee_id));
        }
    }

    candidates.sort_by(|a, b| {
        Reverse(a.0)
            .cmp(&Reverse(b.0))
            .then_with(|| a.1.cmp(b.1))
            .then_with(|| a.2.cmp(b.2))
    });

    for (_, reviewer_id, reviewee_id) in candidates {
        if graph
            .check_edge(roster, capacity, reviewer_id, reviewee_id)
            .is_ok()
        {
            graph.insert(AssignmentEdge::new(
                reviewer_id.clone(),
                reviewee_id.clone(),
                EdgeOrigin::Auto,
            ));
        }
    }
}

/// Tops up every under-target employee with load-balanced reviewers.
///
/// Reviewees are visited in ascending id order; candidate reviewers are
/// ranked by current outbound load, then id, so repeated runs distribute
/// the fill identically.
fn fill_remaining_slots(graph: &mut AssignmentGraph, roster: &Roster, capacity: &CapacityConfig) {
    let mut employee_ids: Vec<EmployeeId> = roster
        .employees()
        .iter()
        .map(|employee| employee.employee_id.clone())
        .collect();
    employee_ids.sort();

    for reviewee_id in &employee_ids {
        while graph.in_degree(reviewee_id) < capacity.max_reviews_allowed {
            let candidate: Option<EmployeeId> = employee_ids
                .iter()
                .filter(|reviewer_id| {
                    graph
                        .check_edge(roster, capacity, reviewer_id, reviewee_id)
                        .is_ok()
                })
                .min_by_key(|reviewer_id| (graph.out_degree(reviewer_id), (*reviewer_id).clone()))
                .cloned();

            let Some(reviewer_id) = candidate else {
                break;
            };
            graph.insert(AssignmentEdge::new(
                reviewer_id,
                reviewee_id.clone(),
                EdgeOrigin::Auto,
            ));
        }
    }
}

/// Collects employees still under the target, in roster order.
fn collect_shortfalls(
    graph: &AssignmentGraph,
    roster: &Roster,
    capacity: &CapacityConfig,
) -> Vec<Shortfall> {
    roster
        .employees()
        .iter()
        .filter_map(|employee| {
            let assigned: u32 = graph.in_degree(&employee.employee_id);
            (assigned < capacity.max_reviews_allowed).then(|| Shortfall {
                employee_id: employee.employee_id.clone(),
                assigned,
                needed: capacity.max_reviews_allowed - assigned,
            })
        })
        .collect()
}
