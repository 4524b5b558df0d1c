// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::graph::{AssignmentGraph, TransitionResult};
use peer_pair_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use peer_pair_domain::{AssignmentEdge, CapacityConfig, EdgeOrigin, Roster};

/// Applies a manual command to an assignment graph.
///
/// This is the manual adjustment engine: the input graph is immutable, the
/// command is validated against the graph as it would look *after* the
/// change, and either a complete new graph with exactly one audit event is
/// returned, or an error with no side effects. Every edge produced here is
/// tagged `manual` — operators may deliberately place edges outside the
/// stated peer selections.
///
/// # Arguments
///
/// * `graph` - The current assignment graph (immutable)
/// * `roster` - The cycle's employee snapshot
/// * `capacity` - The cycle's capacity configuration
/// * `command` - The manual command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new graph and audit event
/// * `Err(CoreError)` naming the specific invariant the change would break
///
/// # Errors
///
/// Returns an error if the command would violate a graph invariant, or if
/// it refers to an edge or employee that does not exist. A failed
/// `MoveEdge` leaves the original edge in place.
pub fn apply(
    graph: &AssignmentGraph,
    roster: &Roster,
    capacity: &CapacityConfig,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = graph.to_snapshot();

    match command {
        Command::AddEdge {
            reviewer_id,
            reviewee_id,
        } => {
            graph.check_edge(roster, capacity, &reviewer_id, &reviewee_id)?;

            let mut new_graph: AssignmentGraph = graph.clone();
            new_graph.insert(AssignmentEdge::new(
                reviewer_id.clone(),
                reviewee_id.clone(),
                EdgeOrigin::Manual,
            ));

            let action: Action = Action::new(
                String::from("AddEdge"),
                Some(format!("Assigned '{reviewer_id}' to review '{reviewee_id}'")),
            );
            let audit_event: AuditEvent = build_event(&new_graph, actor, cause, action, before);

            Ok(TransitionResult {
                new_graph,
                audit_event,
            })
        }
        Command::RemoveEdge {
            reviewer_id,
            reviewee_id,
        } => {
            let mut new_graph: AssignmentGraph = graph.clone();
            new_graph.remove(&reviewer_id, &reviewee_id)?;

            let action: Action = Action::new(
                String::from("RemoveEdge"),
                Some(format!(
                    "Unassigned '{reviewer_id}' from reviewing '{reviewee_id}'"
                )),
            );
            let audit_event: AuditEvent = build_event(&new_graph, actor, cause, action, before);

            Ok(TransitionResult {
                new_graph,
                audit_event,
            })
        }
        Command::MoveEdge {
            reviewer_id,
            from_reviewee_id,
            to_reviewee_id,
        } => {
            // One transaction: remove and add are validated together on a
            // scratch graph. The caller's graph is untouched on any failure,
            // so the original edge survives a rejected destination.
            let mut new_graph: AssignmentGraph = graph.clone();
            new_graph.remove(&reviewer_id, &from_reviewee_id)?;
            new_graph.check_edge(roster, capacity, &reviewer_id, &to_reviewee_id)?;
            new_graph.insert(AssignmentEdge::new(
                reviewer_id.clone(),
                to_reviewee_id.clone(),
                EdgeOrigin::Manual,
            ));

            let action: Action = Action::new(
                String::from("MoveEdge"),
                Some(format!(
                    "Moved '{reviewer_id}' from reviewing '{from_reviewee_id}' to reviewing '{to_reviewee_id}'"
                )),
            );
            let audit_event: AuditEvent = build_event(&new_graph, actor, cause, action, before);

            Ok(TransitionResult {
                new_graph,
                audit_event,
            })
        }
    }
}

fn build_event(
    new_graph: &AssignmentGraph,
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        before,
        new_graph.to_snapshot(),
        new_graph.review_cycle_id(),
    )
}
