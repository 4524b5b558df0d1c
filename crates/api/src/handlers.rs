// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutation handler follows the same shape: load the committed state
//! for the cycle, run the engine against it, persist the result and its
//! audit event in one transaction, and return a typed response. A handler
//! that fails commits nothing.

use std::collections::BTreeSet;
use tracing::info;

use peer_pair::{
    AssignmentGraph, Command, LoadSummary, SolveOutcome, TransitionResult, apply, load_summary,
    mutual_selections, reviewees_of, reviewers_of, solve,
};
use peer_pair_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use peer_pair_domain::{
    AssignmentEdge, CapacityConfig, Employee, EmployeeId, PeerSelections, ReviewCycleId, Roster,
    validate_roster, validate_selections,
};
use peer_pair_persistence::Persistence;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, EdgeMutationResponse, EdgeRequest, EmployeeInfo,
    EmployeeLoadInfo, LoadSummaryResponse, MoveEdgeRequest, MutualSelectionsResponse,
    PutCapacityRequest, PutCapacityResponse, PutRosterRequest, PutRosterResponse,
    PutSelectionsRequest, PutSelectionsResponse, RemoveCycleResponse, RevieweesResponse,
    ReviewersResponse, RunAutoPairingResponse, SelectionEntry, ShortfallInfo,
};

/// Loads the committed mutation context for a cycle.
fn load_cycle_state(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
) -> Result<(AssignmentGraph, Roster, CapacityConfig), ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let capacity: CapacityConfig = persistence
        .load_capacity(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let graph: AssignmentGraph = persistence
        .load_graph(review_cycle_id)
        .map_err(translate_persistence_error)?;
    Ok((graph, roster, capacity))
}

/// Resolves an employee that must exist on the cycle's roster.
fn require_employee(roster: &Roster, employee_id: &str) -> Result<EmployeeId, ApiError> {
    let id: EmployeeId = EmployeeId::new(employee_id);
    if roster.contains(&id) {
        Ok(id)
    } else {
        Err(ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee '{id}' is not on the cycle roster"),
        })
    }
}

/// Applies a manual command and commits the result with its audit event.
fn apply_and_commit(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<(usize, i64), ApiError> {
    let (graph, roster, capacity) = load_cycle_state(persistence, review_cycle_id)?;

    let result: TransitionResult = apply(&graph, &roster, &capacity, command, actor, cause)
        .map_err(translate_core_error)?;

    let edge_count: usize = result.new_graph.len();
    let event_id: i64 = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    Ok((edge_count, event_id))
}

/// Runs the auto-pairing solver for a cycle and commits the result.
///
/// Stored manual edges are preserved untouched; all auto edges are
/// replaced. The new graph and its audit event commit atomically, so a
/// failed solve leaves the previously committed graph in place.
/// Under-capacity employees come back as data in `unsatisfied`, never as
/// an error.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `review_cycle_id` - The cycle to solve
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the cycle does not exist, the stored input is
/// structurally invalid, or persistence fails.
pub fn run_auto_pairing(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    actor: Actor,
    cause: Cause,
) -> Result<RunAutoPairingResponse, ApiError> {
    let (stored_graph, roster, capacity) = load_cycle_state(persistence, review_cycle_id)?;
    let selections: PeerSelections = persistence
        .load_selections(review_cycle_id)
        .map_err(translate_persistence_error)?;

    let manual_edges: Vec<AssignmentEdge> = stored_graph.manual_edges();
    let outcome: SolveOutcome =
        solve(&roster, &selections, &capacity, &manual_edges).map_err(translate_core_error)?;

    let edge_count: usize = outcome.graph.len();
    let manual_edge_count: usize = manual_edges.len();
    let unsatisfied: Vec<ShortfallInfo> = outcome
        .unsatisfied
        .iter()
        .map(|shortfall| ShortfallInfo {
            employee_id: shortfall.employee_id.value().to_string(),
            assigned: shortfall.assigned,
            needed: shortfall.needed,
        })
        .collect();

    let action: Action = Action::new(
        String::from("RunAutoPairing"),
        Some(format!(
            "Placed {edge_count} edges ({manual_edge_count} manual preserved)"
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        stored_graph.to_snapshot(),
        outcome.graph.to_snapshot(),
        review_cycle_id,
    );
    let result: TransitionResult = TransitionResult {
        new_graph: outcome.graph,
        audit_event,
    };

    let event_id: i64 = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        review_cycle_id = review_cycle_id.value(),
        edge_count,
        unsatisfied = unsatisfied.len(),
        "auto-pairing committed"
    );

    Ok(RunAutoPairingResponse {
        review_cycle_id: review_cycle_id.value(),
        edge_count,
        manual_edge_count,
        unsatisfied,
        event_id,
        message: format!(
            "Auto-pairing committed {edge_count} edges for review cycle {}",
            review_cycle_id.value()
        ),
    })
}

/// Adds a manual assignment edge to a cycle's graph.
///
/// # Errors
///
/// Returns an error if the cycle does not exist, the edge would violate a
/// graph invariant, or persistence fails. On error the committed graph is
/// unchanged.
pub fn add_edge(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: &EdgeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<EdgeMutationResponse, ApiError> {
    let command: Command = Command::AddEdge {
        reviewer_id: EmployeeId::new(&request.reviewer_id),
        reviewee_id: EmployeeId::new(&request.reviewee_id),
    };
    let (edge_count, event_id) =
        apply_and_commit(persistence, review_cycle_id, command, actor, cause)?;

    Ok(EdgeMutationResponse {
        review_cycle_id: review_cycle_id.value(),
        edge_count,
        event_id,
        message: format!(
            "Assigned '{}' to review '{}'",
            request.reviewer_id, request.reviewee_id
        ),
    })
}

/// Removes a manual or auto assignment edge from a cycle's graph.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the edge does not exist; on any error the
/// committed graph is unchanged.
pub fn remove_edge(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: &EdgeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<EdgeMutationResponse, ApiError> {
    let command: Command = Command::RemoveEdge {
        reviewer_id: EmployeeId::new(&request.reviewer_id),
        reviewee_id: EmployeeId::new(&request.reviewee_id),
    };
    let (edge_count, event_id) =
        apply_and_commit(persistence, review_cycle_id, command, actor, cause)?;

    Ok(EdgeMutationResponse {
        review_cycle_id: review_cycle_id.value(),
        edge_count,
        event_id,
        message: format!(
            "Unassigned '{}' from reviewing '{}'",
            request.reviewer_id, request.reviewee_id
        ),
    })
}

/// Reassigns a reviewer from one reviewee to another.
///
/// The move is one transaction: if the destination would violate an
/// invariant, nothing is committed and the original edge survives.
///
/// # Errors
///
/// Returns an error if the source edge does not exist, the destination
/// edge would violate a graph invariant, or persistence fails.
pub fn move_edge(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: &MoveEdgeRequest,
    actor: Actor,
    cause: Cause,
) -> Result<EdgeMutationResponse, ApiError> {
    let command: Command = Command::MoveEdge {
        reviewer_id: EmployeeId::new(&request.reviewer_id),
        from_reviewee_id: EmployeeId::new(&request.from_reviewee_id),
        to_reviewee_id: EmployeeId::new(&request.to_reviewee_id),
    };
    let (edge_count, event_id) =
        apply_and_commit(persistence, review_cycle_id, command, actor, cause)?;

    Ok(EdgeMutationResponse {
        review_cycle_id: review_cycle_id.value(),
        edge_count,
        event_id,
        message: format!(
            "Moved '{}' from reviewing '{}' to reviewing '{}'",
            request.reviewer_id, request.from_reviewee_id, request.to_reviewee_id
        ),
    })
}

/// Lists the reviewers assigned to an employee.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle or employee does not exist.
pub fn get_reviewers(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    employee_id: &str,
) -> Result<ReviewersResponse, ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let id: EmployeeId = require_employee(&roster, employee_id)?;
    let graph: AssignmentGraph = persistence
        .load_graph(review_cycle_id)
        .map_err(translate_persistence_error)?;

    Ok(ReviewersResponse {
        review_cycle_id: review_cycle_id.value(),
        employee_id: id.value().to_string(),
        reviewers: reviewers_of(&graph, &id)
            .iter()
            .map(|reviewer| reviewer.value().to_string())
            .collect(),
    })
}

/// Lists the reviewees an employee must review.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle or employee does not exist.
pub fn get_reviewees(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    employee_id: &str,
) -> Result<RevieweesResponse, ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let id: EmployeeId = require_employee(&roster, employee_id)?;
    let graph: AssignmentGraph = persistence
        .load_graph(review_cycle_id)
        .map_err(translate_persistence_error)?;

    Ok(RevieweesResponse {
        review_cycle_id: review_cycle_id.value(),
        employee_id: id.value().to_string(),
        reviewees: reviewees_of(&graph, &id)
            .iter()
            .map(|reviewee| reviewee.value().to_string())
            .collect(),
    })
}

/// Lists the peers who mutually selected each other with an employee.
///
/// Computed from the submitted selections, not the graph, so it is
/// available before the solver has ever run.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle or employee does not exist.
pub fn get_mutual_selections(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    employee_id: &str,
) -> Result<MutualSelectionsResponse, ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let id: EmployeeId = require_employee(&roster, employee_id)?;
    let selections: PeerSelections = persistence
        .load_selections(review_cycle_id)
        .map_err(translate_persistence_error)?;

    Ok(MutualSelectionsResponse {
        review_cycle_id: review_cycle_id.value(),
        employee_id: id.value().to_string(),
        mutual: mutual_selections(&selections, &id)
            .iter()
            .map(|peer| peer.value().to_string())
            .collect(),
    })
}

/// Computes the per-employee load summary for a cycle.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle does not exist.
pub fn get_load_summary(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
) -> Result<LoadSummaryResponse, ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let graph: AssignmentGraph = persistence
        .load_graph(review_cycle_id)
        .map_err(translate_persistence_error)?;

    let summary: LoadSummary = load_summary(&graph, &roster);
    Ok(LoadSummaryResponse {
        review_cycle_id: review_cycle_id.value(),
        rows: summary
            .rows
            .iter()
            .map(|row| EmployeeLoadInfo {
                employee_id: row.employee_id.value().to_string(),
                in_degree: row.in_degree,
                out_degree: row.out_degree,
            })
            .collect(),
    })
}

/// Replaces a cycle's employee roster, creating the cycle if needed.
///
/// # Errors
///
/// Returns `StructuralInput` if the roster is empty, contains duplicates,
/// or has invalid employee fields.
pub fn put_roster(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: PutRosterRequest,
) -> Result<PutRosterResponse, ApiError> {
    let employees: Vec<Employee> = request
        .employees
        .into_iter()
        .map(|info: EmployeeInfo| {
            Employee::new(
                EmployeeId::new(&info.employee_id),
                info.display_name,
                info.department,
                info.manager_id.as_deref().map(EmployeeId::new),
                info.is_manager,
            )
        })
        .collect();
    let roster: Roster = Roster::new(review_cycle_id, employees);
    validate_roster(&roster).map_err(translate_domain_error)?;

    persistence
        .replace_roster(&roster)
        .map_err(translate_persistence_error)?;

    info!(
        review_cycle_id = review_cycle_id.value(),
        employee_count = roster.len(),
        "roster replaced"
    );

    Ok(PutRosterResponse {
        review_cycle_id: review_cycle_id.value(),
        employee_count: roster.len(),
        message: format!(
            "Stored {} employees for review cycle {}",
            roster.len(),
            review_cycle_id.value()
        ),
    })
}

/// Replaces a cycle's peer selections.
///
/// Resubmitting for a selector overwrites their previous entry. Each
/// selector's choice count is checked against the cycle's
/// `max_peer_selection` cap.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle has no roster yet,
/// `InvariantViolation` if a selector exceeded the selection cap, and
/// `StructuralInput` if a selection references an unknown employee.
pub fn put_selections(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: PutSelectionsRequest,
) -> Result<PutSelectionsResponse, ApiError> {
    let roster: Roster = persistence
        .load_roster(review_cycle_id)
        .map_err(translate_persistence_error)?;
    let capacity: CapacityConfig = persistence
        .load_capacity(review_cycle_id)
        .map_err(translate_persistence_error)?;

    let mut selections: PeerSelections = PeerSelections::new();
    for entry in request.selections {
        let SelectionEntry {
            selector_id,
            choices,
        } = entry;
        let choice_count: u32 = u32::try_from(choices.len()).unwrap_or(u32::MAX);
        if choice_count > capacity.max_peer_selection {
            return Err(ApiError::InvariantViolation {
                rule: String::from("max_peer_selection"),
                message: format!(
                    "'{selector_id}' selected {choice_count} peers; the cap is {}",
                    capacity.max_peer_selection
                ),
            });
        }
        let choice_set: BTreeSet<EmployeeId> = choices
            .iter()
            .map(|choice| EmployeeId::new(choice))
            .collect();
        selections.submit(EmployeeId::new(&selector_id), choice_set);
    }
    validate_selections(&roster, &selections).map_err(translate_domain_error)?;

    persistence
        .replace_selections(review_cycle_id, &selections)
        .map_err(translate_persistence_error)?;

    Ok(PutSelectionsResponse {
        review_cycle_id: review_cycle_id.value(),
        selector_count: selections.len(),
        message: format!(
            "Stored selections from {} employees for review cycle {}",
            selections.len(),
            review_cycle_id.value()
        ),
    })
}

/// Stores a cycle's capacity configuration, creating the cycle if needed.
///
/// # Errors
///
/// Returns `StructuralInput` if the configuration is invalid.
pub fn put_capacity(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    request: &PutCapacityRequest,
) -> Result<PutCapacityResponse, ApiError> {
    let mut capacity: CapacityConfig =
        CapacityConfig::new(request.max_peer_selection, request.max_reviews_allowed);
    capacity.reviewer_load_limit = request.reviewer_load_limit;
    capacity.department_cap = request.department_cap;
    capacity.forbid_manager_pairs = request.forbid_manager_pairs;
    capacity.validate().map_err(translate_domain_error)?;

    persistence
        .save_capacity(review_cycle_id, &capacity)
        .map_err(translate_persistence_error)?;

    Ok(PutCapacityResponse {
        review_cycle_id: review_cycle_id.value(),
        message: format!(
            "Stored capacity configuration for review cycle {}",
            review_cycle_id.value()
        ),
    })
}

/// Deletes a review cycle: roster, selections, and graph.
///
/// The cycle's audit timeline is retained, and the deletion itself is
/// recorded as a final event on that timeline.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the cycle does not exist.
pub fn remove_cycle(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
    actor: Actor,
    cause: Cause,
) -> Result<RemoveCycleResponse, ApiError> {
    let graph: AssignmentGraph = persistence
        .load_graph(review_cycle_id)
        .map_err(translate_persistence_error)?;

    persistence
        .delete_cycle(review_cycle_id)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from("RemoveCycle"), None),
        graph.to_snapshot(),
        StateSnapshot::new(String::from("deleted")),
        review_cycle_id,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    info!(review_cycle_id = review_cycle_id.value(), "cycle removed");

    Ok(RemoveCycleResponse {
        review_cycle_id: review_cycle_id.value(),
        message: format!("Removed review cycle {}", review_cycle_id.value()),
    })
}

/// Retrieves the ordered audit timeline for a cycle.
///
/// The timeline remains readable after the cycle itself is deleted.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    review_cycle_id: ReviewCycleId,
) -> Result<AuditTimelineResponse, ApiError> {
    let events: Vec<AuditEventInfo> = persistence
        .audit_timeline(review_cycle_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|event| AuditEventInfo {
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            cause_id: event.cause.id,
            cause_description: event.cause.description,
            action: event.action.name,
            details: event.action.details,
            before: event.before.data,
            after: event.after.data,
        })
        .collect();

    Ok(AuditTimelineResponse {
        review_cycle_id: review_cycle_id.value(),
        events,
    })
}
