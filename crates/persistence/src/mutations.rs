// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side persistence operations.
//!
//! All multi-row writes run inside a transaction: a cycle's stored roster,
//! selections, and graph are each replaced wholesale, never patched row by
//! row. Audit events are insert-only.

use diesel::prelude::*;
use diesel::SqliteConnection;
use peer_pair::{AssignmentGraph, TransitionResult};
use peer_pair_audit::AuditEvent;
use peer_pair_domain::{CapacityConfig, PeerSelections, ReviewCycleId, Roster};
use tracing::debug;

use crate::backend;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Converts a capacity value for storage.
fn to_db_int(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::QueryFailed(format!("value out of range: {value}")))
}

/// Ensures a review cycle row exists.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn upsert_cycle(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<(), PersistenceError> {
    diesel::insert_into(diesel_schema::review_cycles::table)
        .values(diesel_schema::review_cycles::review_cycle_id.eq(review_cycle_id.value()))
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(())
}

/// Stores the capacity configuration for a cycle, creating the cycle row if
/// needed.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `review_cycle_id` - The cycle to configure
/// * `capacity` - The configuration to store
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_capacity(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
    capacity: &CapacityConfig,
) -> Result<(), PersistenceError> {
    let reviewer_load_limit: Option<i32> = match capacity.reviewer_load_limit {
        Some(limit) => Some(to_db_int(limit)?),
        None => None,
    };
    let department_cap: Option<i32> = match capacity.department_cap {
        Some(cap) => Some(to_db_int(cap)?),
        None => None,
    };

    conn.transaction::<_, PersistenceError, _>(|conn| {
        upsert_cycle(conn, review_cycle_id)?;
        diesel::update(
            diesel_schema::review_cycles::table.filter(
                diesel_schema::review_cycles::review_cycle_id.eq(review_cycle_id.value()),
            ),
        )
        .set((
            diesel_schema::review_cycles::max_peer_selection
                .eq(to_db_int(capacity.max_peer_selection)?),
            diesel_schema::review_cycles::max_reviews_allowed
                .eq(to_db_int(capacity.max_reviews_allowed)?),
            diesel_schema::review_cycles::reviewer_load_limit.eq(reviewer_load_limit),
            diesel_schema::review_cycles::department_cap.eq(department_cap),
            diesel_schema::review_cycles::forbid_manager_pairs
                .eq(i32::from(capacity.forbid_manager_pairs)),
        ))
        .execute(conn)?;
        Ok(())
    })
}

/// Replaces the stored roster for a cycle.
///
/// Rows are inserted in directory order so reads reconstruct the roster in
/// the order it was supplied.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `roster` - The roster to store
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn replace_roster(
    conn: &mut SqliteConnection,
    roster: &Roster,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        upsert_cycle(conn, roster.review_cycle_id())?;
        diesel::delete(
            diesel_schema::employees::table.filter(
                diesel_schema::employees::review_cycle_id.eq(roster.review_cycle_id().value()),
            ),
        )
        .execute(conn)?;

        for employee in roster.employees() {
            diesel::insert_into(diesel_schema::employees::table)
                .values((
                    diesel_schema::employees::review_cycle_id
                        .eq(roster.review_cycle_id().value()),
                    diesel_schema::employees::employee_id.eq(employee.employee_id.value()),
                    diesel_schema::employees::display_name.eq(&employee.display_name),
                    diesel_schema::employees::department.eq(&employee.department),
                    diesel_schema::employees::manager_id
                        .eq(employee.manager_id.as_ref().map(|id| id.value().to_string())),
                    diesel_schema::employees::is_manager.eq(i32::from(employee.is_manager)),
                ))
                .execute(conn)?;
        }

        debug!(
            review_cycle_id = roster.review_cycle_id().value(),
            employees = roster.len(),
            "Replaced roster"
        );
        Ok(())
    })
}

/// Replaces the stored peer selections for a cycle.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `review_cycle_id` - The cycle scope
/// * `selections` - The selections to store
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn replace_selections(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
    selections: &PeerSelections,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        upsert_cycle(conn, review_cycle_id)?;
        diesel::delete(
            diesel_schema::peer_selections::table.filter(
                diesel_schema::peer_selections::review_cycle_id.eq(review_cycle_id.value()),
            ),
        )
        .execute(conn)?;

        for (selector_id, choices) in selections.iter() {
            for choice_id in choices {
                diesel::insert_into(diesel_schema::peer_selections::table)
                    .values((
                        diesel_schema::peer_selections::review_cycle_id
                            .eq(review_cycle_id.value()),
                        diesel_schema::peer_selections::selector_id.eq(selector_id.value()),
                        diesel_schema::peer_selections::choice_id.eq(choice_id.value()),
                    ))
                    .execute(conn)?;
            }
        }
        Ok(())
    })
}

/// Replaces the stored assignment graph for a cycle.
///
/// Edges are inserted in graph order so reads reconstruct the graph with
/// its insertion order intact.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `graph` - The graph to store
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_graph(
    conn: &mut SqliteConnection,
    graph: &AssignmentGraph,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        upsert_cycle(conn, graph.review_cycle_id())?;
        diesel::delete(
            diesel_schema::assignment_edges::table.filter(
                diesel_schema::assignment_edges::review_cycle_id
                    .eq(graph.review_cycle_id().value()),
            ),
        )
        .execute(conn)?;

        for edge in graph.edges() {
            diesel::insert_into(diesel_schema::assignment_edges::table)
                .values((
                    diesel_schema::assignment_edges::review_cycle_id
                        .eq(graph.review_cycle_id().value()),
                    diesel_schema::assignment_edges::reviewer_id.eq(edge.reviewer_id.value()),
                    diesel_schema::assignment_edges::reviewee_id.eq(edge.reviewee_id.value()),
                    diesel_schema::assignment_edges::origin.eq(edge.origin.as_str()),
                ))
                .execute(conn)?;
        }

        debug!(
            review_cycle_id = graph.review_cycle_id().value(),
            edges = graph.len(),
            "Saved assignment graph"
        );
        Ok(())
    })
}

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };
    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };
    let before_data: StateSnapshotData = StateSnapshotData {
        data: event.before.data.clone(),
    };
    let after_data: StateSnapshotData = StateSnapshotData {
        data: event.after.data.clone(),
    };

    let actor_json: String = serde_json::to_string(&actor_data)?;
    let cause_json: String = serde_json::to_string(&cause_data)?;
    let action_json: String = serde_json::to_string(&action_data)?;
    let before_json: String = serde_json::to_string(&before_data)?;
    let after_json: String = serde_json::to_string(&after_data)?;

    diesel::insert_into(diesel_schema::audit_events::table)
        .values((
            diesel_schema::audit_events::review_cycle_id.eq(event.review_cycle_id.value()),
            diesel_schema::audit_events::actor_json.eq(actor_json),
            diesel_schema::audit_events::cause_json.eq(cause_json),
            diesel_schema::audit_events::action_json.eq(action_json),
            diesel_schema::audit_events::before_snapshot_json.eq(before_json),
            diesel_schema::audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = backend::get_last_insert_rowid(conn)?;
    Ok(event_id)
}

/// Persists a manual-adjustment transition: the new graph and its audit
/// event commit together or not at all.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The event ID assigned to the audit event.
///
/// # Errors
///
/// Returns an error if persistence fails; nothing is written on failure.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        save_graph(conn, &result.new_graph)?;
        persist_audit_event(conn, &result.audit_event)
    })
}

/// Deletes a review cycle and its roster, selections, and graph.
///
/// Audit events are retained: the trail of a deleted cycle stays readable.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `review_cycle_id` - The cycle to delete
///
/// # Errors
///
/// Returns `CycleNotFound` if no such cycle exists.
pub fn delete_cycle(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        diesel_schema::review_cycles::table.filter(
            diesel_schema::review_cycles::review_cycle_id.eq(review_cycle_id.value()),
        ),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::CycleNotFound(review_cycle_id.value()));
    }
    debug!(
        review_cycle_id = review_cycle_id.value(),
        "Deleted review cycle"
    );
    Ok(())
}
