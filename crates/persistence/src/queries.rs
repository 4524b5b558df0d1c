// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side persistence operations.
//!
//! Rows that were written in a meaningful order (roster, edges) are read
//! back ordered by their rowid so reconstruction preserves it.

use diesel::SqliteConnection;
use diesel::prelude::*;
use peer_pair::AssignmentGraph;
use peer_pair_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use peer_pair_domain::{
    AssignmentEdge, CapacityConfig, EdgeOrigin, Employee, EmployeeId, PeerSelections,
    ReviewCycleId, Roster,
};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::{
    assignment_edges, audit_events, employees, peer_selections, review_cycles,
};
use crate::error::PersistenceError;

/// Diesel Queryable struct for capacity columns on the cycle row.
#[derive(Queryable)]
struct CapacityRow {
    max_peer_selection: i32,
    max_reviews_allowed: i32,
    reviewer_load_limit: Option<i32>,
    department_cap: Option<i32>,
    forbid_manager_pairs: i32,
}

/// Diesel Queryable struct for employee rows.
#[derive(Queryable)]
struct EmployeeRow {
    employee_id: String,
    display_name: String,
    department: String,
    manager_id: Option<String>,
    is_manager: i32,
}

/// Diesel Queryable struct for assignment edge rows.
#[derive(Queryable)]
struct EdgeRow {
    reviewer_id: String,
    reviewee_id: String,
    origin: String,
}

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable)]
struct AuditEventRow {
    review_cycle_id: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

fn from_db_u32(value: i32, field: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::CorruptRecord(format!("{field} out of range: {value}")))
}

/// Checks whether a review cycle row exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cycle_exists(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<bool, PersistenceError> {
    let count: i64 = review_cycles::table
        .filter(review_cycles::review_cycle_id.eq(review_cycle_id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists all stored review cycles in ascending id order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_cycles(conn: &mut SqliteConnection) -> Result<Vec<ReviewCycleId>, PersistenceError> {
    let ids: Vec<i64> = review_cycles::table
        .select(review_cycles::review_cycle_id)
        .order(review_cycles::review_cycle_id.asc())
        .load::<i64>(conn)?;
    Ok(ids.into_iter().map(ReviewCycleId::new).collect())
}

/// Loads the capacity configuration for a cycle.
///
/// # Errors
///
/// Returns `CycleNotFound` if the cycle does not exist, or `CorruptRecord`
/// if stored values cannot be reconstructed.
pub fn load_capacity(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<CapacityConfig, PersistenceError> {
    let result = review_cycles::table
        .filter(review_cycles::review_cycle_id.eq(review_cycle_id.value()))
        .select((
            review_cycles::max_peer_selection,
            review_cycles::max_reviews_allowed,
            review_cycles::reviewer_load_limit,
            review_cycles::department_cap,
            review_cycles::forbid_manager_pairs,
        ))
        .first::<CapacityRow>(conn);

    let row: CapacityRow = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::CycleNotFound(review_cycle_id.value()));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    let reviewer_load_limit: Option<u32> = match row.reviewer_load_limit {
        Some(limit) => Some(from_db_u32(limit, "reviewer_load_limit")?),
        None => None,
    };
    let department_cap: Option<u32> = match row.department_cap {
        Some(cap) => Some(from_db_u32(cap, "department_cap")?),
        None => None,
    };

    Ok(CapacityConfig {
        max_peer_selection: from_db_u32(row.max_peer_selection, "max_peer_selection")?,
        max_reviews_allowed: from_db_u32(row.max_reviews_allowed, "max_reviews_allowed")?,
        reviewer_load_limit,
        department_cap,
        forbid_manager_pairs: row.forbid_manager_pairs != 0,
    })
}

/// Loads the stored roster for a cycle, in directory order.
///
/// # Errors
///
/// Returns `CycleNotFound` if the cycle does not exist.
pub fn load_roster(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<Roster, PersistenceError> {
    if !cycle_exists(conn, review_cycle_id)? {
        return Err(PersistenceError::CycleNotFound(review_cycle_id.value()));
    }

    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::review_cycle_id.eq(review_cycle_id.value()))
        .order(employees::id.asc())
        .select((
            employees::employee_id,
            employees::display_name,
            employees::department,
            employees::manager_id,
            employees::is_manager,
        ))
        .load::<EmployeeRow>(conn)?;

    let roster_employees: Vec<Employee> = rows
        .into_iter()
        .map(|row| {
            Employee::new(
                EmployeeId::new(&row.employee_id),
                row.display_name,
                row.department,
                row.manager_id.as_deref().map(EmployeeId::new),
                row.is_manager != 0,
            )
        })
        .collect();

    Ok(Roster::new(review_cycle_id, roster_employees))
}

/// Loads the stored peer selections for a cycle.
///
/// # Errors
///
/// Returns `CycleNotFound` if the cycle does not exist.
pub fn load_selections(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<PeerSelections, PersistenceError> {
    if !cycle_exists(conn, review_cycle_id)? {
        return Err(PersistenceError::CycleNotFound(review_cycle_id.value()));
    }

    let rows: Vec<(String, String)> = peer_selections::table
        .filter(peer_selections::review_cycle_id.eq(review_cycle_id.value()))
        .select((peer_selections::selector_id, peer_selections::choice_id))
        .load::<(String, String)>(conn)?;

    let mut grouped: BTreeMap<EmployeeId, BTreeSet<EmployeeId>> = BTreeMap::new();
    for (selector_id, choice_id) in rows {
        grouped
            .entry(EmployeeId::new(&selector_id))
            .or_default()
            .insert(EmployeeId::new(&choice_id));
    }

    Ok(grouped.into_iter().collect())
}

/// Loads the stored assignment graph for a cycle, edges in stored order.
///
/// # Errors
///
/// Returns `CycleNotFound` if the cycle does not exist, or `CorruptRecord`
/// if the stored edges violate graph structure.
pub fn load_graph(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<AssignmentGraph, PersistenceError> {
    if !cycle_exists(conn, review_cycle_id)? {
        return Err(PersistenceError::CycleNotFound(review_cycle_id.value()));
    }

    let rows: Vec<EdgeRow> = assignment_edges::table
        .filter(assignment_edges::review_cycle_id.eq(review_cycle_id.value()))
        .order(assignment_edges::id.asc())
        .select((
            assignment_edges::reviewer_id,
            assignment_edges::reviewee_id,
            assignment_edges::origin,
        ))
        .load::<EdgeRow>(conn)?;

    let mut edges: Vec<AssignmentEdge> = Vec::with_capacity(rows.len());
    for row in rows {
        let origin: EdgeOrigin = EdgeOrigin::from_str(&row.origin)
            .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
        edges.push(AssignmentEdge::new(
            EmployeeId::new(&row.reviewer_id),
            EmployeeId::new(&row.reviewee_id),
            origin,
        ));
    }

    AssignmentGraph::from_edges(review_cycle_id, edges)
        .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

fn row_to_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    Ok(AuditEvent::new(
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        ReviewCycleId::new(row.review_cycle_id),
    ))
}

/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select((
            audit_events::review_cycle_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .first::<AuditEventRow>(conn);

    let row: AuditEventRow = match result {
        Ok(row) => row,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::EventNotFound(event_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_event(row)
}

/// Retrieves the ordered audit event timeline for a cycle.
///
/// The timeline is readable even for cycles that have since been deleted.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `review_cycle_id` - The cycle scope
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn audit_timeline(
    conn: &mut SqliteConnection,
    review_cycle_id: ReviewCycleId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::review_cycle_id.eq(review_cycle_id.value()))
        .order(audit_events::event_id.asc())
        .select((
            audit_events::review_cycle_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(row_to_event).collect()
}
