// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for audit event persistence and the cycle timeline.

use crate::tests::{TEST_CYCLE, create_test_actor, create_test_cause, create_test_roster, id};
use crate::{Persistence, PersistenceError};
use peer_pair::{AssignmentGraph, Command, TransitionResult, apply};
use peer_pair_audit::{Action, AuditEvent, StateSnapshot};
use peer_pair_domain::CapacityConfig;

fn test_event(action_name: &str) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(action_name), None),
        StateSnapshot::new(String::from("review_cycle=1,edges=0,manual_edges=0")),
        StateSnapshot::new(String::from("review_cycle=1,edges=1,manual_edges=1")),
        TEST_CYCLE,
    )
}

#[test]
fn test_persist_and_retrieve_audit_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let event: AuditEvent = test_event("AddEdge");
    let event_id: i64 = persistence.persist_audit_event(&event).unwrap();

    assert!(event_id > 0);
    let loaded: AuditEvent = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(loaded, event);
}

#[test]
fn test_get_missing_audit_event_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence.get_audit_event(42),
        Err(PersistenceError::EventNotFound(42))
    );
}

#[test]
fn test_audit_timeline_is_ordered() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence.persist_audit_event(&test_event("RunAutoPairing")).unwrap();
    persistence.persist_audit_event(&test_event("AddEdge")).unwrap();
    persistence.persist_audit_event(&test_event("RemoveEdge")).unwrap();

    let timeline: Vec<AuditEvent> = persistence.audit_timeline(TEST_CYCLE).unwrap();
    let names: Vec<&str> = timeline
        .iter()
        .map(|event| event.action.name.as_str())
        .collect();
    assert_eq!(names, vec!["RunAutoPairing", "AddEdge", "RemoveEdge"]);
}

#[test]
fn test_persist_transition_commits_graph_and_event_together() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let roster = create_test_roster(&["emp-1", "emp-2"]);
    persistence.replace_roster(&roster).unwrap();

    let result: TransitionResult = apply(
        &AssignmentGraph::new(TEST_CYCLE),
        &roster,
        &CapacityConfig::new(5, 3),
        Command::AddEdge {
            reviewer_id: id("emp-1"),
            reviewee_id: id("emp-2"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let event_id: i64 = persistence.persist_transition(&result).unwrap();

    let loaded_graph: AssignmentGraph = persistence.load_graph(TEST_CYCLE).unwrap();
    assert_eq!(loaded_graph, result.new_graph);
    let loaded_event: AuditEvent = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(loaded_event.action.name, "AddEdge");
}

#[test]
fn test_audit_trail_survives_cycle_deletion() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1", "emp-2"]))
        .unwrap();
    persistence.persist_audit_event(&test_event("AddEdge")).unwrap();

    persistence.delete_cycle(TEST_CYCLE).unwrap();

    let timeline: Vec<AuditEvent> = persistence.audit_timeline(TEST_CYCLE).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "AddEdge");
}
