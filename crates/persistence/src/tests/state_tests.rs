// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for stored cycle state: roster, selections, capacity, and graph.

use crate::tests::{TEST_CYCLE, create_test_roster, id};
use crate::{Persistence, PersistenceError};
use peer_pair::AssignmentGraph;
use peer_pair_domain::{
    AssignmentEdge, CapacityConfig, EdgeOrigin, Employee, EmployeeId, PeerSelections, Roster,
};
use std::collections::BTreeSet;

fn edge(reviewer: &str, reviewee: &str, origin: EdgeOrigin) -> AssignmentEdge {
    AssignmentEdge::new(id(reviewer), id(reviewee), origin)
}

#[test]
fn test_roster_round_trips_in_directory_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let roster: Roster = Roster::new(
        TEST_CYCLE,
        vec![
            Employee::new(
                id("emp-2"),
                String::from("Zoe"),
                String::from("Sales"),
                Some(id("emp-1")),
                false,
            ),
            Employee::new(
                id("emp-1"),
                String::from("Ada"),
                String::from("Engineering"),
                None,
                true,
            ),
        ],
    );

    persistence.replace_roster(&roster).unwrap();
    let loaded: Roster = persistence.load_roster(TEST_CYCLE).unwrap();

    // Stored order is supplied order, not sorted order.
    assert_eq!(loaded.employees()[0].employee_id, id("emp-2"));
    assert_eq!(loaded.employees()[0].manager_id, Some(id("emp-1")));
    assert_eq!(loaded.employees()[1].employee_id, id("emp-1"));
    assert!(loaded.employees()[1].is_manager);
}

#[test]
fn test_replace_roster_overwrites_previous_roster() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence
        .replace_roster(&create_test_roster(&["emp-1", "emp-2", "emp-3"]))
        .unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-4"]))
        .unwrap();

    let loaded: Roster = persistence.load_roster(TEST_CYCLE).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains(&id("emp-4")));
}

#[test]
fn test_load_roster_for_missing_cycle_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.load_roster(TEST_CYCLE);
    assert_eq!(result, Err(PersistenceError::CycleNotFound(1)));
}

#[test]
fn test_selections_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1", "emp-2", "emp-3"]))
        .unwrap();

    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-1"), BTreeSet::from([id("emp-2"), id("emp-3")]));
    selections.submit(id("emp-2"), BTreeSet::from([id("emp-1")]));

    persistence
        .replace_selections(TEST_CYCLE, &selections)
        .unwrap();
    let loaded: PeerSelections = persistence.load_selections(TEST_CYCLE).unwrap();

    assert_eq!(loaded, selections);
    assert!(loaded.is_mutual(&id("emp-1"), &id("emp-2")));
}

#[test]
fn test_capacity_round_trips_with_optional_rules() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut capacity: CapacityConfig = CapacityConfig::new(5, 3);
    capacity.reviewer_load_limit = Some(4);
    capacity.department_cap = Some(2);
    capacity.forbid_manager_pairs = true;

    persistence.save_capacity(TEST_CYCLE, &capacity).unwrap();
    let loaded: CapacityConfig = persistence.load_capacity(TEST_CYCLE).unwrap();

    assert_eq!(loaded, capacity);
}

#[test]
fn test_capacity_defaults_apply_to_fresh_cycles() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1"]))
        .unwrap();

    let loaded: CapacityConfig = persistence.load_capacity(TEST_CYCLE).unwrap();

    assert_eq!(loaded.max_peer_selection, 5);
    assert_eq!(loaded.max_reviews_allowed, 3);
    assert_eq!(loaded.reviewer_load_limit, None);
    assert_eq!(loaded.department_cap, None);
    assert!(!loaded.forbid_manager_pairs);
}

#[test]
fn test_graph_round_trips_with_edge_order_and_origin() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let graph: AssignmentGraph = AssignmentGraph::from_edges(
        TEST_CYCLE,
        vec![
            edge("emp-2", "emp-1", EdgeOrigin::Auto),
            edge("emp-3", "emp-1", EdgeOrigin::Manual),
            edge("emp-1", "emp-2", EdgeOrigin::Auto),
        ],
    )
    .unwrap();

    persistence.save_graph(&graph).unwrap();
    let loaded: AssignmentGraph = persistence.load_graph(TEST_CYCLE).unwrap();

    assert_eq!(loaded, graph);
    let pairs: Vec<(&str, &str)> = loaded
        .edges()
        .iter()
        .map(|e| (e.reviewer_id.value(), e.reviewee_id.value()))
        .collect();
    assert_eq!(
        pairs,
        vec![("emp-2", "emp-1"), ("emp-3", "emp-1"), ("emp-1", "emp-2")]
    );
    assert!(loaded.edges()[1].is_manual());
}

#[test]
fn test_save_graph_replaces_previous_graph() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first: AssignmentGraph = AssignmentGraph::from_edges(
        TEST_CYCLE,
        vec![
            edge("emp-1", "emp-2", EdgeOrigin::Auto),
            edge("emp-2", "emp-1", EdgeOrigin::Auto),
        ],
    )
    .unwrap();
    let second: AssignmentGraph = AssignmentGraph::from_edges(
        TEST_CYCLE,
        vec![edge("emp-3", "emp-1", EdgeOrigin::Manual)],
    )
    .unwrap();

    persistence.save_graph(&first).unwrap();
    persistence.save_graph(&second).unwrap();

    let loaded: AssignmentGraph = persistence.load_graph(TEST_CYCLE).unwrap();
    assert_eq!(loaded, second);
}

#[test]
fn test_load_graph_is_empty_for_unsolved_cycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1"]))
        .unwrap();

    let loaded: AssignmentGraph = persistence.load_graph(TEST_CYCLE).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_delete_cycle_removes_state() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1", "emp-2"]))
        .unwrap();
    let graph: AssignmentGraph = AssignmentGraph::from_edges(
        TEST_CYCLE,
        vec![edge("emp-1", "emp-2", EdgeOrigin::Auto)],
    )
    .unwrap();
    persistence.save_graph(&graph).unwrap();

    persistence.delete_cycle(TEST_CYCLE).unwrap();

    assert!(!persistence.cycle_exists(TEST_CYCLE).unwrap());
    assert_eq!(
        persistence.load_graph(TEST_CYCLE),
        Err(PersistenceError::CycleNotFound(1))
    );
}

#[test]
fn test_delete_missing_cycle_fails() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence.delete_cycle(TEST_CYCLE),
        Err(PersistenceError::CycleNotFound(1))
    );
}

/// Stored selector ids are reconstructed through the domain type, which
/// trims; this guards against raw-row leakage.
#[test]
fn test_loaded_ids_are_domain_values() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .replace_roster(&create_test_roster(&["emp-1", "emp-2"]))
        .unwrap();

    let loaded: Roster = persistence.load_roster(TEST_CYCLE).unwrap();
    let ids: Vec<EmployeeId> = loaded
        .employees()
        .iter()
        .map(|e| e.employee_id.clone())
        .collect();
    assert_eq!(ids, vec![id("emp-1"), id("emp-2")]);
}
