// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Employee, EmployeeId, EdgeOrigin, ReviewCycleId, Roster};
use std::str::FromStr;

fn create_test_employee(id: &str, department: &str, manager: Option<&str>) -> Employee {
    Employee::new(
        EmployeeId::new(id),
        format!("Employee {id}"),
        String::from(department),
        manager.map(EmployeeId::new),
        false,
    )
}

#[test]
fn test_employee_id_trims_whitespace() {
    let id: EmployeeId = EmployeeId::new("  emp-1  ");

    assert_eq!(id.value(), "emp-1");
}

#[test]
fn test_employee_ids_compare_by_value() {
    let a: EmployeeId = EmployeeId::new("emp-1");
    let b: EmployeeId = EmployeeId::new("emp-1");
    let c: EmployeeId = EmployeeId::new("emp-2");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a < c);
}

#[test]
fn test_review_cycle_id_round_trip() {
    let cycle: ReviewCycleId = ReviewCycleId::new(42);

    assert_eq!(cycle.value(), 42);
    assert_eq!(cycle.to_string(), "42");
}

#[test]
fn test_edge_origin_string_round_trip() {
    assert_eq!(EdgeOrigin::Auto.as_str(), "auto");
    assert_eq!(EdgeOrigin::Manual.as_str(), "manual");
    assert_eq!(EdgeOrigin::from_str("auto").unwrap(), EdgeOrigin::Auto);
    assert_eq!(EdgeOrigin::from_str("manual").unwrap(), EdgeOrigin::Manual);
    assert!(EdgeOrigin::from_str("robot").is_err());
}

#[test]
fn test_roster_lookup_by_id() {
    let roster: Roster = Roster::new(
        ReviewCycleId::new(1),
        vec![
            create_test_employee("emp-1", "Engineering", None),
            create_test_employee("emp-2", "Sales", None),
        ],
    );

    assert_eq!(roster.len(), 2);
    assert!(roster.contains(&EmployeeId::new("emp-1")));
    assert!(!roster.contains(&EmployeeId::new("emp-3")));
    assert_eq!(
        roster.department_of(&EmployeeId::new("emp-2")),
        Some("Sales")
    );
}

#[test]
fn test_roster_preserves_directory_order() {
    let roster: Roster = Roster::new(
        ReviewCycleId::new(1),
        vec![
            create_test_employee("emp-3", "Engineering", None),
            create_test_employee("emp-1", "Engineering", None),
            create_test_employee("emp-2", "Engineering", None),
        ],
    );

    let ids: Vec<&str> = roster
        .employees()
        .iter()
        .map(|employee| employee.employee_id.value())
        .collect();
    assert_eq!(ids, vec!["emp-3", "emp-1", "emp-2"]);
}

#[test]
fn test_roster_direct_manager_detection() {
    let roster: Roster = Roster::new(
        ReviewCycleId::new(1),
        vec![
            create_test_employee("mgr-1", "Engineering", None),
            create_test_employee("emp-1", "Engineering", Some("mgr-1")),
            create_test_employee("emp-2", "Engineering", None),
        ],
    );

    assert!(roster.is_manager_of(&EmployeeId::new("mgr-1"), &EmployeeId::new("emp-1")));
    assert!(!roster.is_manager_of(&EmployeeId::new("mgr-1"), &EmployeeId::new("emp-2")));
    assert!(!roster.is_manager_of(&EmployeeId::new("emp-1"), &EmployeeId::new("mgr-1")));
}
