// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use peer_pair_audit::{Actor, Cause};
use peer_pair_domain::{
    CapacityConfig, Employee, EmployeeId, PeerSelections, ReviewCycleId, Roster,
};
use std::collections::BTreeSet;

pub const TEST_CYCLE: ReviewCycleId = ReviewCycleId::new(1);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-123"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn id(value: &str) -> EmployeeId {
    EmployeeId::new(value)
}

pub fn create_test_employee(employee_id: &str, department: &str, manager: Option<&str>) -> Employee {
    Employee::new(
        EmployeeId::new(employee_id),
        format!("Employee {employee_id}"),
        String::from(department),
        manager.map(EmployeeId::new),
        manager.is_none(),
    )
}

/// A roster where every employee is in the same department with no managers.
pub fn create_flat_roster(ids: &[&str]) -> Roster {
    Roster::new(
        TEST_CYCLE,
        ids.iter()
            .map(|employee_id| create_test_employee(employee_id, "Engineering", None))
            .collect(),
    )
}

pub fn create_test_selections(entries: &[(&str, &[&str])]) -> PeerSelections {
    let mut selections: PeerSelections = PeerSelections::new();
    for (selector, choices) in entries {
        let choice_set: BTreeSet<EmployeeId> =
            choices.iter().map(|choice| EmployeeId::new(choice)).collect();
        selections.submit(EmployeeId::new(selector), choice_set);
    }
    selections
}

pub fn create_test_capacity(max_reviews_allowed: u32) -> CapacityConfig {
    CapacityConfig::new(5, max_reviews_allowed)
}
