// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod audit_tests;
mod state_tests;

use peer_pair_audit::{Actor, Cause};
use peer_pair_domain::{Employee, EmployeeId, ReviewCycleId, Roster};

pub const TEST_CYCLE: ReviewCycleId = ReviewCycleId::new(1);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn id(value: &str) -> EmployeeId {
    EmployeeId::new(value)
}

pub fn create_test_roster(ids: &[&str]) -> Roster {
    Roster::new(
        TEST_CYCLE,
        ids.iter()
            .map(|employee_id| {
                Employee::new(
                    EmployeeId::new(employee_id),
                    format!("Employee {employee_id}"),
                    String::from("Engineering"),
                    None,
                    false,
                )
            })
            .collect(),
    )
}
