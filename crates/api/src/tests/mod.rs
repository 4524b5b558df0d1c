// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use crate::request_response::{
    EmployeeInfo, PutCapacityRequest, PutRosterRequest, PutSelectionsRequest, SelectionEntry,
};
use crate::{put_capacity, put_roster, put_selections};
use peer_pair_audit::{Actor, Cause};
use peer_pair_domain::ReviewCycleId;
use peer_pair_persistence::Persistence;

pub const TEST_CYCLE: ReviewCycleId = ReviewCycleId::new(1);

pub fn test_actor() -> Actor {
    Actor::new(String::from("hr-123"), String::from("operator"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn employee(employee_id: &str) -> EmployeeInfo {
    EmployeeInfo {
        employee_id: String::from(employee_id),
        display_name: format!("Employee {employee_id}"),
        department: String::from("Engineering"),
        manager_id: None,
        is_manager: false,
    }
}

pub fn selection(selector_id: &str, choices: &[&str]) -> SelectionEntry {
    SelectionEntry {
        selector_id: String::from(selector_id),
        choices: choices.iter().map(|c| String::from(*c)).collect(),
    }
}

pub fn capacity_request(max_reviews_allowed: u32) -> PutCapacityRequest {
    PutCapacityRequest {
        max_peer_selection: 5,
        max_reviews_allowed,
        reviewer_load_limit: None,
        department_cap: None,
        forbid_manager_pairs: false,
    }
}

/// Seeds a four-employee cycle where every selection is mutual or
/// reciprocated: a→{b,c}, b→{a,d}, c→{a}, d→{b}, target K=2.
pub fn seed_four_employee_cycle(persistence: &mut Persistence) {
    put_roster(
        persistence,
        TEST_CYCLE,
        PutRosterRequest {
            employees: vec![
                employee("emp-a"),
                employee("emp-b"),
                employee("emp-c"),
                employee("emp-d"),
            ],
        },
    )
    .unwrap();
    put_capacity(persistence, TEST_CYCLE, &capacity_request(2)).unwrap();
    put_selections(
        persistence,
        TEST_CYCLE,
        PutSelectionsRequest {
            selections: vec![
                selection("emp-a", &["emp-b", "emp-c"]),
                selection("emp-b", &["emp-a", "emp-d"]),
                selection("emp-c", &["emp-a"]),
                selection("emp-d", &["emp-b"]),
            ],
        },
    )
    .unwrap();
}
