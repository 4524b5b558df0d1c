// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EmployeeId;

/// Errors that can occur during domain validation.
///
/// Structural kinds (`EmptyCycle`, `InvalidCapacity`, roster errors) mean the
/// input itself is malformed and the operation refuses to run. Invariant
/// kinds (`SelfAssignment` through `EdgeNotFound`) mean a requested graph
/// change would break a rule and is rejected wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The review cycle has no employees.
    EmptyCycle,
    /// A capacity configuration field has an impossible value.
    InvalidCapacity {
        /// The configuration field.
        field: &'static str,
        /// The invalid value.
        value: u32,
    },
    /// An employee identifier is empty or invalid.
    InvalidEmployeeId(String),
    /// An employee's display name is empty.
    InvalidDisplayName {
        /// The employee with the invalid name.
        employee_id: EmployeeId,
    },
    /// The same employee appears twice on a roster.
    DuplicateEmployee {
        /// The duplicated identifier.
        employee_id: EmployeeId,
    },
    /// An identifier refers to an employee not on the cycle's roster.
    UnknownEmployee {
        /// The unknown identifier.
        employee_id: EmployeeId,
    },
    /// An edge origin string is not recognized.
    InvalidEdgeOrigin(String),
    /// An employee cannot review themselves.
    SelfAssignment {
        /// The employee in question.
        employee_id: EmployeeId,
    },
    /// The ordered reviewer → reviewee pair already exists in the cycle.
    DuplicateEdge {
        /// The reviewer.
        reviewer_id: EmployeeId,
        /// The reviewee.
        reviewee_id: EmployeeId,
    },
    /// The reviewee already has the maximum number of reviewers.
    ReviewerCapacityExceeded {
        /// The reviewee at capacity.
        reviewee_id: EmployeeId,
        /// The reviewee's current reviewer count.
        current: u32,
        /// The configured ceiling.
        max: u32,
    },
    /// The reviewer already owes the maximum number of reviews.
    ReviewerLoadExceeded {
        /// The reviewer at their load limit.
        reviewer_id: EmployeeId,
        /// The reviewer's current outbound count.
        current: u32,
        /// The configured ceiling.
        max: u32,
    },
    /// Too many of the reviewee's reviewers come from their own department.
    DepartmentCapExceeded {
        /// The reviewee in question.
        reviewee_id: EmployeeId,
        /// The saturated department.
        department: String,
        /// The current same-department reviewer count.
        current: u32,
        /// The configured ceiling.
        max: u32,
    },
    /// Manager/direct-subordinate pairings are disallowed by policy.
    ManagerSubordinateDisallowed {
        /// The manager in the pair.
        manager_id: EmployeeId,
        /// The direct subordinate in the pair.
        subordinate_id: EmployeeId,
    },
    /// The requested edge does not exist in the cycle.
    EdgeNotFound {
        /// The reviewer.
        reviewer_id: EmployeeId,
        /// The reviewee.
        reviewee_id: EmployeeId,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCycle => {
                write!(f, "Review cycle has no employees")
            }
            Self::InvalidCapacity { field, value } => {
                write!(f, "Invalid capacity configuration: {field} = {value}")
            }
            Self::InvalidEmployeeId(msg) => write!(f, "Invalid employee identifier: {msg}"),
            Self::InvalidDisplayName { employee_id } => {
                write!(f, "Employee '{employee_id}' has an empty display name")
            }
            Self::DuplicateEmployee { employee_id } => {
                write!(f, "Employee '{employee_id}' appears twice on the roster")
            }
            Self::UnknownEmployee { employee_id } => {
                write!(f, "Employee '{employee_id}' is not on the cycle roster")
            }
            Self::InvalidEdgeOrigin(value) => {
                write!(f, "Unknown edge origin '{value}'")
            }
            Self::SelfAssignment { employee_id } => {
                write!(f, "Employee '{employee_id}' cannot review themselves")
            }
            Self::DuplicateEdge {
                reviewer_id,
                reviewee_id,
            } => {
                write!(
                    f,
                    "'{reviewer_id}' is already assigned to review '{reviewee_id}'"
                )
            }
            Self::ReviewerCapacityExceeded {
                reviewee_id,
                current,
                max,
            } => {
                write!(
                    f,
                    "'{reviewee_id}' already has {current} of {max} reviewers"
                )
            }
            Self::ReviewerLoadExceeded {
                reviewer_id,
                current,
                max,
            } => {
                write!(
                    f,
                    "'{reviewer_id}' already owes {current} of {max} reviews"
                )
            }
            Self::DepartmentCapExceeded {
                reviewee_id,
                department,
                current,
                max,
            } => {
                write!(
                    f,
                    "'{reviewee_id}' already has {current} of {max} reviewers from department '{department}'"
                )
            }
            Self::ManagerSubordinateDisallowed {
                manager_id,
                subordinate_id,
            } => {
                write!(
                    f,
                    "Pairing manager '{manager_id}' with direct report '{subordinate_id}' is disallowed by policy"
                )
            }
            Self::EdgeNotFound {
                reviewer_id,
                reviewee_id,
            } => {
                write!(
                    f,
                    "No assignment from '{reviewer_id}' to '{reviewee_id}' exists"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
