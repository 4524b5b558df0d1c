// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use peer_pair::CoreError;
use peer_pair_domain::DomainError;
use peer_pair_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract. Structural input errors mean the request itself was
/// malformed; invariant violations mean a well-formed change was rejected by
/// a graph rule and came back whole, naming the specific rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request input was structurally invalid.
    StructuralInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A graph invariant rejected the requested change.
    InvariantViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A concurrent mutation held the cycle lock for too long.
    ///
    /// Nothing was applied; the caller may retry.
    ConcurrencyConflict {
        /// The contended review cycle.
        review_cycle_id: i64,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StructuralInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvariantViolation { rule, message } => {
                write!(f, "Invariant violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConcurrencyConflict { review_cycle_id } => {
                write!(
                    f,
                    "Review cycle {review_cycle_id} is being modified by another request; retry"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. Structural kinds become `StructuralInput`, invariant kinds
/// become `InvariantViolation` with a stable rule name, and missing-edge
/// lookups become `ResourceNotFound`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyCycle => ApiError::StructuralInput {
            field: String::from("roster"),
            message: String::from("Review cycle has no employees"),
        },
        DomainError::InvalidCapacity { field, value } => ApiError::StructuralInput {
            field: String::from(field),
            message: format!("Invalid capacity configuration: {field} = {value}"),
        },
        DomainError::InvalidEmployeeId(msg) => ApiError::StructuralInput {
            field: String::from("employee_id"),
            message: msg,
        },
        DomainError::InvalidDisplayName { employee_id } => ApiError::StructuralInput {
            field: String::from("display_name"),
            message: format!("Employee '{employee_id}' has an empty display name"),
        },
        DomainError::DuplicateEmployee { employee_id } => ApiError::StructuralInput {
            field: String::from("roster"),
            message: format!("Employee '{employee_id}' appears twice on the roster"),
        },
        DomainError::UnknownEmployee { employee_id } => ApiError::StructuralInput {
            field: String::from("employee_id"),
            message: format!("Employee '{employee_id}' is not on the cycle roster"),
        },
        DomainError::InvalidEdgeOrigin(value) => ApiError::StructuralInput {
            field: String::from("origin"),
            message: format!("Unknown edge origin '{value}'"),
        },
        DomainError::SelfAssignment { employee_id } => ApiError::InvariantViolation {
            rule: String::from("no_self_review"),
            message: format!("Employee '{employee_id}' cannot review themselves"),
        },
        DomainError::DuplicateEdge {
            reviewer_id,
            reviewee_id,
        } => ApiError::InvariantViolation {
            rule: String::from("no_duplicate_edge"),
            message: format!("'{reviewer_id}' is already assigned to review '{reviewee_id}'"),
        },
        DomainError::ReviewerCapacityExceeded {
            reviewee_id,
            current,
            max,
        } => ApiError::InvariantViolation {
            rule: String::from("reviewer_capacity"),
            message: format!("'{reviewee_id}' already has {current} of {max} reviewers"),
        },
        DomainError::ReviewerLoadExceeded {
            reviewer_id,
            current,
            max,
        } => ApiError::InvariantViolation {
            rule: String::from("reviewer_load_limit"),
            message: format!("'{reviewer_id}' already owes {current} of {max} reviews"),
        },
        DomainError::DepartmentCapExceeded {
            reviewee_id,
            department,
            current,
            max,
        } => ApiError::InvariantViolation {
            rule: String::from("department_cap"),
            message: format!(
                "'{reviewee_id}' already has {current} of {max} reviewers from department '{department}'"
            ),
        },
        DomainError::ManagerSubordinateDisallowed {
            manager_id,
            subordinate_id,
        } => ApiError::InvariantViolation {
            rule: String::from("manager_pairing"),
            message: format!(
                "Pairing manager '{manager_id}' with direct report '{subordinate_id}' is disallowed by policy"
            ),
        },
        DomainError::EdgeNotFound {
            reviewer_id,
            reviewee_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment edge"),
            message: format!("No assignment from '{reviewer_id}' to '{reviewee_id}' exists"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing cycles and events become `ResourceNotFound`; everything else is
/// an internal failure the caller cannot act on beyond reporting it.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::CycleNotFound(review_cycle_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Review cycle"),
            message: format!("Review cycle {review_cycle_id} does not exist"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {event_id} does not exist"),
        },
        other => ApiError::Internal {
            message: format!("Persistence failure: {other}"),
        },
    }
}
