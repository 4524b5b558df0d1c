// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::selection::PeerSelections;
use crate::types::{Employee, EmployeeId, Roster};
use std::collections::BTreeSet;

/// Validates the fields of a single employee record.
///
/// # Arguments
///
/// * `employee` - The employee record to validate
///
/// # Returns
///
/// * `Ok(())` if all fields are valid
/// * `Err(DomainError)` describing the first invalid field
///
/// # Errors
///
/// Returns an error if the identifier or display name is empty.
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    if employee.employee_id.value().is_empty() {
        return Err(DomainError::InvalidEmployeeId(String::from(
            "Employee identifier cannot be empty",
        )));
    }
    if employee.display_name.trim().is_empty() {
        return Err(DomainError::InvalidDisplayName {
            employee_id: employee.employee_id.clone(),
        });
    }
    Ok(())
}

/// Validates a roster snapshot.
///
/// # Arguments
///
/// * `roster` - The roster to validate
///
/// # Returns
///
/// * `Ok(())` if the roster is structurally sound
/// * `Err(DomainError)` describing the first violation
///
/// # Errors
///
/// Returns an error if:
/// - The roster is empty
/// - Any employee record has invalid fields
/// - An identifier appears twice
/// - A `manager_id` refers to someone not on the roster
pub fn validate_roster(roster: &Roster) -> Result<(), DomainError> {
    if roster.is_empty() {
        return Err(DomainError::EmptyCycle);
    }

    let mut seen: BTreeSet<&EmployeeId> = BTreeSet::new();
    for employee in roster.employees() {
        validate_employee_fields(employee)?;
        if !seen.insert(&employee.employee_id) {
            return Err(DomainError::DuplicateEmployee {
                employee_id: employee.employee_id.clone(),
            });
        }
    }

    // Manager references must resolve within the same cycle.
    for employee in roster.employees() {
        if let Some(manager_id) = &employee.manager_id
            && !roster.contains(manager_id)
        {
            return Err(DomainError::UnknownEmployee {
                employee_id: manager_id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates peer selections against a roster.
///
/// The per-employee selection count cap (`max_peer_selection`) is enforced
/// upstream by the peer-selection collaborator and is not re-checked here;
/// this validation covers referential integrity only.
///
/// # Arguments
///
/// * `roster` - The cycle's roster
/// * `selections` - The submitted selections to validate
///
/// # Returns
///
/// * `Ok(())` if every selector and choice is on the roster
/// * `Err(DomainError::UnknownEmployee)` for the first unresolved identifier
///
/// # Errors
///
/// Returns an error if a selector or a chosen peer is not on the roster.
pub fn validate_selections(
    roster: &Roster,
    selections: &PeerSelections,
) -> Result<(), DomainError> {
    for (selector_id, choices) in selections.iter() {
        if !roster.contains(selector_id) {
            return Err(DomainError::UnknownEmployee {
                employee_id: selector_id.clone(),
            });
        }
        for choice in choices {
            if !roster.contains(choice) {
                return Err(DomainError::UnknownEmployee {
                    employee_id: choice.clone(),
                });
            }
        }
    }
    Ok(())
}
