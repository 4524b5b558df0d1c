// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents an employee identifier.
///
/// Employee identifiers are opaque strings owned by the external employee
/// directory. They are the sole identity used inside the pairing engine;
/// names and departments are informational.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId {
    /// The identifier value.
    value: String,
}

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    ///
    /// Surrounding whitespace is trimmed so identifiers from different
    /// upstream sources compare consistently.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a review cycle identifier.
///
/// Review cycles are owned by the external review-cycle collaborator; the
/// engine only keys its state by this identifier. Different cycles are fully
/// independent of each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ReviewCycleId {
    /// The canonical numeric identifier.
    value: i64,
}

impl ReviewCycleId {
    /// Creates a new `ReviewCycleId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The canonical numeric identifier
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    /// Returns the numeric identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl std::fmt::Display for ReviewCycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents an employee within a review cycle.
///
/// Employees are a read-only snapshot supplied by the external employee
/// directory. The engine never mutates them; it only reads identity,
/// department, and reporting-line data for invariant checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical employee identifier (unique per cycle).
    pub employee_id: EmployeeId,
    /// The employee's display name (informational, not unique).
    pub display_name: String,
    /// The department this employee belongs to.
    pub department: String,
    /// The employee's direct manager, if any.
    pub manager_id: Option<EmployeeId>,
    /// Whether this employee manages others.
    pub is_manager: bool,
}

impl Employee {
    /// Creates a new `Employee`.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The canonical employee identifier
    /// * `display_name` - The employee's display name
    /// * `department` - The department this employee belongs to
    /// * `manager_id` - The employee's direct manager, if any
    /// * `is_manager` - Whether this employee manages others
    #[must_use]
    pub const fn new(
        employee_id: EmployeeId,
        display_name: String,
        department: String,
        manager_id: Option<EmployeeId>,
        is_manager: bool,
    ) -> Self {
        Self {
            employee_id,
            display_name,
            department,
            manager_id,
            is_manager,
        }
    }
}

/// The employee directory snapshot for one review cycle.
///
/// The roster preserves the directory's ordering (used for stable report
/// output) and carries an index for identifier lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// The review cycle this roster belongs to.
    review_cycle_id: ReviewCycleId,
    /// All employees in the cycle, in directory order.
    employees: Vec<Employee>,
    /// Index from identifier to position in `employees`.
    #[serde(skip)]
    index: BTreeMap<EmployeeId, usize>,
}

impl Roster {
    /// Creates a new `Roster`.
    ///
    /// Construction does not validate the employee set; callers use
    /// [`crate::validate_roster`] before trusting the snapshot.
    ///
    /// # Arguments
    ///
    /// * `review_cycle_id` - The review cycle this roster belongs to
    /// * `employees` - All employees in the cycle, in directory order
    #[must_use]
    pub fn new(review_cycle_id: ReviewCycleId, employees: Vec<Employee>) -> Self {
        let index: BTreeMap<EmployeeId, usize> = employees
            .iter()
            .enumerate()
            .map(|(position, employee)| (employee.employee_id.clone(), position))
            .collect();
        Self {
            review_cycle_id,
            employees,
            index,
        }
    }

    /// Returns the review cycle this roster belongs to.
    #[must_use]
    pub const fn review_cycle_id(&self) -> ReviewCycleId {
        self.review_cycle_id
    }

    /// Returns all employees in directory order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the number of employees in the cycle.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns whether the roster has no employees.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Checks whether an employee is on the roster.
    #[must_use]
    pub fn contains(&self, employee_id: &EmployeeId) -> bool {
        self.index.contains_key(employee_id)
    }

    /// Looks up an employee by identifier.
    #[must_use]
    pub fn get(&self, employee_id: &EmployeeId) -> Option<&Employee> {
        self.index
            .get(employee_id)
            .and_then(|position| self.employees.get(*position))
    }

    /// Returns the department of an employee, if the employee is on the roster.
    #[must_use]
    pub fn department_of(&self, employee_id: &EmployeeId) -> Option<&str> {
        self.get(employee_id)
            .map(|employee| employee.department.as_str())
    }

    /// Checks whether `manager_id` is the direct manager of `report_id`.
    #[must_use]
    pub fn is_manager_of(&self, manager_id: &EmployeeId, report_id: &EmployeeId) -> bool {
        self.get(report_id)
            .and_then(|employee| employee.manager_id.as_ref())
            .is_some_and(|actual| actual == manager_id)
    }
}
