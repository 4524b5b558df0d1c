// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capacity;
mod edge;
mod error;
mod selection;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use capacity::CapacityConfig;
pub use edge::{AssignmentEdge, EdgeOrigin};
pub use error::DomainError;
pub use selection::PeerSelections;
pub use types::{Employee, EmployeeId, ReviewCycleId, Roster};
pub use validation::{validate_employee_fields, validate_roster, validate_selections};
