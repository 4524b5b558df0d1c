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

mod apply;
mod command;
mod error;
mod graph;
mod queries;
mod solver;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use graph::{AssignmentGraph, TransitionResult};
pub use queries::{
    EmployeeLoad, LoadSummary, load_summary, mutual_selections, reviewees_of, reviewers_of,
};
pub use solver::{Shortfall, SolveOutcome, solve};
