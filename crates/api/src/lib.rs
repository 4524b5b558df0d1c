// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the peer review pairing engine.
//!
//! Handlers compose the full mutation path: load stored state, run the
//! engine, persist, audit. Domain, core, and persistence errors never leak
//! across this boundary; they are translated into the `ApiError` taxonomy.
//! Invariant violations are definitive answers, never retried here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_edge, get_audit_timeline, get_load_summary, get_mutual_selections, get_reviewees,
    get_reviewers, move_edge, put_capacity, put_roster, put_selections, remove_cycle,
    remove_edge, run_auto_pairing,
};
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, EdgeMutationResponse, EdgeRequest, EmployeeInfo,
    EmployeeLoadInfo, LoadSummaryResponse, MoveEdgeRequest, MutualSelectionsResponse,
    PutCapacityRequest, PutCapacityResponse, PutRosterRequest, PutRosterResponse,
    PutSelectionsRequest, PutSelectionsResponse, RemoveCycleResponse, RevieweesResponse,
    ReviewersResponse, RunAutoPairingResponse, SelectionEntry, ShortfallInfo,
};
