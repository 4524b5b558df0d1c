// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the peer review pairing engine.
//!
//! This crate stores rosters, peer selections, capacity configuration,
//! assignment graphs, and audit events. It is built on Diesel over `SQLite`.
//!
//! `SQLite` is the only backend: in-memory databases back unit and
//! integration tests, file-based databases (with WAL enabled) back
//! deployments. Foreign key enforcement is verified at startup.
//!
//! Stored state is replaced wholesale inside transactions: a cycle's graph
//! is never patched edge by edge on disk. The committed graph in the
//! database, not anything held in memory, is the source of truth.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use peer_pair::{AssignmentGraph, TransitionResult};
use peer_pair_audit::AuditEvent;
use peer_pair_domain::{CapacityConfig, PeerSelections, ReviewCycleId, Roster};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for cycle state and audit events.
///
/// Holds one `SQLite` connection; the server serializes access to it.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Cycle State
    // ========================================================================

    /// Checks whether a review cycle exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn cycle_exists(&mut self, review_cycle_id: ReviewCycleId) -> Result<bool, PersistenceError> {
        queries::cycle_exists(&mut self.conn, review_cycle_id)
    }

    /// Lists all stored review cycles in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_cycles(&mut self) -> Result<Vec<ReviewCycleId>, PersistenceError> {
        queries::list_cycles(&mut self.conn)
    }

    /// Replaces the stored roster for a cycle, creating the cycle if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_roster(&mut self, roster: &Roster) -> Result<(), PersistenceError> {
        mutations::replace_roster(&mut self.conn, roster)
    }

    /// Loads the stored roster for a cycle, in directory order.
    ///
    /// # Errors
    ///
    /// Returns `CycleNotFound` if the cycle does not exist.
    pub fn load_roster(&mut self, review_cycle_id: ReviewCycleId) -> Result<Roster, PersistenceError> {
        queries::load_roster(&mut self.conn, review_cycle_id)
    }

    /// Replaces the stored peer selections for a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_selections(
        &mut self,
        review_cycle_id: ReviewCycleId,
        selections: &PeerSelections,
    ) -> Result<(), PersistenceError> {
        mutations::replace_selections(&mut self.conn, review_cycle_id, selections)
    }

    /// Loads the stored peer selections for a cycle.
    ///
    /// # Errors
    ///
    /// Returns `CycleNotFound` if the cycle does not exist.
    pub fn load_selections(
        &mut self,
        review_cycle_id: ReviewCycleId,
    ) -> Result<PeerSelections, PersistenceError> {
        queries::load_selections(&mut self.conn, review_cycle_id)
    }

    /// Stores the capacity configuration for a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_capacity(
        &mut self,
        review_cycle_id: ReviewCycleId,
        capacity: &CapacityConfig,
    ) -> Result<(), PersistenceError> {
        mutations::save_capacity(&mut self.conn, review_cycle_id, capacity)
    }

    /// Loads the capacity configuration for a cycle.
    ///
    /// # Errors
    ///
    /// Returns `CycleNotFound` if the cycle does not exist.
    pub fn load_capacity(
        &mut self,
        review_cycle_id: ReviewCycleId,
    ) -> Result<CapacityConfig, PersistenceError> {
        queries::load_capacity(&mut self.conn, review_cycle_id)
    }

    /// Replaces the stored assignment graph for a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save_graph(&mut self, graph: &AssignmentGraph) -> Result<(), PersistenceError> {
        mutations::save_graph(&mut self.conn, graph)
    }

    /// Loads the stored assignment graph for a cycle.
    ///
    /// Returns an empty graph for a cycle that exists but has never been
    /// solved or adjusted.
    ///
    /// # Errors
    ///
    /// Returns `CycleNotFound` if the cycle does not exist.
    pub fn load_graph(
        &mut self,
        review_cycle_id: ReviewCycleId,
    ) -> Result<AssignmentGraph, PersistenceError> {
        queries::load_graph(&mut self.conn, review_cycle_id)
    }

    /// Deletes a review cycle and its roster, selections, and graph.
    ///
    /// Audit events for the cycle are retained.
    ///
    /// # Errors
    ///
    /// Returns `CycleNotFound` if no such cycle exists.
    pub fn delete_cycle(&mut self, review_cycle_id: ReviewCycleId) -> Result<(), PersistenceError> {
        mutations::delete_cycle(&mut self.conn, review_cycle_id)
    }

    // ========================================================================
    // Transitions & Audit
    // ========================================================================

    /// Persists a transition result: the new graph and its audit event
    /// commit in one transaction.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition result to persist
    ///
    /// # Returns
    ///
    /// The event ID assigned to the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written on failure.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Persists an audit event.
    ///
    /// # Arguments
    ///
    /// * `event` - The audit event to persist
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit event timeline for a cycle.
    ///
    /// The timeline remains readable after the cycle itself is deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn audit_timeline(
        &mut self,
        review_cycle_id: ReviewCycleId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit_timeline(&mut self.conn, review_cycle_id)
    }
}
