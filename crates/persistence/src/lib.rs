// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Shiftcycle.
//!
//! This crate stores the shift catalogue, encoded recurrence rules and
//! schedule assignments in `SQLite` via Diesel, and implements the storage
//! traits the pattern engine consumes.
//!
//! ## Storage Layout
//!
//! - `shifts`: The shift catalogue
//! - `recurrence_rules`: Encoded rules; `description` carries the
//!   sentinel-prefixed custom pattern payload
//! - `pattern_days`: One structured row per cycle day of a rule
//! - `schedule_assignments`: Rule bindings to a user, team and date range
//!
//! Reads prefer the structured day rows. A rule without rows is decoded
//! from its description, which keeps databases written before the rows
//! existed readable.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory `SQLite` databases
//! - Foreign key enforcement is verified at startup, never assumed
//! - Migrations are embedded and applied on every connection

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
use shiftcycle::{AssignmentStore, RecurrenceRuleStore, ShiftLookup, StoreError};
use shiftcycle_domain::{Assignment, Pattern, PatternDay, RecurrenceRule, Shift, ShiftId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// concurrently running tests never share a database.
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

use backend::PersistenceBackend;

/// `SQLite`-backed storage for the pattern engine.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_shiftcycle_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

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
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Better read concurrency for file databases
        backend::sqlite::enable_wal_mode(&mut conn)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Inserts a shift or replaces an existing definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn upsert_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        mutations::shifts::upsert_shift(&mut self.conn, shift)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, PersistenceError> {
        queries::shifts::get_shift(&mut self.conn, shift_id.value())
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_shifts(&mut self) -> Result<Vec<Shift>, PersistenceError> {
        queries::shifts::list_shifts(&mut self.conn)
    }

    // ========================================================================
    // Recurrence rules
    // ========================================================================

    /// Stores a rule and its structured day rows atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn insert_rule(
        &mut self,
        rule: &RecurrenceRule,
        pattern: &Pattern,
    ) -> Result<RecurrenceRule, PersistenceError> {
        mutations::rules::insert_rule(&mut self.conn, rule, pattern)
    }

    /// Stores a rule without day rows, as older databases hold them.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn insert_description_only_rule(
        &mut self,
        rule: &RecurrenceRule,
    ) -> Result<i64, PersistenceError> {
        mutations::rules::insert_description_only_rule(&mut self.conn, rule)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_rule(&mut self, rule_id: i64) -> Result<Option<RecurrenceRule>, PersistenceError> {
        queries::rules::get_rule(&mut self.conn, rule_id)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_pattern_days(&mut self, rule_id: i64) -> Result<Vec<PatternDay>, PersistenceError> {
        queries::rules::get_pattern_days(&mut self.conn, rule_id)
    }

    /// # Errors
    ///
    /// Returns an error if the rule does not exist or is still referenced.
    pub fn delete_rule(&mut self, rule_id: i64) -> Result<(), PersistenceError> {
        mutations::rules::delete_rule(&mut self.conn, rule_id)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_rule_referenced(&mut self, rule_id: i64) -> Result<bool, PersistenceError> {
        queries::rules::is_rule_referenced(&mut self.conn, rule_id)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_rules(&mut self) -> Result<i64, PersistenceError> {
        queries::rules::count_rules(&mut self.conn)
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Inserts an assignment without an ID or updates the one carrying an ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails or the ID is unknown.
    pub fn save_assignment(
        &mut self,
        assignment: &Assignment,
    ) -> Result<Assignment, PersistenceError> {
        match assignment.assignment_id() {
            Some(assignment_id) => {
                mutations::assignments::update_assignment(&mut self.conn, assignment_id, assignment)?;
                Ok(assignment.clone())
            }
            None => {
                let assignment_id: i64 =
                    mutations::assignments::insert_assignment(&mut self.conn, assignment)?;
                Ok(assignment.clone().with_id(assignment_id))
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_assignment(
        &mut self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id)
    }

    /// # Errors
    ///
    /// Returns an error if the assignment does not exist.
    pub fn delete_assignment(&mut self, assignment_id: i64) -> Result<(), PersistenceError> {
        mutations::assignments::delete_assignment(&mut self.conn, assignment_id)
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_assignments_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments_for_user(&mut self.conn, user_id)
    }
}

impl ShiftLookup for Persistence {
    fn find_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, StoreError> {
        self.get_shift(shift_id).map_err(StoreError::from)
    }

    fn list_shifts(&mut self) -> Result<Vec<Shift>, StoreError> {
        Self::list_shifts(self).map_err(StoreError::from)
    }
}

impl RecurrenceRuleStore for Persistence {
    fn save_rule(
        &mut self,
        rule: &RecurrenceRule,
        pattern: &Pattern,
    ) -> Result<RecurrenceRule, StoreError> {
        self.insert_rule(rule, pattern).map_err(StoreError::from)
    }

    fn get_rule(&mut self, rule_id: i64) -> Result<Option<RecurrenceRule>, StoreError> {
        Self::get_rule(self, rule_id).map_err(StoreError::from)
    }

    fn get_pattern_days(&mut self, rule_id: i64) -> Result<Vec<PatternDay>, StoreError> {
        Self::get_pattern_days(self, rule_id).map_err(StoreError::from)
    }

    fn delete_rule(&mut self, rule_id: i64) -> Result<(), StoreError> {
        Self::delete_rule(self, rule_id).map_err(StoreError::from)
    }

    fn is_rule_referenced(&mut self, rule_id: i64) -> Result<bool, StoreError> {
        Self::is_rule_referenced(self, rule_id).map_err(StoreError::from)
    }
}

impl AssignmentStore for Persistence {
    fn save_assignment(&mut self, assignment: &Assignment) -> Result<Assignment, StoreError> {
        Self::save_assignment(self, assignment).map_err(StoreError::from)
    }

    fn get_assignment(&mut self, assignment_id: i64) -> Result<Option<Assignment>, StoreError> {
        Self::get_assignment(self, assignment_id).map_err(StoreError::from)
    }

    fn delete_assignment(&mut self, assignment_id: i64) -> Result<(), StoreError> {
        Self::delete_assignment(self, assignment_id).map_err(StoreError::from)
    }

    fn list_assignments_for_user(&mut self, user_id: i64) -> Result<Vec<Assignment>, StoreError> {
        Self::list_assignments_for_user(self, user_id).map_err(StoreError::from)
    }
}
