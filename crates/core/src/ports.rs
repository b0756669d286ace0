// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborators the engine consumes.
//!
//! The engine never talks to a database, a clock or a session directly.
//! Everything it needs from the outside world is expressed by the traits
//! in this module and injected by the caller.

use crate::error::StoreError;
use shiftcycle_domain::{Assignment, Pattern, PatternDay, RecurrenceRule, Shift, ShiftId};
use time::{Date, OffsetDateTime};

/// Resolves shift identifiers to full shift definitions.
pub trait ShiftLookup {
    /// Returns the shift with the given identifier, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, StoreError>;

    /// Returns every known shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn list_shifts(&mut self) -> Result<Vec<Shift>, StoreError>;
}

/// Storage for encoded recurrence rules.
pub trait RecurrenceRuleStore {
    /// Persists a new rule and returns it carrying its assigned ID.
    ///
    /// The decoded pattern is passed alongside so stores with a structured
    /// layout can write it without decoding the description again.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be written.
    fn save_rule(
        &mut self,
        rule: &RecurrenceRule,
        pattern: &Pattern,
    ) -> Result<RecurrenceRule, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the rule cannot be read.
    fn get_rule(&mut self, rule_id: i64) -> Result<Option<RecurrenceRule>, StoreError>;

    /// Returns the structured day rows stored for a rule.
    ///
    /// An empty list means the store only holds the encoded description,
    /// and callers fall back to decoding it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be read.
    fn get_pattern_days(&mut self, _rule_id: i64) -> Result<Vec<PatternDay>, StoreError> {
        Ok(Vec::new())
    }

    /// # Errors
    ///
    /// Returns an error if the rule cannot be deleted.
    fn delete_rule(&mut self, rule_id: i64) -> Result<(), StoreError>;

    /// Returns true if any assignment still references the rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_rule_referenced(&mut self, rule_id: i64) -> Result<bool, StoreError>;
}

/// Storage for schedule assignments.
pub trait AssignmentStore {
    /// Inserts an assignment without an ID, or updates the one with the
    /// given ID. Returns the stored assignment carrying its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment cannot be written.
    fn save_assignment(&mut self, assignment: &Assignment) -> Result<Assignment, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the assignment cannot be read.
    fn get_assignment(&mut self, assignment_id: i64) -> Result<Option<Assignment>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the assignment cannot be deleted.
    fn delete_assignment(&mut self, assignment_id: i64) -> Result<(), StoreError>;

    /// Lists a user's assignments ordered by assignment ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignments cannot be read.
    fn list_assignments_for_user(&mut self, user_id: i64) -> Result<Vec<Assignment>, StoreError>;
}

/// Everything the engine needs from storage.
pub trait PatternStore: ShiftLookup + RecurrenceRuleStore + AssignmentStore {}

impl<T> PatternStore for T where T: ShiftLookup + RecurrenceRuleStore + AssignmentStore {}

/// Supplies the identity on whose behalf the engine acts.
pub trait IdentityProvider: Send + Sync {
    fn user_id(&self) -> i64;
    fn team_name(&self) -> &str;
}

/// A fixed, single-valued identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    user_id: i64,
    team_name: String,
}

impl StaticIdentity {
    #[must_use]
    pub const fn new(user_id: i64, team_name: String) -> Self {
        Self { user_id, team_name }
    }
}

impl IdentityProvider for StaticIdentity {
    fn user_id(&self) -> i64 {
        self.user_id
    }

    fn team_name(&self) -> &str {
        &self.team_name
    }
}

/// Supplies "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// The current UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
