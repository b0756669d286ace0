// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftcycle_domain::{Assignment, Pattern, PatternDay, RecurrenceRule};
use time::Date;

/// Everything a user supplies when saving a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDraft {
    pub name: String,
    pub days: Vec<PatternDay>,
    /// Date on which cycle day 1 occurs.
    pub anchor_date: Date,
    pub end_date: Option<Date>,
    pub enabled: bool,
    pub priority: i32,
}

impl PatternDraft {
    /// Creates an enabled, open-ended draft with default priority.
    #[must_use]
    pub const fn new(name: String, days: Vec<PatternDay>, anchor_date: Date) -> Self {
        Self {
            name,
            days,
            anchor_date,
            end_date: None,
            enabled: true,
            priority: 0,
        }
    }
}

/// A command represents user intent as data only.
///
/// Commands are the only way to change stored patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save a new pattern and assign it to the current user.
    CreatePattern(PatternDraft),
    /// Replace the pattern and bounds of an existing assignment.
    UpdatePattern {
        assignment_id: i64,
        draft: PatternDraft,
    },
    /// Remove an assignment, and its rule if nothing else references it.
    DeletePattern { assignment_id: i64 },
}

impl Command {
    /// The assignment this command targets, if it already exists.
    #[must_use]
    pub const fn assignment_id(&self) -> Option<i64> {
        match self {
            Self::CreatePattern(_) => None,
            Self::UpdatePattern { assignment_id, .. } | Self::DeletePattern { assignment_id } => {
                Some(*assignment_id)
            }
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePattern(_) => "CreatePattern",
            Self::UpdatePattern { .. } => "UpdatePattern",
            Self::DeletePattern { .. } => "DeletePattern",
        }
    }
}

/// An assignment together with its rule and decoded pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPattern {
    pub assignment: Assignment,
    pub rule: RecurrenceRule,
    pub pattern: Pattern,
}

/// The result of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(StoredPattern),
    Updated(StoredPattern),
    Deleted {
        assignment_id: i64,
        /// Whether the now-unreferenced rule was removed as well.
        rule_deleted: bool,
    },
}
