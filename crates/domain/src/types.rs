// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::status::{AssignmentStatus, EffectiveStatus};
use crate::validation::validate_pattern_days;
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// Minimum number of days in a cycle.
pub const MIN_PATTERN_LENGTH: usize = 1;

/// Maximum number of days in a cycle.
pub const MAX_PATTERN_LENGTH: usize = 365;

/// Identifier of a shift.
///
/// Shift identifiers are opaque strings owned by the shift catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShiftId {
    value: String,
}

impl ShiftId {
    /// Creates a new `ShiftId`.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A named, time-boxed work period.
///
/// A shift whose end time is not after its start time runs past midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    id: ShiftId,
    name: String,
    start_time: Time,
    end_time: Time,
}

impl Shift {
    /// Creates a new `Shift`.
    ///
    /// # Arguments
    ///
    /// * `id` - The shift identifier
    /// * `name` - The display name
    /// * `start_time` - Wall-clock start
    /// * `end_time` - Wall-clock end
    #[must_use]
    pub const fn new(id: ShiftId, name: String, start_time: Time, end_time: Time) -> Self {
        Self {
            id,
            name,
            start_time,
            end_time,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ShiftId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn start_time(&self) -> Time {
        self.start_time
    }

    #[must_use]
    pub const fn end_time(&self) -> Time {
        self.end_time
    }

    /// Returns true if the shift ends on the following calendar day.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }
}

/// One position in a cycle: either a work day bound to a shift or a rest day.
///
/// Work/rest is derived from the presence of a shift reference, so the two
/// are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternDay {
    day_number: u16,
    shift: Option<ShiftId>,
}

impl PatternDay {
    /// Creates a work day at the given 1-based cycle position.
    #[must_use]
    pub const fn work(day_number: u16, shift: ShiftId) -> Self {
        Self {
            day_number,
            shift: Some(shift),
        }
    }

    /// Creates a rest day at the given 1-based cycle position.
    #[must_use]
    pub const fn rest(day_number: u16) -> Self {
        Self {
            day_number,
            shift: None,
        }
    }

    /// Returns the 1-based position of this day in its cycle.
    #[must_use]
    pub const fn day_number(&self) -> u16 {
        self.day_number
    }

    /// Returns the referenced shift, present only for work days.
    #[must_use]
    pub const fn shift_id(&self) -> Option<&ShiftId> {
        self.shift.as_ref()
    }

    #[must_use]
    pub const fn is_work_day(&self) -> bool {
        self.shift.is_some()
    }

    #[must_use]
    pub const fn is_rest_day(&self) -> bool {
        self.shift.is_none()
    }
}

/// An ordered, finite, cyclically repeating sequence of days.
///
/// ## Invariants
///
/// - Length is within `MIN_PATTERN_LENGTH..=MAX_PATTERN_LENGTH`
/// - Day numbers are exactly `1..=length` in ascending order
/// - Every work day carries a non-blank shift identifier
///
/// A `Pattern` can only be obtained through [`Pattern::new`], so holding one
/// means the invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    days: Vec<PatternDay>,
}

impl Pattern {
    /// Creates a validated pattern.
    ///
    /// # Errors
    ///
    /// Returns the first violated pattern rule (see [`validate_pattern_days`]).
    pub fn new(days: Vec<PatternDay>) -> Result<Self, DomainError> {
        validate_pattern_days(&days)?;
        Ok(Self { days })
    }

    /// Returns the number of days in one cycle.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn length(&self) -> u16 {
        // Bounded by MAX_PATTERN_LENGTH.
        self.days.len() as u16
    }

    #[must_use]
    pub fn days(&self) -> &[PatternDay] {
        &self.days
    }

    /// Returns the day with the given 1-based number.
    #[must_use]
    pub fn day(&self, day_number: u16) -> Option<&PatternDay> {
        usize::from(day_number)
            .checked_sub(1)
            .and_then(|index| self.days.get(index))
    }

    /// Number of work days in one cycle.
    #[must_use]
    pub fn work_day_count(&self) -> usize {
        self.days.iter().filter(|day| day.is_work_day()).count()
    }

    /// Number of rest days in one cycle.
    #[must_use]
    pub fn rest_day_count(&self) -> usize {
        self.days.len() - self.work_day_count()
    }

    /// Distinct shift identifiers in order of first appearance.
    #[must_use]
    pub fn distinct_shift_ids(&self) -> Vec<&ShiftId> {
        let mut seen: Vec<&ShiftId> = Vec::new();
        for shift_id in self.days.iter().filter_map(PatternDay::shift_id) {
            if !seen.contains(&shift_id) {
                seen.push(shift_id);
            }
        }
        seen
    }
}

/// Persisted, encoded form of a pattern.
///
/// The `description` column is shared with other recurrence kinds; custom
/// patterns are recognised by the sentinel prefix written by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Database identifier. `None` until persisted.
    rule_id: Option<i64>,
    pattern_length: u16,
    description: String,
}

impl RecurrenceRule {
    /// Creates a rule that has not been persisted yet.
    #[must_use]
    pub const fn new(pattern_length: u16, description: String) -> Self {
        Self {
            rule_id: None,
            pattern_length,
            description,
        }
    }

    /// Creates a rule with an existing persisted ID.
    #[must_use]
    pub const fn with_id(rule_id: i64, pattern_length: u16, description: String) -> Self {
        Self {
            rule_id: Some(rule_id),
            pattern_length,
            description,
        }
    }

    #[must_use]
    pub const fn rule_id(&self) -> Option<i64> {
        self.rule_id
    }

    #[must_use]
    pub const fn pattern_length(&self) -> u16 {
        self.pattern_length
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Binds a recurrence rule to a user and team over a date range.
///
/// The assignment owns no pattern data; it only references a rule.
/// Temporal status is never stored: it is derived on demand from the
/// anchor date, optional end date, enable flag and "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Database identifier. `None` until persisted.
    assignment_id: Option<i64>,
    /// Display name of the pattern this assignment applies.
    pub name: String,
    pub user_id: i64,
    pub team_id: String,
    /// Referenced rule. `None` only for transient (preview) assignments.
    pub rule_id: Option<i64>,
    /// Date on which cycle day 1 occurs.
    pub anchor_date: Date,
    /// Last date (inclusive) on which the assignment applies.
    pub end_date: Option<Date>,
    /// Administrative enable flag.
    pub enabled: bool,
    pub priority: i32,
}

impl Assignment {
    /// Creates an enabled, open-ended assignment with default priority.
    #[must_use]
    pub const fn new(name: String, user_id: i64, team_id: String, anchor_date: Date) -> Self {
        Self {
            assignment_id: None,
            name,
            user_id,
            team_id,
            rule_id: None,
            anchor_date,
            end_date: None,
            enabled: true,
            priority: 0,
        }
    }

    /// Returns a copy carrying the given persisted ID.
    #[must_use]
    pub fn with_id(mut self, assignment_id: i64) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }

    #[must_use]
    pub const fn assignment_id(&self) -> Option<i64> {
        self.assignment_id
    }

    /// Returns true if `date` lies within `[anchor_date, end_date]`.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        date >= self.anchor_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Temporal status as of `today`.
    #[must_use]
    pub fn status(&self, today: Date) -> AssignmentStatus {
        AssignmentStatus::resolve(today, self.anchor_date, self.end_date)
    }

    /// Temporal status combined with the administrative enable flag.
    #[must_use]
    pub fn effective_status(&self, today: Date) -> EffectiveStatus {
        EffectiveStatus::resolve(today, self.anchor_date, self.end_date, self.enabled)
    }

    /// Returns true if the assignment is enabled and has not expired.
    #[must_use]
    pub fn is_processable(&self, today: Date) -> bool {
        self.enabled && self.status(today) != AssignmentStatus::Expired
    }
}

/// A calendar date together with the shift resolved for it, if any.
///
/// Transient calculation output; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkScheduleDay {
    pub date: Date,
    /// The cycle position (1-based) that fell on this date.
    pub day_number: u16,
    /// The resolved shift, or `None` on a rest day.
    pub shift: Option<Shift>,
}

impl WorkScheduleDay {
    #[must_use]
    pub const fn rest(date: Date, day_number: u16) -> Self {
        Self {
            date,
            day_number,
            shift: None,
        }
    }

    #[must_use]
    pub const fn work(date: Date, day_number: u16, shift: Shift) -> Self {
        Self {
            date,
            day_number,
            shift: Some(shift),
        }
    }

    #[must_use]
    pub const fn is_rest_day(&self) -> bool {
        self.shift.is_none()
    }
}
