// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.
//!
//! Dates and times are stored as ISO-8601 text. A row that no longer parses
//! is reported as `PersistenceError::InvalidRow` rather than skipped.

use diesel::prelude::*;
use shiftcycle_domain::{
    Assignment, PatternDay, RecurrenceRule, Shift, ShiftId, parse_date, parse_time,
};

use crate::diesel_schema::{pattern_days, recurrence_rules, schedule_assignments, shifts};
use crate::error::PersistenceError;

/// Diesel Queryable struct for shift rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = shifts)]
pub struct ShiftRow {
    pub shift_id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftRow {
    /// Converts the row into a domain shift.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if either time column does not parse.
    pub fn into_shift(self) -> Result<Shift, PersistenceError> {
        let start_time = parse_time(&self.start_time).map_err(|e| invalid("shifts", &e))?;
        let end_time = parse_time(&self.end_time).map_err(|e| invalid("shifts", &e))?;
        Ok(Shift::new(
            ShiftId::new(&self.shift_id),
            self.name,
            start_time,
            end_time,
        ))
    }
}

/// Diesel Queryable struct for recurrence rule rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = recurrence_rules)]
pub struct RuleRow {
    pub rule_id: i64,
    pub pattern_length: i32,
    pub description: String,
}

impl RuleRow {
    /// Converts the row into a persisted recurrence rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if the stored length does not fit a cycle length.
    pub fn into_rule(self) -> Result<RecurrenceRule, PersistenceError> {
        let pattern_length = u16::try_from(self.pattern_length).map_err(|_| {
            PersistenceError::InvalidRow {
                table: "recurrence_rules",
                reason: format!("pattern_length {} out of range", self.pattern_length),
            }
        })?;
        Ok(RecurrenceRule::with_id(
            self.rule_id,
            pattern_length,
            self.description,
        ))
    }
}

/// Diesel Queryable struct for pattern day rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = pattern_days)]
pub struct PatternDayRow {
    pub day_number: i32,
    pub shift_id: Option<String>,
}

impl PatternDayRow {
    /// Converts the row into a pattern day. A null shift is a rest day.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if the day number does not fit a cycle position.
    pub fn into_pattern_day(self) -> Result<PatternDay, PersistenceError> {
        let day_number = u16::try_from(self.day_number).map_err(|_| {
            PersistenceError::InvalidRow {
                table: "pattern_days",
                reason: format!("day_number {} out of range", self.day_number),
            }
        })?;
        Ok(match self.shift_id {
            Some(shift_id) => PatternDay::work(day_number, ShiftId::new(&shift_id)),
            None => PatternDay::rest(day_number),
        })
    }
}

/// Diesel Queryable struct for assignment rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = schedule_assignments)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub name: String,
    pub user_id: i64,
    pub team_id: String,
    pub rule_id: i64,
    pub anchor_date: String,
    pub end_date: Option<String>,
    pub is_enabled: i32,
    pub priority: i32,
}

impl AssignmentRow {
    /// Converts the row into a persisted assignment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if a date column does not parse.
    pub fn into_assignment(self) -> Result<Assignment, PersistenceError> {
        let anchor_date =
            parse_date(&self.anchor_date).map_err(|e| invalid("schedule_assignments", &e))?;
        let end_date = self
            .end_date
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(|e| invalid("schedule_assignments", &e))?;

        let mut assignment = Assignment::new(self.name, self.user_id, self.team_id, anchor_date)
            .with_id(self.assignment_id);
        assignment.rule_id = Some(self.rule_id);
        assignment.end_date = end_date;
        assignment.enabled = self.is_enabled != 0;
        assignment.priority = self.priority;
        Ok(assignment)
    }
}

fn invalid(table: &'static str, err: &impl std::fmt::Display) -> PersistenceError {
    PersistenceError::InvalidRow {
        table,
        reason: err.to_string(),
    }
}
