// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence rule queries.

use diesel::SqliteConnection;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use shiftcycle_domain::{PatternDay, RecurrenceRule};
use tracing::debug;

use crate::data_models::{PatternDayRow, RuleRow};
use crate::diesel_schema::{pattern_days, recurrence_rules, schedule_assignments};
use crate::error::PersistenceError;

/// Retrieves a recurrence rule by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
/// Returns `Ok(None)` if the rule is not found.
pub fn get_rule(
    conn: &mut SqliteConnection,
    rule_id: i64,
) -> Result<Option<RecurrenceRule>, PersistenceError> {
    debug!(rule_id, "Looking up recurrence rule");

    recurrence_rules::table
        .filter(recurrence_rules::rule_id.eq(rule_id))
        .select(RuleRow::as_select())
        .first(conn)
        .optional()?
        .map(RuleRow::into_rule)
        .transpose()
}

/// Retrieves the structured day rows of a rule, ordered by day number.
///
/// Rules written before day rows existed return an empty list.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn get_pattern_days(
    conn: &mut SqliteConnection,
    rule_id: i64,
) -> Result<Vec<PatternDay>, PersistenceError> {
    pattern_days::table
        .filter(pattern_days::rule_id.eq(rule_id))
        .order(pattern_days::day_number.asc())
        .select(PatternDayRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PatternDayRow::into_pattern_day)
        .collect()
}

/// Returns true if any assignment references the rule.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_rule_referenced(conn: &mut SqliteConnection, rule_id: i64) -> Result<bool, PersistenceError> {
    let referenced: bool = diesel::select(exists(
        schedule_assignments::table.filter(schedule_assignments::rule_id.eq(rule_id)),
    ))
    .get_result(conn)?;
    Ok(referenced)
}

/// Counts stored recurrence rules.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_rules(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(recurrence_rules::table.select(count_star()).first(conn)?)
}
