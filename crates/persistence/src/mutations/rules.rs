// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence rule mutations.
//!
//! A rule is written as its encoded description plus one structured row per
//! cycle day. Both land in the same transaction, so a rule never exists
//! without its day rows.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftcycle_domain::{Pattern, RecurrenceRule, ShiftId};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{pattern_days, recurrence_rules};
use crate::error::PersistenceError;

/// Inserts a recurrence rule together with its day rows.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `rule` - The encoded rule; any ID it carries is ignored
/// * `pattern` - The decoded pattern the rule encodes
///
/// # Errors
///
/// Returns an error if either insert fails. Nothing is written in that case.
pub fn insert_rule(
    conn: &mut SqliteConnection,
    rule: &RecurrenceRule,
    pattern: &Pattern,
) -> Result<RecurrenceRule, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(recurrence_rules::table)
            .values((
                recurrence_rules::pattern_length.eq(i32::from(rule.pattern_length())),
                recurrence_rules::description.eq(rule.description()),
            ))
            .execute(conn)?;

        let rule_id: i64 = conn.get_last_insert_rowid()?;

        let rows: Vec<_> = pattern
            .days()
            .iter()
            .map(|day| {
                (
                    pattern_days::rule_id.eq(rule_id),
                    pattern_days::day_number.eq(i32::from(day.day_number())),
                    pattern_days::shift_id.eq(day.shift_id().map(ShiftId::value)),
                )
            })
            .collect();

        diesel::insert_into(pattern_days::table)
            .values(&rows)
            .execute(conn)?;

        info!(rule_id, length = pattern.length(), "Stored recurrence rule");

        Ok(RecurrenceRule::with_id(
            rule_id,
            rule.pattern_length(),
            rule.description().to_string(),
        ))
    })
}

/// Deletes a recurrence rule. Its day rows go with it.
///
/// # Errors
///
/// Returns `NotFound` if no such rule exists, or a database error if an
/// assignment still references it.
pub fn delete_rule(conn: &mut SqliteConnection, rule_id: i64) -> Result<(), PersistenceError> {
    debug!(rule_id, "Deleting recurrence rule");

    let deleted: usize = diesel::delete(recurrence_rules::table)
        .filter(recurrence_rules::rule_id.eq(rule_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Recurrence rule {rule_id}"
        )));
    }

    Ok(())
}

/// Inserts a rule carrying only its encoded description.
///
/// This is the layout rules had before structured day rows existed; reads
/// fall back to decoding the description.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_description_only_rule(
    conn: &mut SqliteConnection,
    rule: &RecurrenceRule,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(recurrence_rules::table)
        .values((
            recurrence_rules::pattern_length.eq(i32::from(rule.pattern_length())),
            recurrence_rules::description.eq(rule.description()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
