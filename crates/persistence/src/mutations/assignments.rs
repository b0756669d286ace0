// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule assignment mutations.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use shiftcycle_domain::{Assignment, format_date};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::schedule_assignments;
use crate::error::PersistenceError;

fn required_rule_id(assignment: &Assignment) -> Result<i64, PersistenceError> {
    assignment.rule_id.ok_or_else(|| PersistenceError::InvalidRow {
        table: "schedule_assignments",
        reason: String::from("assignment does not reference a recurrence rule"),
    })
}

/// Inserts a new assignment and returns its ID.
///
/// # Errors
///
/// Returns an error if the assignment has no rule or the insert fails.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    assignment: &Assignment,
) -> Result<i64, PersistenceError> {
    let rule_id: i64 = required_rule_id(assignment)?;

    diesel::insert_into(schedule_assignments::table)
        .values((
            schedule_assignments::name.eq(&assignment.name),
            schedule_assignments::user_id.eq(assignment.user_id),
            schedule_assignments::team_id.eq(&assignment.team_id),
            schedule_assignments::rule_id.eq(rule_id),
            schedule_assignments::anchor_date.eq(format_date(assignment.anchor_date)),
            schedule_assignments::end_date.eq(assignment.end_date.map(format_date)),
            schedule_assignments::is_enabled.eq(i32::from(assignment.enabled)),
            schedule_assignments::priority.eq(assignment.priority),
        ))
        .execute(conn)?;

    let assignment_id: i64 = conn.get_last_insert_rowid()?;
    info!(assignment_id, rule_id, user_id = assignment.user_id, "Stored assignment");

    Ok(assignment_id)
}

/// Overwrites an existing assignment.
///
/// # Errors
///
/// Returns `NotFound` if no assignment has the given ID, or a database error
/// if the update fails.
pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    assignment: &Assignment,
) -> Result<(), PersistenceError> {
    let rule_id: i64 = required_rule_id(assignment)?;

    let updated: usize = diesel::update(schedule_assignments::table)
        .filter(schedule_assignments::assignment_id.eq(assignment_id))
        .set((
            schedule_assignments::name.eq(&assignment.name),
            schedule_assignments::user_id.eq(assignment.user_id),
            schedule_assignments::team_id.eq(&assignment.team_id),
            schedule_assignments::rule_id.eq(rule_id),
            schedule_assignments::anchor_date.eq(format_date(assignment.anchor_date)),
            schedule_assignments::end_date.eq(assignment.end_date.map(format_date)),
            schedule_assignments::is_enabled.eq(i32::from(assignment.enabled)),
            schedule_assignments::priority.eq(assignment.priority),
            schedule_assignments::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }

    info!(assignment_id, rule_id, "Updated assignment");
    Ok(())
}

/// Deletes an assignment. The rule it referenced is left alone.
///
/// # Errors
///
/// Returns `NotFound` if no assignment has the given ID.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<(), PersistenceError> {
    debug!(assignment_id, "Deleting assignment");

    let deleted: usize = diesel::delete(schedule_assignments::table)
        .filter(schedule_assignments::assignment_id.eq(assignment_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }

    Ok(())
}
