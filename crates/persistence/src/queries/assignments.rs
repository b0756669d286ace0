// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule assignment queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftcycle_domain::Assignment;
use tracing::debug;

use crate::data_models::AssignmentRow;
use crate::diesel_schema::schedule_assignments;
use crate::error::PersistenceError;

/// Retrieves an assignment by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
/// Returns `Ok(None)` if the assignment is not found.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<Option<Assignment>, PersistenceError> {
    debug!(assignment_id, "Looking up assignment");

    schedule_assignments::table
        .filter(schedule_assignments::assignment_id.eq(assignment_id))
        .select(AssignmentRow::as_select())
        .first(conn)
        .optional()?
        .map(AssignmentRow::into_assignment)
        .transpose()
}

/// Lists a user's assignments ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_assignments_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Assignment>, PersistenceError> {
    schedule_assignments::table
        .filter(schedule_assignments::user_id.eq(user_id))
        .order(schedule_assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AssignmentRow::into_assignment)
        .collect()
}
