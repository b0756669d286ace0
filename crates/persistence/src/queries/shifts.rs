// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift catalogue queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftcycle_domain::Shift;
use tracing::debug;

use crate::data_models::ShiftRow;
use crate::diesel_schema::shifts;
use crate::error::PersistenceError;

/// Retrieves a shift by identifier.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
/// Returns `Ok(None)` if the shift is not found.
pub fn get_shift(conn: &mut SqliteConnection, shift_id: &str) -> Result<Option<Shift>, PersistenceError> {
    debug!(shift_id, "Looking up shift");

    shifts::table
        .filter(shifts::shift_id.eq(shift_id))
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?
        .map(ShiftRow::into_shift)
        .transpose()
}

/// Lists all shifts ordered by identifier.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_shifts(conn: &mut SqliteConnection) -> Result<Vec<Shift>, PersistenceError> {
    shifts::table
        .order(shifts::shift_id.asc())
        .select(ShiftRow::as_select())
        .load(conn)?
        .into_iter()
        .map(ShiftRow::into_shift)
        .collect()
}
