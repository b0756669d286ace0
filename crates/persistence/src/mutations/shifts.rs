// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift catalogue mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use shiftcycle_domain::{Shift, format_time};
use tracing::info;

use crate::diesel_schema::shifts;
use crate::error::PersistenceError;

/// Inserts a shift, or replaces the definition of an existing one.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn upsert_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<(), PersistenceError> {
    info!(shift_id = %shift.id(), name = shift.name(), "Upserting shift");

    diesel::insert_into(shifts::table)
        .values((
            shifts::shift_id.eq(shift.id().value()),
            shifts::name.eq(shift.name()),
            shifts::start_time.eq(format_time(shift.start_time())),
            shifts::end_time.eq(format_time(shift.end_time())),
        ))
        .on_conflict(shifts::shift_id)
        .do_update()
        .set((
            shifts::name.eq(excluded(shifts::name)),
            shifts::start_time.eq(excluded(shifts::start_time)),
            shifts::end_time.eq(excluded(shifts::end_time)),
        ))
        .execute(conn)?;

    Ok(())
}
