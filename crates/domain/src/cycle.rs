// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle position arithmetic.
//!
//! Cycle day 1 falls on the anchor date. The position of any other date is
//! the whole-day offset from the anchor, reduced with a floored modulo so
//! that dates before the anchor still land in `[0, length)`.

use crate::dates::days_between;
use crate::types::{Pattern, PatternDay};
use time::Date;

/// Reduces a day offset to a zero-based cycle index.
///
/// Uses floored (Euclidean) modulo, so negative offsets count backwards
/// from the end of the cycle instead of producing a negative index.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cycle_index(offset: i64, length: u16) -> usize {
    if length == 0 {
        return 0;
    }
    // rem_euclid with a positive divisor is always in [0, length)
    offset.rem_euclid(i64::from(length)) as usize
}

/// Returns the pattern day that falls on `date` for a cycle anchored at `anchor_date`.
///
/// No bounds are applied; callers decide whether `date` is in range.
#[must_use]
pub fn pattern_day_on(pattern: &Pattern, anchor_date: Date, date: Date) -> Option<&PatternDay> {
    let index: usize = cycle_index(days_between(anchor_date, date), pattern.length());
    pattern.days().get(index)
}
