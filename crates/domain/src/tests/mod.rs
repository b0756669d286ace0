// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error;
mod validation;

use crate::{Pattern, PatternDay, ShiftId};

/// Builds `[Work(A), Work(B), Rest]`.
pub fn create_three_day_pattern() -> Pattern {
    Pattern::new(vec![
        PatternDay::work(1, ShiftId::new("A")),
        PatternDay::work(2, ShiftId::new("B")),
        PatternDay::rest(3),
    ])
    .expect("valid three day pattern")
}

/// Builds a pattern of `length` days alternating work on shift `S` and rest.
pub fn create_alternating_pattern(length: u16) -> Pattern {
    let days: Vec<PatternDay> = (1..=length)
        .map(|n| {
            if n % 2 == 1 {
                PatternDay::work(n, ShiftId::new("S"))
            } else {
                PatternDay::rest(n)
            }
        })
        .collect();
    Pattern::new(days).expect("valid alternating pattern")
}
