// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for recurring work patterns.
//!
//! Everything in this crate is pure: no I/O, no clocks. "Today" is always
//! passed in by the caller.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cycle;
mod dates;
mod error;
mod recurrence;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use cycle::{cycle_index, pattern_day_on};
pub use dates::{add_years, days_between, format_date, format_time, parse_date, parse_time};
pub use error::DomainError;
pub use recurrence::{
    CUSTOM_PATTERN_SENTINEL, DecodeMode, PAYLOAD_VERSION, decode_pattern, encode_description,
    encode_pattern, is_custom_pattern,
};
pub use status::{AssignmentStatus, EffectiveStatus};

// Re-export public types
pub use types::{
    Assignment, MAX_PATTERN_LENGTH, MIN_PATTERN_LENGTH, Pattern, PatternDay, RecurrenceRule, Shift,
    ShiftId, WorkScheduleDay,
};
pub use validation::{
    MAX_PATTERN_NAME_LENGTH, MAX_YEARS_IN_FUTURE, MAX_YEARS_IN_PAST, validate_end_date,
    validate_pattern_configuration, validate_pattern_days, validate_pattern_name,
    validate_start_date,
};
