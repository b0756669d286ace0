// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pattern and assignment validation rules.
//!
//! All checks are pure and deterministic. Pattern rules are held in an
//! ordered table and evaluated first-failure-wins, so adding a rule means
//! adding a row rather than growing a conditional chain.

use crate::dates::add_years;
use crate::error::DomainError;
use crate::types::{MAX_PATTERN_LENGTH, MIN_PATTERN_LENGTH, PatternDay, ShiftId};
use time::Date;
use tracing::debug;

/// Maximum length, in characters, of a pattern name.
pub const MAX_PATTERN_NAME_LENGTH: usize = 100;

/// How many years before today an anchor date may lie.
pub const MAX_YEARS_IN_PAST: i32 = 2;

/// How many years after today an anchor date may lie.
pub const MAX_YEARS_IN_FUTURE: i32 = 3;

/// A named structural rule over a day list.
type PatternRule = (&'static str, fn(&[PatternDay]) -> Result<(), DomainError>);

/// Pattern rules in evaluation order.
const PATTERN_RULES: &[PatternRule] = &[
    ("non_empty", check_non_empty),
    ("min_length", check_min_length),
    ("max_length", check_max_length),
    ("sequential", check_sequential),
    ("shift_reference", check_shift_references),
];

fn check_non_empty(days: &[PatternDay]) -> Result<(), DomainError> {
    if days.is_empty() {
        return Err(DomainError::EmptyPattern);
    }
    Ok(())
}

fn check_min_length(days: &[PatternDay]) -> Result<(), DomainError> {
    if days.len() < MIN_PATTERN_LENGTH {
        return Err(DomainError::TooShort {
            length: days.len(),
            min: MIN_PATTERN_LENGTH,
        });
    }
    Ok(())
}

fn check_max_length(days: &[PatternDay]) -> Result<(), DomainError> {
    if days.len() > MAX_PATTERN_LENGTH {
        return Err(DomainError::TooLong {
            length: days.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }
    Ok(())
}

fn check_sequential(days: &[PatternDay]) -> Result<(), DomainError> {
    // Rule: day numbers are exactly 1..=length in ascending order
    for (position, day) in days.iter().enumerate() {
        let expected: usize = position + 1;
        if usize::from(day.day_number()) != expected {
            return Err(DomainError::NonSequential {
                position,
                expected,
                found: day.day_number(),
            });
        }
    }
    Ok(())
}

fn check_shift_references(days: &[PatternDay]) -> Result<(), DomainError> {
    // Rule: every work day names a shift
    for day in days {
        if day.shift_id().is_some_and(ShiftId::is_blank) {
            return Err(DomainError::MissingShiftReference {
                day_number: day.day_number(),
            });
        }
    }
    Ok(())
}

/// Validates the structural invariants of a day list.
///
/// Whether referenced shifts actually exist needs the shift catalogue and
/// is checked by the engine, not here.
///
/// # Errors
///
/// Returns the first violated rule:
/// - `EmptyPattern` if there are no days
/// - `TooShort` / `TooLong` if the length is outside `1..=365`
/// - `NonSequential` if day numbers are not exactly `1..=length` in order
/// - `MissingShiftReference` if a work day has a blank shift identifier
pub fn validate_pattern_days(days: &[PatternDay]) -> Result<(), DomainError> {
    for (name, rule) in PATTERN_RULES {
        if let Err(err) = rule(days) {
            debug!(rule = *name, %err, "Pattern rule rejected day list");
            return Err(err);
        }
    }
    Ok(())
}

/// Validates that an anchor date is within the accepted window around today.
///
/// The window is `[today - 2 years, today + 3 years]`, both ends inclusive.
///
/// # Errors
///
/// Returns `StartDateTooEarly` or `StartDateTooLate` when outside the window,
/// or `DateArithmeticOverflow` if the window bounds cannot be computed.
pub fn validate_start_date(start_date: Date, today: Date) -> Result<(), DomainError> {
    let earliest: Date = add_years(today, -MAX_YEARS_IN_PAST)?;
    let latest: Date = add_years(today, MAX_YEARS_IN_FUTURE)?;

    if start_date < earliest {
        return Err(DomainError::StartDateTooEarly {
            start_date,
            earliest,
        });
    }

    if start_date > latest {
        return Err(DomainError::StartDateTooLate { start_date, latest });
    }

    Ok(())
}

/// Validates a pattern name.
///
/// # Errors
///
/// Returns `InvalidName` if the name is blank or longer than 100 characters.
pub fn validate_pattern_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let length: usize = name.chars().count();
    if length > MAX_PATTERN_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name must be at most {MAX_PATTERN_NAME_LENGTH} characters, got {length}"
        )));
    }

    Ok(())
}

/// Validates that an optional end date does not precede the anchor date.
///
/// # Errors
///
/// Returns `InvalidEndDate` if `end_date < anchor_date`.
pub fn validate_end_date(anchor_date: Date, end_date: Option<Date>) -> Result<(), DomainError> {
    match end_date {
        Some(end_date) if end_date < anchor_date => Err(DomainError::InvalidEndDate {
            anchor_date,
            end_date,
        }),
        _ => Ok(()),
    }
}

/// Validates a complete pattern configuration before it is saved.
///
/// Runs the pattern rules, then the start date window, then the name, and
/// stops at the first failure.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_pattern_configuration(
    days: &[PatternDay],
    start_date: Date,
    name: &str,
    today: Date,
) -> Result<(), DomainError> {
    validate_pattern_days(days)?;
    validate_start_date(start_date, today)?;
    validate_pattern_name(name)?;
    Ok(())
}
