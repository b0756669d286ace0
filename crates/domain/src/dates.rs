// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar helpers shared by validation, resolution and the storage layer.
//!
//! Dates cross crate boundaries as ISO 8601 strings (`YYYY-MM-DD`) and
//! shift times as `HH:MM`. Everything inside the engine works on
//! `time::Date` and `time::Time`.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Month, Time};

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(input: &str) -> Result<Date, DomainError> {
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            input: input.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.to_string()
}

/// Parses a wall-clock time given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid time.
pub fn parse_time(input: &str) -> Result<Time, DomainError> {
    let parsed = if input.len() > 5 {
        Time::parse(input, format_description!("[hour]:[minute]:[second]"))
    } else {
        Time::parse(input, format_description!("[hour]:[minute]"))
    };

    parsed.map_err(|e| DomainError::DateParseError {
        input: input.to_string(),
        error: e.to_string(),
    })
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_time(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

/// Whole calendar days from `from` to `to`; negative when `to` precedes `from`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Shifts a date by a number of calendar years.
///
/// February 29 maps to February 28 when the target year is not a leap year.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the target year is out of range.
pub fn add_years(date: Date, years: i32) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {years} years to {date}"),
    };

    let target_year: i32 = date.year().checked_add(years).ok_or_else(overflow)?;

    match Date::from_calendar_date(target_year, date.month(), date.day()) {
        Ok(shifted) => Ok(shifted),
        Err(_) if date.month() == Month::February && date.day() == 29 => {
            Date::from_calendar_date(target_year, Month::February, 28).map_err(|_| overflow())
        }
        Err(_) => Err(overflow()),
    }
}
