// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation and pattern decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The pattern contains no days at all.
    EmptyPattern,
    /// The pattern is shorter than the minimum cycle length.
    TooShort {
        /// The offending length.
        length: usize,
        /// The minimum permitted length.
        min: usize,
    },
    /// The pattern is longer than the maximum cycle length.
    TooLong {
        /// The offending length.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Day numbers do not run `1..=length` in ascending order.
    NonSequential {
        /// Zero-based position in the day list.
        position: usize,
        /// The day number expected at that position.
        expected: usize,
        /// The day number actually found.
        found: u16,
    },
    /// A work day carries no shift identifier.
    MissingShiftReference {
        /// The cycle day lacking a shift.
        day_number: u16,
    },
    /// A work day references a shift that cannot be resolved.
    UnknownShiftReference {
        /// The cycle day referencing the shift.
        day_number: u16,
        /// The unresolved shift identifier.
        shift_id: String,
    },
    /// The anchor date lies too far in the past.
    StartDateTooEarly {
        /// The rejected anchor date.
        start_date: Date,
        /// The earliest accepted anchor date.
        earliest: Date,
    },
    /// The anchor date lies too far in the future.
    StartDateTooLate {
        /// The rejected anchor date.
        start_date: Date,
        /// The latest accepted anchor date.
        latest: Date,
    },
    /// The end date precedes the anchor date.
    InvalidEndDate {
        /// The assignment anchor date.
        anchor_date: Date,
        /// The rejected end date.
        end_date: Date,
    },
    /// Pattern name is empty or too long.
    InvalidName(String),
    /// A preview was requested for an unsupported number of days.
    InvalidPreviewLength {
        /// The requested day count.
        days: u32,
        /// The maximum permitted day count.
        max: u32,
    },
    /// The stored recurrence rule is not a custom pattern.
    NotCustomPattern,
    /// The stored custom pattern payload could not be decoded.
    CorruptPattern {
        /// Description of the defect.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Unknown assignment status string.
    InvalidStatus(String),
    /// Failed to parse a date or time from a string.
    DateParseError {
        /// The invalid input.
        input: String,
        /// The parsing error message.
        error: String,
    },
}

impl DomainError {
    /// Returns the stable machine-readable name of the rule this error reports.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::EmptyPattern => "empty_pattern",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::NonSequential { .. } => "non_sequential",
            Self::MissingShiftReference { .. } | Self::UnknownShiftReference { .. } => {
                "missing_shift_reference"
            }
            Self::StartDateTooEarly { .. } | Self::StartDateTooLate { .. } => {
                "start_date_out_of_range"
            }
            Self::InvalidEndDate { .. } => "invalid_end_date",
            Self::InvalidName(_) => "invalid_name",
            Self::InvalidPreviewLength { .. } => "invalid_preview_length",
            Self::NotCustomPattern => "not_custom_pattern",
            Self::CorruptPattern { .. } => "corrupt_pattern",
            Self::DateArithmeticOverflow { .. } => "date_arithmetic_overflow",
            Self::InvalidStatus(_) => "invalid_status",
            Self::DateParseError { .. } => "date_parse_error",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "Pattern must contain at least one day"),
            Self::TooShort { length, min } => {
                write!(f, "Pattern length {length} is below the minimum of {min} days")
            }
            Self::TooLong { length, max } => {
                write!(f, "Pattern length {length} exceeds the maximum of {max} days")
            }
            Self::NonSequential {
                position,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Pattern days must be numbered sequentially from 1: position {position} holds day {found}, expected day {expected}"
                )
            }
            Self::MissingShiftReference { day_number } => {
                write!(f, "Work day {day_number} does not reference a shift")
            }
            Self::UnknownShiftReference {
                day_number,
                shift_id,
            } => {
                write!(
                    f,
                    "Work day {day_number} references unknown shift '{shift_id}'"
                )
            }
            Self::StartDateTooEarly {
                start_date,
                earliest,
            } => {
                write!(
                    f,
                    "Start date {start_date} is too far in the past; earliest allowed is {earliest}"
                )
            }
            Self::StartDateTooLate { start_date, latest } => {
                write!(
                    f,
                    "Start date {start_date} is too far in the future; latest allowed is {latest}"
                )
            }
            Self::InvalidEndDate {
                anchor_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} must not precede the start date {anchor_date}"
                )
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPreviewLength { days, max } => {
                write!(
                    f,
                    "Invalid preview length: {days}. Must be between 0 and {max} days"
                )
            }
            Self::NotCustomPattern => {
                write!(f, "Recurrence rule does not describe a custom pattern")
            }
            Self::CorruptPattern { reason } => {
                write!(f, "Stored custom pattern is corrupt: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidStatus(value) => write!(f, "Invalid assignment status: {value}"),
            Self::DateParseError { input, error } => {
                write!(f, "Failed to parse '{input}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
