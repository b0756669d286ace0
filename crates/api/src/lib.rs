// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the recurring pattern engine.
//!
//! Request DTOs are parsed and translated into engine calls here, and every
//! engine failure is translated into an [`ApiError`] carrying a stable kind
//! and a human-readable message. Domain and core error types never cross
//! this boundary.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    create_pattern, delete_pattern, get_pattern, list_patterns, list_shifts, pattern_statistics,
    preview_pattern, resolve_schedule, resolve_schedule_range, update_pattern, upsert_shift,
    validate_pattern,
};
pub use request_response::{
    CreatePatternResponse, DeletePatternResponse, ListPatternsResponse, ListShiftsResponse,
    PatternDayInfo, PatternInfo, PatternStatisticsRequest, PatternStatisticsResponse,
    PreviewPatternRequest, PreviewPatternResponse, ResolveScheduleResponse, SavePatternRequest,
    ScheduleDayInfo, ScheduleRangeRequest, ScheduleRangeResponse, ScheduledDayInfo, ShiftInfo,
    UpdatePatternResponse, UpsertShiftRequest, ValidatePatternResponse,
};
