// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as `YYYY-MM-DD` strings and shift times as
//! `HH:MM`. Parsing happens in the handlers so malformed input is reported
//! against the field it came from.

use serde::{Deserialize, Serialize};

/// One cycle day as supplied or returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDayInfo {
    /// 1-based position in the cycle.
    pub day_number: u16,
    /// The shift worked on this day. Absent on rest days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<String>,
}

/// API request to create or replace a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePatternRequest {
    pub name: String,
    pub days: Vec<PatternDayInfo>,
    /// Date on which cycle day 1 occurs.
    pub anchor_date: String,
    /// Last date (inclusive) the pattern applies. Open-ended if absent.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Defaults to `true`.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Defaults to `0`. Higher wins when assignments overlap.
    #[serde(default)]
    pub priority: Option<i32>,
}

/// A stored pattern together with its assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInfo {
    pub assignment_id: i64,
    pub rule_id: i64,
    pub name: String,
    pub user_id: i64,
    pub team_id: String,
    pub anchor_date: String,
    pub end_date: Option<String>,
    pub enabled: bool,
    pub priority: i32,
    /// Effective status as of today: `pending`, `active`, `expired` or `inactive`.
    pub status: String,
    pub pattern_length: u16,
    pub days: Vec<PatternDayInfo>,
}

/// API response for a successful pattern creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePatternResponse {
    pub pattern: PatternInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful pattern update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePatternResponse {
    pub pattern: PatternInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful pattern deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePatternResponse {
    pub assignment_id: i64,
    /// Whether the underlying rule was removed as well.
    pub rule_deleted: bool,
    /// A success message.
    pub message: String,
}

/// API response listing the current user's patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatternsResponse {
    pub patterns: Vec<PatternInfo>,
}

/// API response for a successful dry-run validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatePatternResponse {
    pub pattern_length: u16,
    pub work_days: usize,
    pub rest_days: usize,
    pub message: String,
}

/// A shift definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInfo {
    pub shift_id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Whether the shift ends on the following calendar day.
    #[serde(default)]
    pub crosses_midnight: bool,
}

/// API request to add or replace a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertShiftRequest {
    pub shift_id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// API response listing the shift catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftsResponse {
    pub shifts: Vec<ShiftInfo>,
}

/// One resolved calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDayInfo {
    pub date: String,
    pub day_number: u16,
    pub is_rest_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftInfo>,
}

/// API request to preview an unsaved pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPatternRequest {
    pub days: Vec<PatternDayInfo>,
    pub anchor_date: String,
    /// Number of consecutive dates to resolve, at most 366.
    pub preview_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPatternResponse {
    pub days: Vec<ScheduleDayInfo>,
}

/// API request for statistics over an unsaved pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternStatisticsRequest {
    pub days: Vec<PatternDayInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStatisticsResponse {
    pub total_days: usize,
    pub work_days: usize,
    pub rest_days: usize,
    pub work_day_percentage: f64,
    pub distinct_shift_names: Vec<String>,
}

/// The shift scheduled for the current user on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDayInfo {
    pub assignment_id: i64,
    pub pattern_name: String,
    pub day: ScheduleDayInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveScheduleResponse {
    pub date: String,
    /// Absent when no assignment covers the date.
    pub scheduled: Option<ScheduledDayInfo>,
}

/// API request to resolve one assignment over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRangeRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRangeResponse {
    pub assignment_id: i64,
    pub days: Vec<ScheduleDayInfo>,
}
