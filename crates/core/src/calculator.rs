// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date resolution, previews and pattern statistics.
//!
//! Nothing here writes to storage. The only collaborator touched is the
//! shift lookup, which is read-only.

use crate::error::{CoreError, StoreError};
use crate::ports::ShiftLookup;
use shiftcycle_domain::{
    Assignment, DecodeMode, DomainError, Pattern, PatternDay, RecurrenceRule, Shift, ShiftId,
    WorkScheduleDay, days_between, decode_pattern, encode_pattern, pattern_day_on,
};
use std::collections::HashMap;
use time::Date;
use tracing::debug;

/// Longest span, in days, a preview or range resolution may cover.
pub const MAX_PREVIEW_DAYS: u32 = 366;

/// Resolves the shift (or rest) that applies on `date`.
///
/// Returns `Ok(None)` when `date` lies outside the assignment bounds. That is
/// "not applicable", not an error.
///
/// # Errors
///
/// - `NotFound` if a work day references a shift the lookup does not know
/// - `Read` if the lookup fails
pub fn resolve_shift_for_date<L: ShiftLookup + ?Sized>(
    lookup: &mut L,
    date: Date,
    assignment: &Assignment,
    pattern: &Pattern,
) -> Result<Option<WorkScheduleDay>, CoreError> {
    if !assignment.covers(date) {
        return Ok(None);
    }

    let Some(day) = pattern_day_on(pattern, assignment.anchor_date, date) else {
        return Ok(None);
    };

    debug!(
        %date,
        offset = days_between(assignment.anchor_date, date),
        day_number = day.day_number(),
        "Resolved cycle position"
    );

    match day.shift_id() {
        None => Ok(Some(WorkScheduleDay::rest(date, day.day_number()))),
        Some(shift_id) => {
            let shift: Shift = require_shift(lookup, shift_id)?;
            Ok(Some(WorkScheduleDay::work(date, day.day_number(), shift)))
        }
    }
}

/// Resolves every date in `[from, to]` that the assignment covers.
///
/// Dates outside the assignment bounds are skipped. `from > to` yields an
/// empty list.
///
/// # Errors
///
/// - `Validation(InvalidPreviewLength)` if the range spans more than
///   `MAX_PREVIEW_DAYS` days
/// - any error from [`resolve_shift_for_date`]
pub fn resolve_range<L: ShiftLookup + ?Sized>(
    lookup: &mut L,
    assignment: &Assignment,
    pattern: &Pattern,
    from: Date,
    to: Date,
) -> Result<Vec<WorkScheduleDay>, CoreError> {
    if from > to {
        return Ok(Vec::new());
    }

    let span: i64 = days_between(from, to) + 1;
    let days: u32 = check_span(span)?;

    let mut cached = CachedLookup::new(lookup);
    let mut resolved: Vec<WorkScheduleDay> = Vec::new();
    for date in dates_from(from, days)? {
        if let Some(day) = resolve_shift_for_date(&mut cached, date, assignment, pattern)? {
            resolved.push(day);
        }
    }
    Ok(resolved)
}

/// Builds the schedule a pattern would produce for `days` days from
/// `anchor_date`, without persisting anything.
///
/// A transient rule and an open-ended assignment anchored at `anchor_date`
/// stand in for the stored pair. The pattern is resolved as decoded from
/// that rule, so the preview shows exactly what saving would store. Neither
/// leaves this call. `days == 0` yields an empty list.
///
/// # Errors
///
/// - `Validation(InvalidPreviewLength)` if `days > MAX_PREVIEW_DAYS`
/// - `Decode` if the transient rule does not decode
/// - any error from [`resolve_shift_for_date`]
pub fn generate_preview<L: ShiftLookup + ?Sized>(
    lookup: &mut L,
    pattern: &Pattern,
    anchor_date: Date,
    days: u32,
) -> Result<Vec<WorkScheduleDay>, CoreError> {
    let days: u32 = check_span(i64::from(days))?;
    let rule: RecurrenceRule = encode_pattern(pattern);
    let stored: Pattern =
        decode_pattern(&rule, DecodeMode::Strict).map_err(CoreError::from_decode)?;
    let transient: Assignment = Assignment::new(String::new(), 0, String::new(), anchor_date);

    let mut cached = CachedLookup::new(lookup);
    let mut preview: Vec<WorkScheduleDay> = Vec::with_capacity(days as usize);
    for date in dates_from(anchor_date, days)? {
        if let Some(day) = resolve_shift_for_date(&mut cached, date, &transient, &stored)? {
            preview.push(day);
        }
    }
    Ok(preview)
}

/// Work/rest breakdown of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternStatistics {
    pub total_days: usize,
    pub work_days: usize,
    pub rest_days: usize,
    /// `work_days * 100 / total_days`, or `0.0` for an empty pattern.
    pub work_day_percentage: f64,
    /// Names of the shifts used, in order of first appearance.
    pub distinct_shift_names: Vec<String>,
}

/// Computes statistics for a pattern.
///
/// Shift names come from `shifts`; a shift missing from the list is
/// reported by its identifier. Each name appears once, in order of first
/// appearance.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_statistics(pattern: &Pattern, shifts: &[Shift]) -> PatternStatistics {
    let total_days: usize = pattern.days().len();
    let work_days: usize = pattern.work_day_count();
    let rest_days: usize = pattern.rest_day_count();

    let work_day_percentage: f64 = if total_days > 0 {
        work_days as f64 * 100.0 / total_days as f64
    } else {
        0.0
    };

    // Distinct shifts may share a display name
    let mut distinct_shift_names: Vec<String> = Vec::new();
    for id in pattern.distinct_shift_ids() {
        let name: String = shifts
            .iter()
            .find(|shift| shift.id() == id)
            .map_or_else(|| id.value().to_string(), |shift| shift.name().to_string());
        if !distinct_shift_names.contains(&name) {
            distinct_shift_names.push(name);
        }
    }

    PatternStatistics {
        total_days,
        work_days,
        rest_days,
        work_day_percentage,
        distinct_shift_names,
    }
}

/// Checks that every work day references a shift the lookup knows.
///
/// # Errors
///
/// - `Validation(UnknownShiftReference)` for the first unresolvable shift
/// - `Read` if the lookup fails
pub fn ensure_shifts_resolvable<L: ShiftLookup + ?Sized>(
    lookup: &mut L,
    days: &[PatternDay],
) -> Result<(), CoreError> {
    let mut cached = CachedLookup::new(lookup);
    for day in days {
        let Some(shift_id) = day.shift_id() else {
            continue;
        };
        if cached.find_shift(shift_id).map_err(read_error)?.is_none() {
            return Err(CoreError::Validation(
                DomainError::UnknownShiftReference {
                    day_number: day.day_number(),
                    shift_id: shift_id.value().to_string(),
                },
            ));
        }
    }
    Ok(())
}

fn require_shift<L: ShiftLookup + ?Sized>(
    lookup: &mut L,
    shift_id: &ShiftId,
) -> Result<Shift, CoreError> {
    lookup
        .find_shift(shift_id)
        .map_err(read_error)?
        .ok_or_else(|| CoreError::not_found("Shift", shift_id))
}

fn read_error(err: StoreError) -> CoreError {
    CoreError::Read(err.to_string())
}

fn check_span(span: i64) -> Result<u32, CoreError> {
    match u32::try_from(span) {
        Ok(days) if days <= MAX_PREVIEW_DAYS => Ok(days),
        _ => Err(CoreError::Validation(DomainError::InvalidPreviewLength {
            days: u32::try_from(span).unwrap_or(u32::MAX),
            max: MAX_PREVIEW_DAYS,
        })),
    }
}

/// The `count` consecutive dates starting at `start`.
fn dates_from(start: Date, count: u32) -> Result<Vec<Date>, CoreError> {
    let mut dates: Vec<Date> = Vec::with_capacity(count as usize);
    let mut current: Date = start;
    for i in 0..count {
        if i > 0 {
            current = current.next_day().ok_or_else(|| {
                CoreError::Validation(DomainError::DateArithmeticOverflow {
                    operation: format!("stepping past {current}"),
                })
            })?;
        }
        dates.push(current);
    }
    Ok(dates)
}

/// Memoizes lookups for the duration of one calculation.
struct CachedLookup<'a, L: ShiftLookup + ?Sized> {
    inner: &'a mut L,
    shifts: HashMap<ShiftId, Option<Shift>>,
}

impl<'a, L: ShiftLookup + ?Sized> CachedLookup<'a, L> {
    fn new(inner: &'a mut L) -> Self {
        Self {
            inner,
            shifts: HashMap::new(),
        }
    }
}

impl<L: ShiftLookup + ?Sized> ShiftLookup for CachedLookup<'_, L> {
    fn find_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, StoreError> {
        if let Some(cached) = self.shifts.get(shift_id) {
            return Ok(cached.clone());
        }
        let found: Option<Shift> = self.inner.find_shift(shift_id)?;
        self.shifts.insert(shift_id.clone(), found.clone());
        Ok(found)
    }

    fn list_shifts(&mut self) -> Result<Vec<Shift>, StoreError> {
        self.inner.list_shifts()
    }
}
