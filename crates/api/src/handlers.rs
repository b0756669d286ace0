// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Mutations are submitted to the [`MutationExecutor`] and awaited; reads
//! run directly against the store the caller has locked.

use shiftcycle::{
    Command, CoreError, MutationExecutor, MutationOutcome, PatternDraft, PatternEngine,
    PatternStatistics, ResolvedSchedule, StoredPattern,
};
use shiftcycle_domain::{
    Pattern, PatternDay, Shift, ShiftId, WorkScheduleDay, format_date, format_time, parse_date,
    parse_time,
};
use shiftcycle_persistence::{Persistence, PersistenceError};
use time::Date;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::ApiError;
use crate::request_response::{
    CreatePatternResponse, DeletePatternResponse, ListPatternsResponse, ListShiftsResponse,
    PatternDayInfo, PatternInfo, PatternStatisticsRequest, PatternStatisticsResponse,
    PreviewPatternRequest, PreviewPatternResponse, ResolveScheduleResponse, SavePatternRequest,
    ScheduleDayInfo, ScheduleRangeRequest, ScheduleRangeResponse, ScheduledDayInfo, ShiftInfo,
    UpdatePatternResponse, UpsertShiftRequest, ValidatePatternResponse,
};

// ========================================================================
// Conversions
// ========================================================================

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: e.to_string(),
    })
}

fn parse_optional_date_field(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(|v| parse_date_field(field, v)).transpose()
}

fn to_pattern_days(days: &[PatternDayInfo]) -> Vec<PatternDay> {
    days.iter()
        .map(|day| match &day.shift_id {
            Some(shift_id) => PatternDay::work(day.day_number, ShiftId::new(shift_id)),
            None => PatternDay::rest(day.day_number),
        })
        .collect()
}

fn to_day_info(day: &PatternDay) -> PatternDayInfo {
    PatternDayInfo {
        day_number: day.day_number(),
        shift_id: day.shift_id().map(|id| id.value().to_string()),
    }
}

fn to_draft(request: &SavePatternRequest) -> Result<PatternDraft, ApiError> {
    let anchor_date: Date = parse_date_field("anchor_date", &request.anchor_date)?;
    let end_date: Option<Date> = parse_optional_date_field("end_date", request.end_date.as_deref())?;

    let mut draft: PatternDraft = PatternDraft::new(
        request.name.clone(),
        to_pattern_days(&request.days),
        anchor_date,
    );
    draft.end_date = end_date;
    draft.enabled = request.enabled.unwrap_or(true);
    draft.priority = request.priority.unwrap_or(0);
    Ok(draft)
}

fn to_shift_info(shift: &Shift) -> ShiftInfo {
    ShiftInfo {
        shift_id: shift.id().value().to_string(),
        name: shift.name().to_string(),
        start_time: format_time(shift.start_time()),
        end_time: format_time(shift.end_time()),
        crosses_midnight: shift.crosses_midnight(),
    }
}

fn to_schedule_day_info(day: &WorkScheduleDay) -> ScheduleDayInfo {
    ScheduleDayInfo {
        date: format_date(day.date),
        day_number: day.day_number,
        is_rest_day: day.is_rest_day(),
        shift: day.shift.as_ref().map(to_shift_info),
    }
}

fn to_pattern_info(stored: &StoredPattern, today: Date) -> PatternInfo {
    let assignment = &stored.assignment;
    PatternInfo {
        assignment_id: assignment.assignment_id().unwrap_or_default(),
        rule_id: stored.rule.rule_id().unwrap_or_default(),
        name: assignment.name.clone(),
        user_id: assignment.user_id,
        team_id: assignment.team_id.clone(),
        anchor_date: format_date(assignment.anchor_date),
        end_date: assignment.end_date.map(format_date),
        enabled: assignment.enabled,
        priority: assignment.priority,
        status: assignment.effective_status(today).as_str().to_string(),
        pattern_length: stored.pattern.length(),
        days: stored.pattern.days().iter().map(to_day_info).collect(),
    }
}

fn storage_failure(operation: &'static str, err: &PersistenceError) -> ApiError {
    ApiError::StorageFailure {
        operation,
        message: err.to_string(),
    }
}

async fn await_mutation(
    handle: JoinHandle<Result<MutationOutcome, CoreError>>,
) -> Result<MutationOutcome, ApiError> {
    let result: Result<MutationOutcome, CoreError> =
        handle.await.map_err(|e| ApiError::Internal {
            message: format!("Mutation task failed: {e}"),
        })?;
    Ok(result?)
}

fn unexpected_outcome(outcome: &MutationOutcome) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected mutation outcome: {outcome:?}"),
    }
}

// ========================================================================
// Shifts
// ========================================================================

/// Adds a shift to the catalogue or replaces an existing definition.
///
/// # Errors
///
/// - `InvalidInput` if the identifier or name is blank, or a time is malformed
/// - `StorageFailure` if the write fails
pub fn upsert_shift(
    persistence: &mut Persistence,
    request: &UpsertShiftRequest,
) -> Result<ShiftInfo, ApiError> {
    let shift_id: ShiftId = ShiftId::new(&request.shift_id);
    if shift_id.is_blank() {
        return Err(ApiError::InvalidInput {
            field: String::from("shift_id"),
            message: String::from("Shift identifier cannot be empty"),
        });
    }
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Shift name cannot be empty"),
        });
    }

    let start_time = parse_time(&request.start_time).map_err(|e| ApiError::InvalidInput {
        field: String::from("start_time"),
        message: e.to_string(),
    })?;
    let end_time = parse_time(&request.end_time).map_err(|e| ApiError::InvalidInput {
        field: String::from("end_time"),
        message: e.to_string(),
    })?;

    let shift: Shift = Shift::new(shift_id, request.name.trim().to_string(), start_time, end_time);
    persistence
        .upsert_shift(&shift)
        .map_err(|e| storage_failure("create", &e))?;

    Ok(to_shift_info(&shift))
}

/// Lists the shift catalogue.
///
/// # Errors
///
/// Returns `StorageFailure` if the read fails.
pub fn list_shifts(persistence: &mut Persistence) -> Result<ListShiftsResponse, ApiError> {
    let shifts: Vec<Shift> = persistence
        .list_shifts()
        .map_err(|e| storage_failure("read", &e))?;

    Ok(ListShiftsResponse {
        shifts: shifts.iter().map(to_shift_info).collect(),
    })
}

// ========================================================================
// Pattern mutations
// ========================================================================

/// Validates a pattern without saving it.
///
/// # Errors
///
/// Returns the first violated rule, or `StorageFailure` if the shift lookup fails.
pub fn validate_pattern(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    request: &SavePatternRequest,
) -> Result<ValidatePatternResponse, ApiError> {
    let draft: PatternDraft = to_draft(request)?;
    let pattern: Pattern = engine.validate_draft(persistence, &draft)?;

    Ok(ValidatePatternResponse {
        pattern_length: pattern.length(),
        work_days: pattern.work_day_count(),
        rest_days: pattern.rest_day_count(),
        message: format!("Pattern '{}' is valid", draft.name),
    })
}

/// Saves a new pattern and assigns it to the current user.
///
/// # Errors
///
/// - `InvalidInput` / `DomainRuleViolation` if validation fails
/// - `StorageFailure` with operation `create` if the write fails
pub async fn create_pattern(
    executor: &MutationExecutor<Persistence>,
    request: &SavePatternRequest,
) -> Result<CreatePatternResponse, ApiError> {
    let draft: PatternDraft = to_draft(request)?;
    info!(name = %draft.name, "Creating pattern");

    let outcome = await_mutation(executor.submit(Command::CreatePattern(draft))).await?;
    let MutationOutcome::Created(stored) = outcome else {
        return Err(unexpected_outcome(&outcome));
    };

    let pattern: PatternInfo = to_pattern_info(&stored, executor.engine().today());
    Ok(CreatePatternResponse {
        message: format!(
            "Created pattern '{}' with {} days",
            pattern.name, pattern.pattern_length
        ),
        pattern,
    })
}

/// Replaces the pattern and bounds of an existing assignment.
///
/// # Errors
///
/// - `ResourceNotFound` if the assignment does not exist for the current user
/// - `InvalidInput` / `DomainRuleViolation` if validation fails
/// - `StorageFailure` with operation `update` if the write fails
pub async fn update_pattern(
    executor: &MutationExecutor<Persistence>,
    assignment_id: i64,
    request: &SavePatternRequest,
) -> Result<UpdatePatternResponse, ApiError> {
    let draft: PatternDraft = to_draft(request)?;
    info!(assignment_id, name = %draft.name, "Updating pattern");

    let outcome = await_mutation(executor.submit(Command::UpdatePattern {
        assignment_id,
        draft,
    }))
    .await?;
    let MutationOutcome::Updated(stored) = outcome else {
        return Err(unexpected_outcome(&outcome));
    };

    let pattern: PatternInfo = to_pattern_info(&stored, executor.engine().today());
    Ok(UpdatePatternResponse {
        message: format!("Updated pattern '{}'", pattern.name),
        pattern,
    })
}

/// Removes an assignment, and its rule if nothing else references it.
///
/// # Errors
///
/// - `ResourceNotFound` if the assignment does not exist for the current user
/// - `StorageFailure` with operation `delete` if the delete fails
pub async fn delete_pattern(
    executor: &MutationExecutor<Persistence>,
    assignment_id: i64,
) -> Result<DeletePatternResponse, ApiError> {
    info!(assignment_id, "Deleting pattern");

    let outcome =
        await_mutation(executor.submit(Command::DeletePattern { assignment_id })).await?;
    let MutationOutcome::Deleted {
        assignment_id,
        rule_deleted,
    } = outcome
    else {
        return Err(unexpected_outcome(&outcome));
    };

    Ok(DeletePatternResponse {
        assignment_id,
        rule_deleted,
        message: format!("Deleted pattern assignment {assignment_id}"),
    })
}

// ========================================================================
// Pattern reads
// ========================================================================

/// Loads one of the current user's patterns.
///
/// # Errors
///
/// - `ResourceNotFound` if the assignment does not exist for the current user
/// - `DomainRuleViolation` if the rule is not a custom pattern
/// - `UnreadablePattern` if the stored pattern is corrupt
pub fn get_pattern(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    assignment_id: i64,
) -> Result<PatternInfo, ApiError> {
    let stored: StoredPattern = engine.load_pattern(persistence, assignment_id)?;
    Ok(to_pattern_info(&stored, engine.today()))
}

/// Lists the current user's patterns ordered by assignment ID.
///
/// # Errors
///
/// Same as [`get_pattern`], for any listed assignment.
pub fn list_patterns(
    persistence: &mut Persistence,
    engine: &PatternEngine,
) -> Result<ListPatternsResponse, ApiError> {
    let today: Date = engine.today();
    let patterns: Vec<PatternInfo> = engine
        .list_patterns_for_current_user(persistence)?
        .iter()
        .map(|stored| to_pattern_info(stored, today))
        .collect();

    Ok(ListPatternsResponse { patterns })
}

/// Previews an unsaved pattern. Nothing is written.
///
/// # Errors
///
/// - `InvalidInput` if the anchor date is malformed or `preview_days` exceeds 366
/// - `DomainRuleViolation` if the days are malformed or a shift is unknown
pub fn preview_pattern(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    request: &PreviewPatternRequest,
) -> Result<PreviewPatternResponse, ApiError> {
    let anchor_date: Date = parse_date_field("anchor_date", &request.anchor_date)?;
    let days: Vec<WorkScheduleDay> = engine.preview(
        persistence,
        to_pattern_days(&request.days),
        anchor_date,
        request.preview_days,
    )?;

    Ok(PreviewPatternResponse {
        days: days.iter().map(to_schedule_day_info).collect(),
    })
}

/// Computes statistics for an unsaved pattern.
///
/// # Errors
///
/// Returns `DomainRuleViolation` if the days are malformed.
pub fn pattern_statistics(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    request: &PatternStatisticsRequest,
) -> Result<PatternStatisticsResponse, ApiError> {
    let statistics: PatternStatistics =
        engine.statistics(persistence, to_pattern_days(&request.days))?;

    Ok(PatternStatisticsResponse {
        total_days: statistics.total_days,
        work_days: statistics.work_days,
        rest_days: statistics.rest_days,
        work_day_percentage: statistics.work_day_percentage,
        distinct_shift_names: statistics.distinct_shift_names,
    })
}

// ========================================================================
// Schedule resolution
// ========================================================================

/// Resolves what the current user works on `date`.
///
/// # Errors
///
/// - `InvalidInput` if the date is malformed
/// - Any error [`get_pattern`] reports for the winning assignment
pub fn resolve_schedule(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    date: &str,
) -> Result<ResolveScheduleResponse, ApiError> {
    let date: Date = parse_date_field("date", date)?;
    let resolved: Option<ResolvedSchedule> = engine.resolve_user_schedule(persistence, date)?;

    Ok(ResolveScheduleResponse {
        date: format_date(date),
        scheduled: resolved.map(|r| ScheduledDayInfo {
            assignment_id: r.assignment_id,
            pattern_name: r.pattern_name,
            day: to_schedule_day_info(&r.day),
        }),
    })
}

/// Resolves one assignment over `[from, to]`, skipping uncovered dates.
///
/// # Errors
///
/// - `InvalidInput` if a date is malformed or the range exceeds 366 days
/// - Any error [`get_pattern`] reports
pub fn resolve_schedule_range(
    persistence: &mut Persistence,
    engine: &PatternEngine,
    assignment_id: i64,
    request: &ScheduleRangeRequest,
) -> Result<ScheduleRangeResponse, ApiError> {
    let from: Date = parse_date_field("from", &request.from)?;
    let to: Date = parse_date_field("to", &request.to)?;

    let days: Vec<WorkScheduleDay> = engine.resolve_range(persistence, assignment_id, from, to)?;

    Ok(ScheduleRangeResponse {
        assignment_id,
        days: days.iter().map(to_schedule_day_info).collect(),
    })
}
