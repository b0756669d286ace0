// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_save_request, create_test_executor, lock, work};
use crate::{
    ApiError, ScheduleRangeRequest, create_pattern, resolve_schedule, resolve_schedule_range,
};

#[tokio::test]
async fn test_resolve_schedule_picks_highest_priority() {
    let executor = create_test_executor();
    create_pattern(&executor, &create_save_request())
        .await
        .unwrap();
    let mut nights = create_save_request();
    nights.name = String::from("Nights");
    nights.days = vec![work(1, "N")];
    nights.priority = Some(10);
    let nights_id = create_pattern(&executor, &nights)
        .await
        .unwrap()
        .pattern
        .assignment_id;

    let mut persistence = lock(&executor);
    let response = resolve_schedule(&mut persistence, executor.engine(), "2025-01-05").unwrap();

    let scheduled = response.scheduled.unwrap();
    assert_eq!(scheduled.assignment_id, nights_id);
    assert_eq!(scheduled.pattern_name, "Nights");
    assert_eq!(scheduled.day.shift.unwrap().name, "Night");
}

#[tokio::test]
async fn test_resolve_schedule_before_anchor_is_empty() {
    let executor = create_test_executor();
    create_pattern(&executor, &create_save_request())
        .await
        .unwrap();

    let mut persistence = lock(&executor);
    let response = resolve_schedule(&mut persistence, executor.engine(), "2024-12-31").unwrap();

    assert_eq!(response.date, "2024-12-31");
    assert!(response.scheduled.is_none());
}

#[test]
fn test_resolve_schedule_rejects_malformed_date() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let err = resolve_schedule(&mut persistence, executor.engine(), "tomorrow").unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}

#[tokio::test]
async fn test_resolve_range_skips_uncovered_dates() {
    let executor = create_test_executor();
    let id = create_pattern(&executor, &create_save_request())
        .await
        .unwrap()
        .pattern
        .assignment_id;

    let mut persistence = lock(&executor);
    let response = resolve_schedule_range(
        &mut persistence,
        executor.engine(),
        id,
        &ScheduleRangeRequest {
            from: String::from("2024-12-30"),
            to: String::from("2025-01-04"),
        },
    )
    .unwrap();

    let dates: Vec<&str> = response.days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]
    );
    assert_eq!(response.days[3].day_number, 1);
}

#[tokio::test]
async fn test_resolve_range_rejects_oversized_span() {
    let executor = create_test_executor();
    let id = create_pattern(&executor, &create_save_request())
        .await
        .unwrap()
        .pattern
        .assignment_id;

    let mut persistence = lock(&executor);
    let err = resolve_schedule_range(
        &mut persistence,
        executor.engine(),
        id,
        &ScheduleRangeRequest {
            from: String::from("2025-01-01"),
            to: String::from("2026-06-01"),
        },
    )
    .unwrap_err();

    assert_eq!(err.kind(), "validation");
}
