// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TEST_USER_ID, create_save_request, create_test_engine_for, create_test_executor, lock, rest,
    work,
};
use crate::{
    ApiError, PatternStatisticsRequest, PreviewPatternRequest, create_pattern, delete_pattern,
    get_pattern, list_patterns, pattern_statistics, preview_pattern, update_pattern,
    validate_pattern,
};

#[tokio::test]
async fn test_create_pattern_returns_stored_pattern() {
    let executor = create_test_executor();

    let response = create_pattern(&executor, &create_save_request())
        .await
        .unwrap();

    let pattern = &response.pattern;
    assert_eq!(pattern.name, "Three day rota");
    assert_eq!(pattern.user_id, TEST_USER_ID);
    assert_eq!(pattern.team_id, "red");
    assert_eq!(pattern.pattern_length, 3);
    assert_eq!(pattern.status, "active");
    assert_eq!(pattern.days, create_save_request().days);
    assert!(response.message.contains("3 days"));
}

#[tokio::test]
async fn test_create_pattern_with_malformed_date_is_invalid_input() {
    let executor = create_test_executor();
    let mut request = create_save_request();
    request.anchor_date = String::from("01/01/2025");

    let err = create_pattern(&executor, &request).await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "anchor_date"));
}

#[tokio::test]
async fn test_create_pattern_with_unknown_shift_is_rule_violation() {
    let executor = create_test_executor();
    let mut request = create_save_request();
    request.days = vec![work(1, "A"), work(2, "ZZ")];

    let err = create_pattern(&executor, &request).await.unwrap_err();

    assert!(
        matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "missing_shift_reference")
    );
    assert_eq!(lock(&executor).count_rules().unwrap(), 0);
}

#[tokio::test]
async fn test_update_then_get_reflects_changes() {
    let executor = create_test_executor();
    let created = create_pattern(&executor, &create_save_request())
        .await
        .unwrap();
    let id = created.pattern.assignment_id;

    let mut request = create_save_request();
    request.name = String::from("Nights");
    request.days = vec![work(1, "N"), rest(2)];
    request.end_date = Some(String::from("2025-12-31"));
    request.priority = Some(2);
    update_pattern(&executor, id, &request).await.unwrap();

    let mut persistence = lock(&executor);
    let loaded = get_pattern(&mut persistence, executor.engine(), id).unwrap();
    assert_eq!(loaded.name, "Nights");
    assert_eq!(loaded.pattern_length, 2);
    assert_eq!(loaded.end_date.as_deref(), Some("2025-12-31"));
    assert_eq!(loaded.priority, 2);
    assert_ne!(loaded.rule_id, created.pattern.rule_id);
}

#[tokio::test]
async fn test_delete_pattern_then_get_is_not_found() {
    let executor = create_test_executor();
    let id = create_pattern(&executor, &create_save_request())
        .await
        .unwrap()
        .pattern
        .assignment_id;

    let deleted = delete_pattern(&executor, id).await.unwrap();
    assert!(deleted.rule_deleted);

    let mut persistence = lock(&executor);
    let err = get_pattern(&mut persistence, executor.engine(), id).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(err.kind(), "read");
}

#[tokio::test]
async fn test_other_users_patterns_are_invisible() {
    let executor = create_test_executor();
    let id = create_pattern(&executor, &create_save_request())
        .await
        .unwrap()
        .pattern
        .assignment_id;
    let stranger = create_test_engine_for(TEST_USER_ID + 1);

    let mut persistence = lock(&executor);
    assert!(list_patterns(&mut persistence, &stranger)
        .unwrap()
        .patterns
        .is_empty());
    assert!(get_pattern(&mut persistence, &stranger, id).is_err());
    assert_eq!(
        list_patterns(&mut persistence, executor.engine())
            .unwrap()
            .patterns
            .len(),
        1
    );
}

#[test]
fn test_validate_pattern_reports_counts() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let response =
        validate_pattern(&mut persistence, executor.engine(), &create_save_request()).unwrap();

    assert_eq!(response.pattern_length, 3);
    assert_eq!(response.work_days, 2);
    assert_eq!(response.rest_days, 1);
    assert_eq!(persistence.count_rules().unwrap(), 0);
}

#[test]
fn test_validate_pattern_rejects_blank_name() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);
    let mut request = create_save_request();
    request.name = String::from("   ");

    let err = validate_pattern(&mut persistence, executor.engine(), &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "name"));
}

#[test]
fn test_preview_pattern_cycles() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);
    let request = PreviewPatternRequest {
        days: create_save_request().days,
        anchor_date: String::from("2025-03-01"),
        preview_days: 5,
    };

    let response = preview_pattern(&mut persistence, executor.engine(), &request).unwrap();

    let shifts: Vec<Option<&str>> = response
        .days
        .iter()
        .map(|d| d.shift.as_ref().map(|s| s.shift_id.as_str()))
        .collect();
    assert_eq!(shifts, vec![Some("A"), Some("B"), None, Some("A"), Some("B")]);
    assert_eq!(response.days[0].date, "2025-03-01");
    assert!(response.days[2].is_rest_day);
}

#[test]
fn test_preview_pattern_rejects_oversized_request() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);
    let request = PreviewPatternRequest {
        days: create_save_request().days,
        anchor_date: String::from("2025-03-01"),
        preview_days: 367,
    };

    let err = preview_pattern(&mut persistence, executor.engine(), &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "preview_days"));
}

#[test]
fn test_pattern_statistics() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);
    let request = PatternStatisticsRequest {
        days: vec![work(1, "A"), work(2, "A"), work(3, "N"), rest(4)],
    };

    let response = pattern_statistics(&mut persistence, executor.engine(), &request).unwrap();

    assert_eq!(response.total_days, 4);
    assert_eq!(response.work_days, 3);
    assert_eq!(response.rest_days, 1);
    assert!((response.work_day_percentage - 75.0).abs() < f64::EPSILON);
    assert_eq!(response.distinct_shift_names, vec!["Early", "Night"]);
}

#[test]
fn test_pattern_statistics_rejects_empty_pattern() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let err = pattern_statistics(
        &mut persistence,
        executor.engine(),
        &PatternStatisticsRequest { days: Vec::new() },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "empty_pattern"));
}
