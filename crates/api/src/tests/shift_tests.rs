// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_shift_request, create_test_executor, lock};
use crate::{ApiError, list_shifts, upsert_shift};

#[test]
fn test_list_shifts_returns_catalogue() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let response = list_shifts(&mut persistence).unwrap();

    let names: Vec<&str> = response.shifts.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Early", "Late", "Night"]);
    assert!(response.shifts[2].crosses_midnight);
    assert_eq!(response.shifts[0].start_time, "06:00");
}

#[test]
fn test_upsert_shift_trims_and_replaces() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let info = upsert_shift(
        &mut persistence,
        &create_shift_request(" A ", " Dawn ", "05:00", "13:00"),
    )
    .unwrap();

    assert_eq!(info.shift_id, "A");
    assert_eq!(info.name, "Dawn");
    assert_eq!(list_shifts(&mut persistence).unwrap().shifts.len(), 3);
}

#[test]
fn test_upsert_shift_rejects_blank_id() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let err = upsert_shift(
        &mut persistence,
        &create_shift_request("  ", "Ghost", "05:00", "13:00"),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "shift_id"));
    assert_eq!(err.kind(), "validation");
}

#[test]
fn test_upsert_shift_rejects_malformed_time() {
    let executor = create_test_executor();
    let mut persistence = lock(&executor);

    let err = upsert_shift(
        &mut persistence,
        &create_shift_request("X", "Broken", "25:00", "13:00"),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start_time"));
}
