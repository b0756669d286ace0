// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, MAX_PATTERN_LENGTH, PatternDay, ShiftId, add_years, validate_end_date,
    validate_pattern_configuration, validate_pattern_days, validate_pattern_name,
    validate_start_date,
};
use time::Date;
use time::macros::date;

const TODAY: Date = date!(2026 - 10 - 19);

fn rest_days(numbers: &[u16]) -> Vec<PatternDay> {
    numbers.iter().map(|n| PatternDay::rest(*n)).collect()
}

#[test]
fn test_validate_pattern_days_accepts_valid_pattern() {
    let days: Vec<PatternDay> = vec![
        PatternDay::work(1, ShiftId::new("A")),
        PatternDay::work(2, ShiftId::new("B")),
        PatternDay::rest(3),
    ];
    assert!(validate_pattern_days(&days).is_ok());
}

#[test]
fn test_validate_pattern_days_rejects_empty() {
    assert_eq!(validate_pattern_days(&[]), Err(DomainError::EmptyPattern));
}

#[test]
fn test_validate_pattern_days_accepts_single_day() {
    assert!(validate_pattern_days(&rest_days(&[1])).is_ok());
}

#[test]
fn test_validate_pattern_days_accepts_maximum_length() {
    let numbers: Vec<u16> = (1..=365).collect();
    assert!(validate_pattern_days(&rest_days(&numbers)).is_ok());
}

#[test]
fn test_validate_pattern_days_rejects_over_maximum_length() {
    let numbers: Vec<u16> = (1..=366).collect();
    assert_eq!(
        validate_pattern_days(&rest_days(&numbers)),
        Err(DomainError::TooLong {
            length: 366,
            max: MAX_PATTERN_LENGTH,
        })
    );
}

#[test]
fn test_validate_pattern_days_rejects_gap() {
    assert_eq!(
        validate_pattern_days(&rest_days(&[1, 2, 4])),
        Err(DomainError::NonSequential {
            position: 2,
            expected: 3,
            found: 4,
        })
    );
}

#[test]
fn test_validate_pattern_days_rejects_out_of_order() {
    assert!(matches!(
        validate_pattern_days(&rest_days(&[1, 3, 2])),
        Err(DomainError::NonSequential { position: 1, .. })
    ));
}

#[test]
fn test_validate_pattern_days_rejects_duplicate() {
    assert!(matches!(
        validate_pattern_days(&rest_days(&[1, 1, 2])),
        Err(DomainError::NonSequential { .. })
    ));
}

#[test]
fn test_validate_pattern_days_rejects_starting_at_zero() {
    assert!(matches!(
        validate_pattern_days(&rest_days(&[0, 1, 2])),
        Err(DomainError::NonSequential { found: 0, .. })
    ));
}

#[test]
fn test_validate_pattern_days_rejects_blank_shift() {
    let days: Vec<PatternDay> = vec![PatternDay::rest(1), PatternDay::work(2, ShiftId::new(" "))];
    assert_eq!(
        validate_pattern_days(&days),
        Err(DomainError::MissingShiftReference { day_number: 2 })
    );
}

#[test]
fn test_validate_start_date_window_boundaries() {
    let three_years_ago: Date = add_years(TODAY, -3).unwrap();
    let one_year_ago: Date = add_years(TODAY, -1).unwrap();
    let two_years_ahead: Date = add_years(TODAY, 2).unwrap();
    let four_years_ahead: Date = add_years(TODAY, 4).unwrap();

    assert!(matches!(
        validate_start_date(three_years_ago, TODAY),
        Err(DomainError::StartDateTooEarly { .. })
    ));
    assert!(validate_start_date(one_year_ago, TODAY).is_ok());
    assert!(validate_start_date(two_years_ahead, TODAY).is_ok());
    assert!(matches!(
        validate_start_date(four_years_ahead, TODAY),
        Err(DomainError::StartDateTooLate { .. })
    ));
}

#[test]
fn test_validate_start_date_window_is_inclusive() {
    assert!(validate_start_date(date!(2024 - 10 - 19), TODAY).is_ok());
    assert!(validate_start_date(date!(2029 - 10 - 19), TODAY).is_ok());
    assert!(validate_start_date(date!(2024 - 10 - 18), TODAY).is_err());
    assert!(validate_start_date(date!(2029 - 10 - 20), TODAY).is_err());
}

#[test]
fn test_validate_pattern_name_bounds() {
    assert!(validate_pattern_name("Four on four off").is_ok());
    assert!(validate_pattern_name(&"x".repeat(100)).is_ok());
    assert!(matches!(
        validate_pattern_name(&"x".repeat(101)),
        Err(DomainError::InvalidName(_))
    ));
    assert!(matches!(
        validate_pattern_name("   "),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_pattern_name_counts_characters_not_bytes() {
    // 100 two-byte characters
    assert!(validate_pattern_name(&"é".repeat(100)).is_ok());
}

#[test]
fn test_validate_end_date() {
    assert!(validate_end_date(date!(2025 - 03 - 01), None).is_ok());
    assert!(validate_end_date(date!(2025 - 03 - 01), Some(date!(2025 - 03 - 01))).is_ok());
    assert!(matches!(
        validate_end_date(date!(2025 - 03 - 01), Some(date!(2025 - 02 - 28))),
        Err(DomainError::InvalidEndDate { .. })
    ));
}

#[test]
fn test_validate_pattern_configuration_short_circuits_in_order() {
    // Pattern defect is reported even though the date and name are also invalid
    let result = validate_pattern_configuration(&[], date!(2000 - 01 - 01), "", TODAY);
    assert_eq!(result, Err(DomainError::EmptyPattern));

    // Date is checked before name
    let result =
        validate_pattern_configuration(&rest_days(&[1]), date!(2000 - 01 - 01), "", TODAY);
    assert!(matches!(result, Err(DomainError::StartDateTooEarly { .. })));

    let result = validate_pattern_configuration(&rest_days(&[1]), TODAY, "", TODAY);
    assert!(matches!(result, Err(DomainError::InvalidName(_))));

    let result = validate_pattern_configuration(&rest_days(&[1]), TODAY, "Rota", TODAY);
    assert!(result.is_ok());
}
