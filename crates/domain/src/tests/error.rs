// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::date;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::EmptyPattern;
    assert_eq!(format!("{err}"), "Pattern must contain at least one day");

    let err: DomainError = DomainError::TooLong {
        length: 366,
        max: 365,
    };
    assert_eq!(
        format!("{err}"),
        "Pattern length 366 exceeds the maximum of 365 days"
    );

    let err: DomainError = DomainError::MissingShiftReference { day_number: 4 };
    assert_eq!(format!("{err}"), "Work day 4 does not reference a shift");

    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::StartDateTooLate {
        start_date: date!(2030 - 01 - 01),
        latest: date!(2028 - 10 - 19),
    };
    assert_eq!(
        format!("{err}"),
        "Start date 2030-01-01 is too far in the future; latest allowed is 2028-10-19"
    );

    let err: DomainError = DomainError::NotCustomPattern;
    assert_eq!(
        format!("{err}"),
        "Recurrence rule does not describe a custom pattern"
    );
}

#[test]
fn test_rule_names_group_related_errors() {
    assert_eq!(
        DomainError::MissingShiftReference { day_number: 1 }.rule(),
        DomainError::UnknownShiftReference {
            day_number: 1,
            shift_id: String::from("X"),
        }
        .rule()
    );
    assert_eq!(
        DomainError::StartDateTooEarly {
            start_date: date!(2020 - 01 - 01),
            earliest: date!(2023 - 01 - 01),
        }
        .rule(),
        "start_date_out_of_range"
    );
    assert_eq!(DomainError::NotCustomPattern.rule(), "not_custom_pattern");
}
