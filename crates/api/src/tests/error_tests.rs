// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, translate_core_error, translate_domain_error};
use shiftcycle::CoreError;
use shiftcycle_domain::DomainError;
use time::macros::date;

#[test]
fn test_field_errors_become_invalid_input() {
    let err = translate_domain_error(DomainError::StartDateTooLate {
        start_date: date!(2030 - 01 - 01),
        latest: date!(2028 - 01 - 10),
    });

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "anchor_date"));
}

#[test]
fn test_pattern_rules_become_rule_violations() {
    let err = translate_domain_error(DomainError::NonSequential {
        position: 2,
        expected: 3,
        found: 4,
    });

    match err {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "non_sequential");
            assert!(message.contains("expected day 3"));
        }
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_core_kinds_are_preserved() {
    let cases = [
        (CoreError::Validation(DomainError::EmptyPattern), "validation"),
        (
            CoreError::Decode(DomainError::CorruptPattern {
                reason: String::from("truncated"),
            }),
            "decode",
        ),
        (CoreError::Create(String::from("disk full")), "create"),
        (CoreError::Read(String::from("locked")), "read"),
        (CoreError::Update(String::from("locked")), "update"),
        (CoreError::Delete(String::from("locked")), "delete"),
        (
            CoreError::NotFound {
                resource: "Assignment",
                id: String::from("9"),
            },
            "read",
        ),
    ];

    for (core, expected) in cases {
        assert_eq!(translate_core_error(core.clone()).kind(), expected, "{core:?}");
    }
}

#[test]
fn test_not_found_message_names_resource() {
    let err = ApiError::from(CoreError::NotFound {
        resource: "Assignment",
        id: String::from("9"),
    });

    assert_eq!(err.to_string(), "Assignment not found: Assignment '9' does not exist");
}

#[test]
fn test_storage_failure_display() {
    let err = translate_core_error(CoreError::Create(String::from("disk full")));
    assert_eq!(err.to_string(), "Storage create failed: disk full");
}
