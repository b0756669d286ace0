// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod assignment_tests;

use crate::Persistence;
use shiftcycle::{EngineConfig, FixedClock, PatternDraft, PatternEngine, StaticIdentity};
use shiftcycle_domain::{Assignment, Pattern, PatternDay, Shift, ShiftId, encode_pattern};
use std::sync::Arc;
use time::Date;
use time::macros::{date, time};

pub const TODAY: Date = date!(2025 - 01 - 10);
pub const TEST_USER_ID: i64 = 7;

/// Creates an in-memory database seeded with the Early, Late and Night shifts.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for shift in [
        Shift::new(ShiftId::new("A"), String::from("Early"), time!(06:00), time!(14:00)),
        Shift::new(ShiftId::new("B"), String::from("Late"), time!(14:00), time!(22:00)),
        Shift::new(ShiftId::new("N"), String::from("Night"), time!(22:00), time!(06:00)),
    ] {
        persistence.upsert_shift(&shift).unwrap();
    }
    persistence
}

/// A, B, rest.
pub fn create_three_day_pattern() -> Pattern {
    Pattern::new(vec![
        PatternDay::work(1, ShiftId::new("A")),
        PatternDay::work(2, ShiftId::new("B")),
        PatternDay::rest(3),
    ])
    .unwrap()
}

/// Stores the three-day pattern and returns the new rule ID.
pub fn store_three_day_rule(persistence: &mut Persistence) -> i64 {
    let pattern: Pattern = create_three_day_pattern();
    persistence
        .insert_rule(&encode_pattern(&pattern), &pattern)
        .unwrap()
        .rule_id()
        .unwrap()
}

pub fn create_test_assignment(rule_id: i64) -> Assignment {
    let mut assignment: Assignment = Assignment::new(
        String::from("Three day rota"),
        TEST_USER_ID,
        String::from("blue"),
        date!(2025 - 01 - 01),
    );
    assignment.rule_id = Some(rule_id);
    assignment
}

pub fn create_test_engine() -> PatternEngine {
    PatternEngine::new(
        Arc::new(StaticIdentity::new(TEST_USER_ID, String::from("blue"))),
        Arc::new(FixedClock(TODAY)),
        EngineConfig::default(),
    )
}

pub fn create_test_draft() -> PatternDraft {
    PatternDraft::new(
        String::from("Three day rota"),
        create_three_day_pattern().days().to_vec(),
        date!(2025 - 01 - 01),
    )
}
