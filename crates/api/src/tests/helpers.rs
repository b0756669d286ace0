// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shiftcycle::{EngineConfig, FixedClock, MutationExecutor, PatternEngine, StaticIdentity};
use shiftcycle_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use time::Date;
use time::macros::date;

use crate::{PatternDayInfo, SavePatternRequest, UpsertShiftRequest, upsert_shift};

pub const TODAY: Date = date!(2025 - 01 - 10);
pub const TEST_USER_ID: i64 = 3;

pub fn create_test_engine_for(user_id: i64) -> PatternEngine {
    PatternEngine::new(
        Arc::new(StaticIdentity::new(user_id, String::from("red"))),
        Arc::new(FixedClock(TODAY)),
        EngineConfig::default(),
    )
}

pub fn create_shift_request(id: &str, name: &str, start: &str, end: &str) -> UpsertShiftRequest {
    UpsertShiftRequest {
        shift_id: String::from(id),
        name: String::from(name),
        start_time: String::from(start),
        end_time: String::from(end),
    }
}

/// An executor over an in-memory database seeded with shifts A, B and N.
pub fn create_test_executor() -> MutationExecutor<Persistence> {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for request in [
        create_shift_request("A", "Early", "06:00", "14:00"),
        create_shift_request("B", "Late", "14:00", "22:00"),
        create_shift_request("N", "Night", "22:00", "06:00"),
    ] {
        upsert_shift(&mut persistence, &request).unwrap();
    }
    MutationExecutor::new(
        create_test_engine_for(TEST_USER_ID),
        Arc::new(Mutex::new(persistence)),
    )
}

/// Takes the store for a read between mutations; it is never contended.
pub fn lock(executor: &MutationExecutor<Persistence>) -> MutexGuard<'_, Persistence> {
    executor.store().try_lock().unwrap()
}

pub fn work(day_number: u16, shift_id: &str) -> PatternDayInfo {
    PatternDayInfo {
        day_number,
        shift_id: Some(String::from(shift_id)),
    }
}

pub const fn rest(day_number: u16) -> PatternDayInfo {
    PatternDayInfo {
        day_number,
        shift_id: None,
    }
}

/// "Three day rota": A, B, rest, anchored 2025-01-01.
pub fn create_save_request() -> SavePatternRequest {
    SavePatternRequest {
        name: String::from("Three day rota"),
        days: vec![work(1, "A"), work(2, "B"), rest(3)],
        anchor_date: String::from("2025-01-01"),
        end_date: None,
        enabled: None,
        priority: None,
    }
}
