// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssignmentStore, Command, EngineConfig, FixedClock, MutationOutcome, PatternDraft,
    PatternEngine, RecurrenceRuleStore, ShiftLookup, StaticIdentity, StoreError, StoredPattern,
};
use shiftcycle_domain::{Assignment, Pattern, PatternDay, RecurrenceRule, Shift, ShiftId};
use std::collections::BTreeMap;
use std::sync::Arc;
use time::Date;
use time::macros::{date, time};

pub const TODAY: Date = date!(2025 - 01 - 10);
pub const TEST_USER_ID: i64 = 1;

/// An in-memory store with switchable failures.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub shifts: BTreeMap<ShiftId, Shift>,
    pub rules: BTreeMap<i64, RecurrenceRule>,
    pub assignments: BTreeMap<i64, Assignment>,
    next_rule_id: i64,
    next_assignment_id: i64,
    pub fail_save_rule: bool,
    pub fail_save_assignment: bool,
    pub fail_delete_rule: bool,
    pub shift_lookups: usize,
}

impl InMemoryStore {
    pub fn add_shift(&mut self, id: &str, name: &str, start: time::Time, end: time::Time) {
        let shift: Shift = Shift::new(ShiftId::new(id), String::from(name), start, end);
        self.shifts.insert(shift.id().clone(), shift);
    }

    /// Stores a rule with an arbitrary description, bypassing the encoder.
    pub fn insert_raw_rule(&mut self, pattern_length: u16, description: &str) -> i64 {
        self.next_rule_id += 1;
        let rule: RecurrenceRule = RecurrenceRule::with_id(
            self.next_rule_id,
            pattern_length,
            String::from(description),
        );
        self.rules.insert(self.next_rule_id, rule);
        self.next_rule_id
    }

    /// Stores an assignment of the test user pointing at `rule_id`.
    pub fn insert_assignment(&mut self, rule_id: i64, anchor_date: Date) -> i64 {
        let mut assignment: Assignment = Assignment::new(
            String::from("Imported"),
            TEST_USER_ID,
            String::from("test-team"),
            anchor_date,
        );
        assignment.rule_id = Some(rule_id);
        self.save_assignment(&assignment)
            .unwrap()
            .assignment_id()
            .unwrap()
    }
}

impl ShiftLookup for InMemoryStore {
    fn find_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, StoreError> {
        self.shift_lookups += 1;
        Ok(self.shifts.get(shift_id).cloned())
    }

    fn list_shifts(&mut self) -> Result<Vec<Shift>, StoreError> {
        Ok(self.shifts.values().cloned().collect())
    }
}

impl RecurrenceRuleStore for InMemoryStore {
    fn save_rule(
        &mut self,
        rule: &RecurrenceRule,
        _pattern: &Pattern,
    ) -> Result<RecurrenceRule, StoreError> {
        if self.fail_save_rule {
            return Err(StoreError::new("rule table unavailable"));
        }
        self.next_rule_id += 1;
        let saved: RecurrenceRule = RecurrenceRule::with_id(
            self.next_rule_id,
            rule.pattern_length(),
            rule.description().to_string(),
        );
        self.rules.insert(self.next_rule_id, saved.clone());
        Ok(saved)
    }

    fn get_rule(&mut self, rule_id: i64) -> Result<Option<RecurrenceRule>, StoreError> {
        Ok(self.rules.get(&rule_id).cloned())
    }

    fn delete_rule(&mut self, rule_id: i64) -> Result<(), StoreError> {
        if self.fail_delete_rule {
            return Err(StoreError::new("rule table locked"));
        }
        self.rules.remove(&rule_id);
        Ok(())
    }

    fn is_rule_referenced(&mut self, rule_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .assignments
            .values()
            .any(|a| a.rule_id == Some(rule_id)))
    }
}

impl AssignmentStore for InMemoryStore {
    fn save_assignment(&mut self, assignment: &Assignment) -> Result<Assignment, StoreError> {
        if self.fail_save_assignment {
            return Err(StoreError::new("assignment table unavailable"));
        }
        let saved: Assignment = match assignment.assignment_id() {
            Some(id) if self.assignments.contains_key(&id) => assignment.clone(),
            Some(id) => return Err(StoreError::new(format!("assignment {id} does not exist"))),
            None => {
                self.next_assignment_id += 1;
                assignment.clone().with_id(self.next_assignment_id)
            }
        };
        self.assignments
            .insert(saved.assignment_id().unwrap(), saved.clone());
        Ok(saved)
    }

    fn get_assignment(&mut self, assignment_id: i64) -> Result<Option<Assignment>, StoreError> {
        Ok(self.assignments.get(&assignment_id).cloned())
    }

    fn delete_assignment(&mut self, assignment_id: i64) -> Result<(), StoreError> {
        self.assignments.remove(&assignment_id);
        Ok(())
    }

    fn list_assignments_for_user(&mut self, user_id: i64) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// A store with shifts `A` (Early), `B` (Late) and `N` (Night).
pub fn create_test_store() -> InMemoryStore {
    let mut store: InMemoryStore = InMemoryStore::default();
    store.add_shift("A", "Early", time!(06:00), time!(14:00));
    store.add_shift("B", "Late", time!(14:00), time!(22:00));
    store.add_shift("N", "Night", time!(22:00), time!(06:00));
    store
}

pub fn create_test_engine() -> PatternEngine {
    create_test_engine_with(EngineConfig::default())
}

pub fn create_test_engine_with(config: EngineConfig) -> PatternEngine {
    create_engine_for_user(TEST_USER_ID, config)
}

pub fn create_engine_for_user(user_id: i64, config: EngineConfig) -> PatternEngine {
    PatternEngine::new(
        Arc::new(StaticIdentity::new(user_id, String::from("test-team"))),
        Arc::new(FixedClock(TODAY)),
        config,
    )
}

/// `[Work(A), Work(B), Rest]`.
pub fn create_three_day_days() -> Vec<PatternDay> {
    vec![
        PatternDay::work(1, ShiftId::new("A")),
        PatternDay::work(2, ShiftId::new("B")),
        PatternDay::rest(3),
    ]
}

/// The three day pattern anchored on 2025-01-01.
pub fn create_test_draft() -> PatternDraft {
    PatternDraft::new(
        String::from("Three day rota"),
        create_three_day_days(),
        date!(2025 - 01 - 01),
    )
}

/// Applies a create command and returns the stored pattern.
pub fn create_pattern(
    engine: &PatternEngine,
    store: &mut InMemoryStore,
    draft: PatternDraft,
) -> StoredPattern {
    match engine.apply(store, Command::CreatePattern(draft)) {
        Ok(MutationOutcome::Created(stored)) => stored,
        other => panic!("expected a created pattern, got {other:?}"),
    }
}
