// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{TEST_USER_ID, create_seeded_persistence, create_test_assignment, store_three_day_rule};
use crate::PersistenceError;
use time::macros::date;

#[test]
fn test_insert_assigns_id_and_round_trips() {
    let mut persistence = create_seeded_persistence();
    let rule_id = store_three_day_rule(&mut persistence);
    let mut assignment = create_test_assignment(rule_id);
    assignment.end_date = Some(date!(2025 - 06 - 30));
    assignment.priority = 5;
    assignment.enabled = false;

    let saved = persistence.save_assignment(&assignment).unwrap();
    let id = saved.assignment_id().unwrap();

    let loaded = persistence.get_assignment(id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.end_date, Some(date!(2025 - 06 - 30)));
    assert!(!loaded.enabled);
    assert_eq!(loaded.priority, 5);
}

#[test]
fn test_update_overwrites_existing_row() {
    let mut persistence = create_seeded_persistence();
    let first_rule = store_three_day_rule(&mut persistence);
    let second_rule = store_three_day_rule(&mut persistence);
    let saved = persistence
        .save_assignment(&create_test_assignment(first_rule))
        .unwrap();

    let mut changed = saved.clone();
    changed.name = String::from("Renamed");
    changed.rule_id = Some(second_rule);
    changed.anchor_date = date!(2025 - 02 - 01);
    persistence.save_assignment(&changed).unwrap();

    let loaded = persistence
        .get_assignment(saved.assignment_id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.rule_id, Some(second_rule));
    assert_eq!(loaded.anchor_date, date!(2025 - 02 - 01));
}

#[test]
fn test_update_of_missing_assignment_is_not_found() {
    let mut persistence = create_seeded_persistence();
    let rule_id = store_three_day_rule(&mut persistence);
    let ghost = create_test_assignment(rule_id).with_id(404);

    let result = persistence.save_assignment(&ghost);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_assignment_without_rule_is_rejected() {
    let mut persistence = create_seeded_persistence();
    let mut assignment = create_test_assignment(1);
    assignment.rule_id = None;

    let result = persistence.save_assignment(&assignment);

    assert!(matches!(result, Err(PersistenceError::InvalidRow { .. })));
}

#[test]
fn test_assignment_with_unknown_rule_violates_foreign_key() {
    let mut persistence = create_seeded_persistence();

    let result = persistence.save_assignment(&create_test_assignment(999));

    assert!(result.is_err());
}

#[test]
fn test_list_is_scoped_to_user_and_ordered() {
    let mut persistence = create_seeded_persistence();
    let rule_id = store_three_day_rule(&mut persistence);

    let first = persistence
        .save_assignment(&create_test_assignment(rule_id))
        .unwrap();
    let mut other_user = create_test_assignment(rule_id);
    other_user.user_id = TEST_USER_ID + 1;
    persistence.save_assignment(&other_user).unwrap();
    let second = persistence
        .save_assignment(&create_test_assignment(rule_id))
        .unwrap();

    let listed = persistence.list_assignments_for_user(TEST_USER_ID).unwrap();

    let ids: Vec<Option<i64>> = listed.iter().map(|a| a.assignment_id()).collect();
    assert_eq!(ids, vec![first.assignment_id(), second.assignment_id()]);
}

#[test]
fn test_delete_assignment() {
    let mut persistence = create_seeded_persistence();
    let rule_id = store_three_day_rule(&mut persistence);
    let saved = persistence
        .save_assignment(&create_test_assignment(rule_id))
        .unwrap();
    let id = saved.assignment_id().unwrap();

    persistence.delete_assignment(id).unwrap();

    assert!(persistence.get_assignment(id).unwrap().is_none());
    assert!(matches!(
        persistence.delete_assignment(id),
        Err(PersistenceError::NotFound(_))
    ));
}
