// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_settings, create_test_state, date};
use crate::{CoreError, Mutation, RosterState, TransitionResult, WriteScope, apply};
use meeting_roster_domain::{
    AssignmentValue, AssignmentsStore, DomainError, RestrictionPolicy, Role, Settings,
};

fn assign(day: &str, role: Role, person: &str, note: Option<&str>) -> Mutation {
    Mutation::Assign {
        date: date(day),
        role,
        person: person.to_string(),
        note: note.map(ToString::to_string),
    }
}

fn apply_standard(state: &RosterState, mutation: Mutation) -> Result<TransitionResult, CoreError> {
    apply(state, mutation, &RestrictionPolicy::standard())
}

#[test]
fn test_assign_sets_person_and_note() {
    let state: RosterState = create_test_state();
    let result: TransitionResult = apply_standard(
        &state,
        assign("2024-03-06", Role::Leitura, "Ana!", Some("primeira vez")),
    )
    .unwrap();

    assert_eq!(result.scope, WriteScope::Assignments);
    assert_eq!(
        result.new_state.assignments.role(&date("2024-03-06"), Role::Leitura),
        Some(&AssignmentValue::new("Ana!", Some(String::from("primeira vez"))))
    );
    assert_eq!(result.new_state.settings, state.settings);
}

#[test]
fn test_assign_does_not_modify_input_state() {
    let state: RosterState = create_test_state();
    let before: RosterState = state.clone();
    apply_standard(&state, assign("2024-03-06", Role::Palco, "Bruno", None)).unwrap();
    assert_eq!(state, before);
}

#[test]
fn test_assign_is_idempotent() {
    let state: RosterState = create_test_state();
    let once: RosterState = apply_standard(&state, assign("2024-03-06", Role::Palco, "Bruno", None))
        .unwrap()
        .new_state;
    let twice: RosterState =
        apply_standard(&once, assign("2024-03-06", Role::Palco, "Bruno", None))
            .unwrap()
            .new_state;
    assert_eq!(once, twice);
}

#[test]
fn test_clearing_only_role_removes_date() {
    let state: RosterState = create_test_state();
    let result: TransitionResult =
        apply_standard(&state, assign("2024-01-03", Role::Leitura, "", None)).unwrap();
    assert!(result.new_state.assignments.day(&date("2024-01-03")).is_none());
}

#[test]
fn test_clearing_unassigned_role_is_a_no_op() {
    let state: RosterState = create_test_state();
    let result: TransitionResult =
        apply_standard(&state, assign("2024-05-01", Role::Palco, "", None)).unwrap();
    assert_eq!(result.new_state, state);
}

#[test]
fn test_assign_rejects_person_not_on_roster() {
    let state: RosterState = create_test_state();
    let result: Result<TransitionResult, CoreError> =
        apply_standard(&state, assign("2024-03-06", Role::Palco, "Zeca", None));
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::PersonNotInRoster(
            String::from("Zeca")
        )))
    );
}

#[test]
fn test_assign_rejects_ineligible_person() {
    let state: RosterState = create_test_state();
    let result: Result<TransitionResult, CoreError> =
        apply_standard(&state, assign("2024-03-06", Role::Palco, "Carla\"", None));
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::IneligibleForRole {
            role: Role::Palco,
            ..
        }))
    ));
}

#[test]
fn test_assign_rejects_same_day_conflict() {
    let state: RosterState = create_test_state();
    let result: Result<TransitionResult, CoreError> =
        apply_standard(&state, assign("2024-02-05", Role::Indicador1, "Diego", None));
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::AlreadyAssignedOnDay {
                person: String::from("Diego"),
                date: date("2024-02-05"),
            }
        ))
    );
}

#[test]
fn test_reassigning_same_role_is_not_a_conflict() {
    let state: RosterState = create_test_state();
    let result: TransitionResult = apply_standard(
        &state,
        assign("2024-02-05", Role::Palco, "Diego", Some("confirmado")),
    )
    .unwrap();
    assert_eq!(
        result
            .new_state
            .assignments
            .role(&date("2024-02-05"), Role::Palco)
            .and_then(|v| v.note.as_deref()),
        Some("confirmado")
    );
}

#[test]
fn test_save_settings_unassigns_removed_people() {
    let state: RosterState = create_test_state();
    let settings: Settings = Settings::new(
        vec![3, 6],
        ["Ana!", "Bruno", "Carla\""].iter().map(ToString::to_string).collect(),
    );
    let result: TransitionResult =
        apply_standard(&state, Mutation::SaveSettings { settings: settings.clone() }).unwrap();

    assert_eq!(result.scope, WriteScope::Document);
    assert_eq!(result.new_state.settings, settings);
    assert!(result.new_state.assignments.day(&date("2024-02-05")).is_none());
    assert!(result.new_state.assignments.day(&date("2024-02-07")).is_some());
    assert_eq!(result.new_state.assignments.len(), 2);
}

#[test]
fn test_save_settings_rejects_invalid_meeting_day() {
    let state: RosterState = create_test_state();
    let mut settings: Settings = create_test_settings();
    settings.meeting_days = vec![3, 7];
    let result: Result<TransitionResult, CoreError> =
        apply_standard(&state, Mutation::SaveSettings { settings });
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidMeetingDay(7)))
    );
}

#[test]
fn test_save_settings_rejects_duplicate_people() {
    let state: RosterState = create_test_state();
    let mut settings: Settings = create_test_settings();
    settings.people.push(String::from("bruno"));
    assert!(apply_standard(&state, Mutation::SaveSettings { settings }).is_err());
}

#[test]
fn test_clear_past_keeps_current_month() {
    let state: RosterState = create_test_state();
    let result: TransitionResult = apply_standard(
        &state,
        Mutation::ClearPast {
            today: date("2024-02-20"),
        },
    )
    .unwrap();

    let dates: Vec<String> = result
        .new_state
        .assignments
        .dates()
        .map(ToString::to_string)
        .collect();
    assert_eq!(dates, vec!["2024-02-05", "2024-02-07"]);
    assert_eq!(result.scope, WriteScope::Assignments);
}

#[test]
fn test_clear_past_on_first_of_month() {
    let state: RosterState = create_test_state();
    let result: TransitionResult = apply_standard(
        &state,
        Mutation::ClearPast {
            today: date("2024-03-01"),
        },
    )
    .unwrap();
    assert!(result.new_state.assignments.is_empty());
}

#[test]
fn test_import_replaces_everything_without_filtering() {
    let state: RosterState = create_test_state();
    let mut assignments: AssignmentsStore = AssignmentsStore::new();
    assignments.set_role(
        date("2023-12-02"),
        Role::AudioVideo,
        AssignmentValue::new("Somebody Else", None),
    );
    let document: RosterState = RosterState::new(assignments, Settings::new(vec![0], vec![]));

    let result: TransitionResult = apply_standard(
        &state,
        Mutation::Import {
            document: document.clone(),
        },
    )
    .unwrap();

    assert_eq!(result.new_state, document);
    assert_eq!(result.scope, WriteScope::Document);
}

#[test]
fn test_custom_policy_governs_eligibility() {
    let state: RosterState = create_test_state();
    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        assign("2024-03-06", Role::Palco, "Carla\"", None),
        &RestrictionPolicy::empty(),
    );
    assert!(result.is_ok());
}
