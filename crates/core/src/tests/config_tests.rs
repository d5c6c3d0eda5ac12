// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, RosterConfig, RosterState};
use meeting_roster_domain::{DomainError, RestrictionPolicy, Role};

#[test]
fn test_defaults_match_standard_policy() {
    let config: RosterConfig = RosterConfig::default();
    assert_eq!(config.recency_window_days, 14);
    assert_eq!(
        config.restriction_policy().unwrap(),
        RestrictionPolicy::standard()
    );
    assert_eq!(config.recency_window().days(), 14);
}

#[test]
fn test_default_state_has_wednesday_and_saturday() {
    let state: RosterState = RosterConfig::default().default_state();
    assert_eq!(state.settings.meeting_days, vec![3, 6]);
    assert!(state.settings.people.is_empty());
    assert!(state.assignments.is_empty());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config: RosterConfig =
        RosterConfig::from_json(r#"{ "recencyWindowDays": 7, "defaultPeople": ["Zeca", "ana"] }"#)
            .unwrap();
    assert_eq!(config.recency_window_days, 7);
    assert_eq!(config.default_meeting_days, vec![3, 6]);
    assert_eq!(
        config.default_state().settings.people,
        vec![String::from("ana"), String::from("Zeca")]
    );
}

#[test]
fn test_custom_restriction_codes_replace_table() {
    let config: RosterConfig =
        RosterConfig::from_json(r##"{ "restrictionCodes": { "#": ["Palco"] } }"##).unwrap();
    let policy: RestrictionPolicy = config.restriction_policy().unwrap();
    assert!(policy.is_eligible("Ana!", Role::Palco));
    assert!(policy.is_eligible("Gil#", Role::Palco));
    assert!(!policy.is_eligible("Gil#", Role::Leitura));
}

#[test]
fn test_multi_character_code_is_rejected() {
    let result: Result<RosterConfig, CoreError> =
        RosterConfig::from_json(r#"{ "restrictionCodes": { "!!": ["Palco"] } }"#);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidRestrictionCode(String::from("!!"))
        ))
    );
}

#[test]
fn test_unknown_role_in_config_is_rejected() {
    let result: Result<RosterConfig, CoreError> =
        RosterConfig::from_json(r#"{ "restrictionCodes": { "!": ["Coral"] } }"#);
    assert!(matches!(result, Err(CoreError::InvalidConfiguration(_))));
}

#[test]
fn test_invalid_default_meeting_day_is_rejected() {
    let result: Result<RosterConfig, CoreError> =
        RosterConfig::from_json(r#"{ "defaultMeetingDays": [9] }"#);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidMeetingDay(9)))
    );
}
