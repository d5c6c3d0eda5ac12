// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::people;
use crate::{Restriction, RestrictionPolicy, Role, eligible_people};
use std::collections::BTreeSet;

#[test]
fn test_final_prayer_admits_all_codes_and_unrestricted() {
    let roster: Vec<String> = people(&["Ana!", "Bruno", "Carla\""]);
    assert_eq!(eligible_people(&roster, Role::OracaoFinal), roster);
}

#[test]
fn test_stage_admits_only_unrestricted() {
    let roster: Vec<String> = people(&["Ana!", "Bruno", "Carla\""]);
    assert_eq!(eligible_people(&roster, Role::Palco), people(&["Bruno"]));
}

#[test]
fn test_codes_are_nested() {
    let roster: Vec<String> = people(&["Ana!", "Beto*", "Carla\""]);
    assert_eq!(
        eligible_people(&roster, Role::Leitura),
        people(&["Ana!"])
    );
    assert_eq!(
        eligible_people(&roster, Role::Presidencia),
        people(&["Ana!", "Beto*"])
    );
}

#[test]
fn test_every_role_matches_the_code_table() {
    let policy: RestrictionPolicy = RestrictionPolicy::standard();
    let roster: Vec<String> = people(&["Ana!", "Beto*", "Carla\"", "Davi", "Eva?"]);
    for role in Role::ALL {
        let eligible: Vec<String> = policy.eligible_people(&roster, role);
        for name in &roster {
            let expected: bool = match name.chars().last() {
                Some('!') => matches!(role, Role::Presidencia | Role::Leitura | Role::OracaoFinal),
                Some('*') => matches!(role, Role::Presidencia | Role::OracaoFinal),
                Some('"') => role == Role::OracaoFinal,
                _ => true,
            };
            assert_eq!(eligible.contains(name), expected, "{name} / {role}");
        }
    }
}

#[test]
fn test_code_must_be_last_character() {
    let roster: Vec<String> = people(&["!Ana", "An*a"]);
    assert_eq!(eligible_people(&roster, Role::Palco), roster);
}

#[test]
fn test_empty_name_fails_open() {
    let policy: RestrictionPolicy = RestrictionPolicy::standard();
    assert_eq!(policy.classify(""), Restriction::Unrestricted);
    assert!(policy.is_eligible("", Role::Palco));
}

#[test]
fn test_classify_returns_explicit_roles() {
    let policy: RestrictionPolicy = RestrictionPolicy::standard();
    let expected: BTreeSet<Role> = [Role::Presidencia, Role::OracaoFinal].into_iter().collect();
    assert_eq!(policy.classify("Beto*"), Restriction::AllowedRoles(expected));
    assert_eq!(policy.person("Beto").restriction, Restriction::Unrestricted);
}

#[test]
fn test_custom_policy_codes() {
    let policy: RestrictionPolicy = RestrictionPolicy::empty().with_code('#', [Role::Palco]);
    let roster: Vec<String> = people(&["Ana!", "Gil#"]);
    assert_eq!(policy.eligible_people(&roster, Role::Leitura), people(&["Ana!"]));
    assert_eq!(policy.eligible_people(&roster, Role::Palco), roster);
}

#[test]
fn test_roster_order_is_preserved() {
    let roster: Vec<String> = people(&["Zeca", "Ana", "Mara"]);
    assert_eq!(eligible_people(&roster, Role::Palco), roster);
}
