// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use meeting_roster::RosterState;
use meeting_roster_domain::{AssignmentValue, AssignmentsStore, DateKey, Role, Settings};

pub fn date(s: &str) -> DateKey {
    s.parse().unwrap()
}

pub fn create_defaults() -> RosterState {
    RosterState::with_settings(Settings::new(vec![3, 6], vec![String::from("Padrão")]))
}

pub fn create_test_state() -> RosterState {
    let mut assignments: AssignmentsStore = AssignmentsStore::new();
    assignments.set_role(
        date("2024-01-10"),
        Role::Leitura,
        AssignmentValue::new("Ana", Some(String::from("substituindo"))),
    );
    RosterState::new(
        assignments,
        Settings::new(vec![3, 6], vec![String::from("Ana"), String::from("Bruno")]),
    )
}
