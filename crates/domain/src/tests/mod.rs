// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod eligibility;

use crate::{Assignment, AssignmentValue, AssignmentsStore, DateKey, Role};

pub fn date(s: &str) -> DateKey {
    s.parse().unwrap()
}

pub fn people(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Builds a store from `(date, role, person)` triples.
pub fn store_of(entries: &[(&str, Role, &str)]) -> AssignmentsStore {
    let mut store: AssignmentsStore = AssignmentsStore::new();
    for (day, role, person) in entries {
        store.set_role(date(day), *role, AssignmentValue::new(*person, None));
    }
    store
}

pub fn single_role_day(role: Role, person: &str) -> Assignment {
    [(role, AssignmentValue::new(person, None))]
        .into_iter()
        .collect()
}
