// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AssignmentsStore, DateKey, Role};

/// Lists the people holding a role other than `excluding` on `date`.
///
/// A date with no assignment yields an empty list.
#[must_use]
pub fn assigned_on_day(store: &AssignmentsStore, date: &DateKey, excluding: Role) -> Vec<String> {
    store.day(date).map_or_else(Vec::new, |day| {
        day.iter()
            .filter(|(role, value)| *role != excluding && !value.is_unassigned())
            .map(|(_, value)| value.person.clone())
            .collect()
    })
}

/// Returns whether `person` already holds a different role on `date`.
#[must_use]
pub fn is_assigned_elsewhere(
    store: &AssignmentsStore,
    date: &DateKey,
    role: Role,
    person: &str,
) -> bool {
    !person.is_empty() && assigned_on_day(store, date, role).iter().any(|p| p == person)
}
