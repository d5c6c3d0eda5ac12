// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::conflict::assigned_on_day;
use crate::recency::{RecencyWindow, day_difference, last_assignment_dates};
use crate::restriction::RestrictionPolicy;
use crate::roster::sort_roster;
use crate::types::{AssignmentsStore, DateKey, Role};
use serde::Serialize;
use std::collections::BTreeMap;

/// A person offered in the assignment picker for one date and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Display name as on the roster.
    pub name: String,
    /// Most recent date the person holds any role, if ever.
    pub last_assigned: Option<DateKey>,
    /// Days from `last_assigned` to the edited date.
    pub days_since_last: Option<i64>,
    /// Inside the recency window (strictly after, at most `window` days).
    pub recently_assigned: bool,
    /// Already holds another role on the edited date. Saving is blocked.
    pub assigned_elsewhere: bool,
}

/// Builds the annotated, alphabetically sorted candidate list.
///
/// Eligibility filters the roster, recency is computed from the full
/// history and same-day conflicts exclude the role being edited.
#[must_use]
pub fn candidates(
    store: &AssignmentsStore,
    roster: &[String],
    date: DateKey,
    role: Role,
    policy: &RestrictionPolicy,
    window: RecencyWindow,
) -> Vec<Candidate> {
    let mut eligible: Vec<String> = policy.eligible_people(roster, role);
    sort_roster(&mut eligible);

    let last_dates: BTreeMap<String, DateKey> = last_assignment_dates(store);
    let busy: Vec<String> = assigned_on_day(store, &date, role);

    eligible
        .into_iter()
        .map(|name| {
            let last_assigned: Option<DateKey> = last_dates.get(&name).copied();
            let assigned_elsewhere: bool = busy.contains(&name);
            Candidate {
                days_since_last: last_assigned.map(|last| day_difference(last, date)),
                recently_assigned: last_assigned.is_some_and(|last| window.is_recent(last, date)),
                assigned_elsewhere,
                last_assigned,
                name,
            }
        })
        .collect()
}
