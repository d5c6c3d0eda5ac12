// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AssignmentsStore, DateKey};
use std::collections::BTreeMap;

/// Default lookback, in days, for flagging a candidate as recently assigned.
pub const DEFAULT_RECENCY_WINDOW_DAYS: u32 = 14;

/// The lookback window used to flag recently assigned candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    days: u32,
}

impl RecencyWindow {
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Returns whether a person last assigned on `last` counts as recently
    /// assigned when editing `target`.
    ///
    /// Only `0 < target - last <= days` is recent. A difference of zero is a
    /// same-day conflict, not recency, and a negative difference (editing a
    /// past date) is never flagged.
    #[must_use]
    pub fn is_recent(&self, last: DateKey, target: DateKey) -> bool {
        let diff: i64 = day_difference(last, target);
        diff > 0 && diff <= i64::from(self.days)
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::new(DEFAULT_RECENCY_WINDOW_DAYS)
    }
}

/// Whole calendar days from `last` to `target`.
///
/// Date keys carry no time of day or zone, so the difference cannot be
/// skewed by DST.
#[must_use]
pub fn day_difference(last: DateKey, target: DateKey) -> i64 {
    target.days_since(last)
}

/// Maps every assigned person to the most recent date they hold any role.
///
/// Dates are visited in ascending order and later dates overwrite earlier
/// ones, so each person ends up with their latest date. People with no
/// assignment are absent from the result.
#[must_use]
pub fn last_assignment_dates(store: &AssignmentsStore) -> BTreeMap<String, DateKey> {
    let mut last_dates: BTreeMap<String, DateKey> = BTreeMap::new();
    for (date, day) in store.iter() {
        for (_, value) in day.iter() {
            if !value.is_unassigned() {
                last_dates.insert(value.person.clone(), *date);
            }
        }
    }
    last_dates
}
