// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod candidates;
mod conflict;
mod error;
mod recency;
mod restriction;
mod roster;
mod schedule;
mod types;

#[cfg(test)]
mod tests;

pub use calendar::{
    MONTH_NAMES, Period, WEEKDAY_NAMES, meeting_dates, meeting_dates_in_month,
    meeting_dates_in_week, month_name, shift_days, week_start, weekday_name,
};
pub use candidates::{Candidate, candidates};
pub use conflict::{assigned_on_day, is_assigned_elsewhere};
pub use recency::{
    DEFAULT_RECENCY_WINDOW_DAYS, RecencyWindow, day_difference, last_assignment_dates,
};
pub use restriction::{
    Person, Restriction, RestrictionPolicy, STANDARD_RESTRICTION_CODES, eligible_people,
};
pub use schedule::{
    Schedule, ScheduleDay, ScheduleFormat, ScheduleLine, build_schedule, schedule_title,
};

// Re-export public types
pub use error::DomainError;
pub use roster::{
    add_person, remove_person, sort_roster, validate_meeting_days, validate_person_name,
    validate_roster, validate_settings,
};
pub use types::{Assignment, AssignmentValue, AssignmentsStore, DateKey, Role, Settings};
