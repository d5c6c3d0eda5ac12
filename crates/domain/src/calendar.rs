// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meeting-date selection for the week and month views.

use crate::error::DomainError;
use crate::types::DateKey;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration};

/// Weekday display names, Sunday first, matching the meeting-day indexes.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

/// Month display names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// The span of dates a view or export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Monday through Sunday around the cursor.
    #[default]
    Week,
    /// The cursor's calendar month.
    Month,
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(DomainError::InvalidPeriod(s.to_string())),
        }
    }
}

/// Returns the weekday display name of a date.
#[must_use]
pub fn weekday_name(date: DateKey) -> &'static str {
    WEEKDAY_NAMES[usize::from(date.weekday_index())]
}

/// Returns the month display name of a date.
#[must_use]
pub fn month_name(date: DateKey) -> &'static str {
    MONTH_NAMES[usize::from(u8::from(date.date().month())) - 1]
}

/// Moves a cursor by a number of days (negative goes back).
///
/// # Errors
///
/// Returns an error if the result leaves the supported date range.
pub fn shift_days(cursor: DateKey, days: i64) -> Result<DateKey, DomainError> {
    cursor
        .date()
        .checked_add(Duration::days(days))
        .map(DateKey::new)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("moving {cursor} by {days} days"),
        })
}

/// Returns the Monday of the cursor's week. A Sunday belongs to the week
/// that started six days earlier.
///
/// # Errors
///
/// Returns an error if the Monday is before the supported date range.
pub fn week_start(cursor: DateKey) -> Result<DateKey, DomainError> {
    let offset: i64 = i64::from(cursor.date().weekday().number_days_from_monday());
    shift_days(cursor, -offset)
}

/// Lists the meeting dates in the cursor's Monday-to-Sunday week.
///
/// # Errors
///
/// Returns an error if the week extends past the supported date range.
pub fn meeting_dates_in_week(
    cursor: DateKey,
    meeting_days: &[u8],
) -> Result<Vec<DateKey>, DomainError> {
    let monday: DateKey = week_start(cursor)?;
    let mut dates: Vec<DateKey> = Vec::new();
    for offset in 0..7 {
        let date: DateKey = shift_days(monday, offset)?;
        if meeting_days.contains(&date.weekday_index()) {
            dates.push(date);
        }
    }
    Ok(dates)
}

/// Lists the meeting dates in the cursor's calendar month.
#[must_use]
pub fn meeting_dates_in_month(cursor: DateKey, meeting_days: &[u8]) -> Vec<DateKey> {
    let first: Date = cursor.first_of_month().date();
    let mut dates: Vec<DateKey> = Vec::new();
    let mut day: Option<Date> = Some(first);
    while let Some(date) = day.filter(|d| d.month() == first.month()) {
        let key: DateKey = DateKey::new(date);
        if meeting_days.contains(&key.weekday_index()) {
            dates.push(key);
        }
        day = date.next_day();
    }
    dates
}

/// Lists the meeting dates of a period around the cursor.
///
/// # Errors
///
/// Returns an error if the period extends past the supported date range.
pub fn meeting_dates(
    period: Period,
    cursor: DateKey,
    meeting_days: &[u8],
) -> Result<Vec<DateKey>, DomainError> {
    match period {
        Period::Week => meeting_dates_in_week(cursor, meeting_days),
        Period::Month => Ok(meeting_dates_in_month(cursor, meeting_days)),
    }
}
