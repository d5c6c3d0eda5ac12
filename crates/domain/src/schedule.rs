// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{Period, month_name, weekday_name};
use crate::error::DomainError;
use crate::types::{AssignmentsStore, DateKey, Role};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a schedule is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFormat {
    /// One block per date; dates without assignments are skipped.
    #[default]
    List,
    /// One row per meeting date, including empty ones.
    Table,
}

impl FromStr for ScheduleFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "table" | "spreadsheet" => Ok(Self::Table),
            _ => Err(DomainError::InvalidScheduleFormat(s.to_string())),
        }
    }
}

/// A filled role on a schedule day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleLine {
    pub role: Role,
    pub person: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One meeting date of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDay {
    pub date: DateKey,
    pub weekday: &'static str,
    /// Filled roles in display order.
    pub lines: Vec<ScheduleLine>,
}

impl ScheduleDay {
    /// Returns the person holding `role`, if any.
    #[must_use]
    pub fn person_for(&self, role: Role) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.role == role)
            .map(|line| line.person.as_str())
    }
}

/// A titled, printable schedule for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub title: String,
    pub period: Period,
    pub format: ScheduleFormat,
    pub days: Vec<ScheduleDay>,
}

/// Title shown above a schedule.
#[must_use]
pub fn schedule_title(period: Period, cursor: DateKey) -> String {
    match period {
        Period::Week => String::from("Designações da Semana"),
        Period::Month => format!(
            "Designações de {} de {}",
            month_name(cursor),
            cursor.date().year()
        ),
    }
}

/// Lays out the assignments of `dates` for printing or export.
#[must_use]
pub fn build_schedule(
    store: &AssignmentsStore,
    dates: &[DateKey],
    period: Period,
    cursor: DateKey,
    format: ScheduleFormat,
) -> Schedule {
    let days: Vec<ScheduleDay> = dates
        .iter()
        .map(|date| ScheduleDay {
            date: *date,
            weekday: weekday_name(*date),
            lines: store
                .day(date)
                .map(|day| {
                    day.iter()
                        .filter(|(_, value)| !value.is_unassigned())
                        .map(|(role, value)| ScheduleLine {
                            role,
                            person: value.person.clone(),
                            note: value.note.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .filter(|day| format == ScheduleFormat::Table || !day.lines.is_empty())
        .collect();

    Schedule {
        title: schedule_title(period, cursor),
        period,
        format,
        days,
    }
}
