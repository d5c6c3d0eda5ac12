// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a schedule table.

use crate::error::ApiError;
use meeting_roster_domain::{Period, Role, Schedule, ScheduleDay, ScheduleLine};

fn cell(line: Option<&ScheduleLine>) -> String {
    match line {
        Some(ScheduleLine {
            person,
            note: Some(note),
            ..
        }) => format!("{person} ({note})"),
        Some(line) => line.person.clone(),
        None => String::new(),
    }
}

fn csv_failure(err: &dyn std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}

fn row(day: &ScheduleDay) -> Vec<String> {
    let mut fields: Vec<String> = Vec::with_capacity(Role::ALL.len() + 2);
    fields.push(day.date.to_string());
    fields.push(day.weekday.to_string());
    fields.extend(
        Role::ALL
            .iter()
            .map(|role| cell(day.lines.iter().find(|line| line.role == *role))),
    );
    fields
}

/// Renders a schedule as CSV: `Data`, `Dia`, then one column per role.
///
/// Unfilled roles are empty cells. Notes follow the person in parentheses.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV writer fails.
pub fn schedule_to_csv(schedule: &Schedule) -> Result<String, ApiError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header: Vec<&str> = vec!["Data", "Dia"];
    header.extend(Role::ALL.iter().map(Role::as_str));
    writer.write_record(&header).map_err(|e| csv_failure(&e))?;

    for day in &schedule.days {
        writer.write_record(row(day)).map_err(|e| csv_failure(&e))?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| csv_failure(&e))?;
    String::from_utf8(bytes).map_err(|e| csv_failure(&e))
}

/// The suggested CSV file name for a schedule.
#[must_use]
pub fn schedule_file_name(schedule: &Schedule, cursor: &str) -> String {
    let period: &str = match schedule.period {
        Period::Week => "semana",
        Period::Month => "mes",
    };
    format!("designacoes_{period}_{cursor}.csv")
}
