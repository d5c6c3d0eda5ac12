// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{DateKey, Role};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role name does not match any known role.
    UnknownRole(String),
    /// A date key is not a valid `YYYY-MM-DD` calendar date.
    InvalidDateKey {
        /// The rejected input.
        input: String,
        /// The parser's message.
        error: String,
    },
    /// A person name is empty or invalid.
    InvalidName(String),
    /// A person with the same name (ignoring case) is already on the roster.
    DuplicatePerson(String),
    /// The named person is not on the roster.
    PersonNotInRoster(String),
    /// A meeting day is outside `0..=6`.
    InvalidMeetingDay(u8),
    /// A meeting day appears more than once.
    DuplicateMeetingDay(u8),
    /// The person's restriction code does not allow the role.
    IneligibleForRole {
        /// The person's display name.
        person: String,
        /// The role that was requested.
        role: Role,
    },
    /// The person already holds a different role on the same date.
    AlreadyAssignedOnDay {
        /// The person's display name.
        person: String,
        /// The date being edited.
        date: DateKey,
    },
    /// A period name is not `week` or `month`.
    InvalidPeriod(String),
    /// A schedule format name is not recognized.
    InvalidScheduleFormat(String),
    /// A restriction code is not exactly one character.
    InvalidRestrictionCode(String),
    /// Date arithmetic left the supported calendar range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRole(name) => write!(f, "Unknown role: '{name}'"),
            Self::InvalidDateKey { input, error } => {
                write!(f, "Invalid date key '{input}': {error}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DuplicatePerson(name) => {
                write!(f, "Person '{name}' is already on the roster")
            }
            Self::PersonNotInRoster(name) => write!(f, "Person '{name}' is not on the roster"),
            Self::InvalidMeetingDay(day) => {
                write!(f, "Invalid meeting day: {day}. Must be between 0 and 6")
            }
            Self::DuplicateMeetingDay(day) => {
                write!(f, "Meeting day {day} is listed more than once")
            }
            Self::IneligibleForRole { person, role } => {
                write!(f, "Person '{person}' is not eligible for role '{role}'")
            }
            Self::AlreadyAssignedOnDay { person, date } => {
                write!(
                    f,
                    "Person '{person}' is already assigned to another role on {date}"
                )
            }
            Self::InvalidPeriod(name) => {
                write!(f, "Invalid period '{name}': must be 'week' or 'month'")
            }
            Self::InvalidScheduleFormat(name) => {
                write!(f, "Invalid schedule format '{name}': must be 'list' or 'table'")
            }
            Self::InvalidRestrictionCode(code) => {
                write!(
                    f,
                    "Invalid restriction code '{code}': must be a single character"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
