// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::import::ImportValidationError;
use meeting_roster::{CommitError, CoreError};
use meeting_roster_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The change could not be stored and was rolled back.
    PersistenceFailed {
        /// A description of the storage failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::PersistenceFailed { message } => {
                write!(f, "Changes could not be saved: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ImportValidationError> for ApiError {
    fn from(err: ImportValidationError) -> Self {
        Self::InvalidInput {
            field: String::from("document"),
            message: err.to_string(),
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::UnknownRole(_) => invalid_input("role", &err),
        DomainError::InvalidDateKey { .. } | DomainError::DateArithmeticOverflow { .. } => {
            invalid_input("date", &err)
        }
        DomainError::InvalidName(_) => invalid_input("name", &err),
        DomainError::InvalidMeetingDay(_) | DomainError::DuplicateMeetingDay(_) => {
            invalid_input("meetingDays", &err)
        }
        DomainError::InvalidPeriod(_) => invalid_input("period", &err),
        DomainError::InvalidScheduleFormat(_) => invalid_input("format", &err),
        DomainError::InvalidRestrictionCode(_) => invalid_input("restrictionCodes", &err),
        DomainError::DuplicatePerson(_) => rule_violation("unique_person", &err),
        DomainError::PersonNotInRoster(_) => rule_violation("person_in_roster", &err),
        DomainError::IneligibleForRole { .. } => rule_violation("role_restriction", &err),
        DomainError::AlreadyAssignedOnDay { .. } => rule_violation("one_role_per_day", &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidConfiguration(msg) => ApiError::Internal {
            message: format!("Invalid configuration: {msg}"),
        },
    }
}

/// Translates a failed commit into an API error.
#[must_use]
pub fn translate_commit_error(err: CommitError) -> ApiError {
    match err {
        CommitError::Rejected(core_err) => translate_core_error(core_err),
        CommitError::PersistenceFailed { message } => ApiError::PersistenceFailed { message },
    }
}
