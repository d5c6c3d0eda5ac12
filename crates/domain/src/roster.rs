// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Settings;
use std::collections::HashSet;

/// Normalizes a name typed into the roster editor.
///
/// # Arguments
///
/// * `name` - The raw input
///
/// # Returns
///
/// * `Ok(String)` with surrounding whitespace removed
/// * `Err(DomainError::InvalidName)` if nothing is left after trimming
///
/// # Errors
///
/// Returns an error if the name is empty or only whitespace.
pub fn validate_person_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(trimmed.to_string())
}

/// Sorts a roster alphabetically, ignoring case first and then by exact text.
pub fn sort_roster(people: &mut [String]) {
    people.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// Adds a person to a roster.
///
/// The name is trimmed and must not match an existing entry ignoring case.
/// The returned roster is sorted.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty after trimming
/// - A person with the same name (ignoring case) is already present
pub fn add_person(people: &[String], name: &str) -> Result<Vec<String>, DomainError> {
    let name: String = validate_person_name(name)?;
    let lowered: String = name.to_lowercase();
    if people.iter().any(|p| p.to_lowercase() == lowered) {
        return Err(DomainError::DuplicatePerson(name));
    }

    let mut updated: Vec<String> = people.to_vec();
    updated.push(name);
    sort_roster(&mut updated);
    Ok(updated)
}

/// Removes a person from a roster by exact name.
///
/// # Errors
///
/// Returns an error if no roster entry equals `name`.
pub fn remove_person(people: &[String], name: &str) -> Result<Vec<String>, DomainError> {
    if !people.iter().any(|p| p == name) {
        return Err(DomainError::PersonNotInRoster(name.to_string()));
    }
    Ok(people.iter().filter(|p| *p != name).cloned().collect())
}

/// Validates that every roster name is non-empty and unique ignoring case.
///
/// # Errors
///
/// Returns the first empty or duplicated name found.
pub fn validate_roster(people: &[String]) -> Result<(), DomainError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(people.len());
    for person in people {
        if person.trim().is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "Roster contains an empty name",
            )));
        }
        if !seen.insert(person.to_lowercase()) {
            return Err(DomainError::DuplicatePerson(person.clone()));
        }
    }
    Ok(())
}

/// Validates meeting days: each in `0..=6` (Sunday is 0), no repeats.
///
/// # Errors
///
/// Returns an error for the first out-of-range or repeated day.
pub fn validate_meeting_days(days: &[u8]) -> Result<(), DomainError> {
    let mut seen: HashSet<u8> = HashSet::with_capacity(days.len());
    for &day in days {
        if day > 6 {
            return Err(DomainError::InvalidMeetingDay(day));
        }
        if !seen.insert(day) {
            return Err(DomainError::DuplicateMeetingDay(day));
        }
    }
    Ok(())
}

/// Validates a settings object coming from the settings editor.
///
/// # Errors
///
/// Returns an error if the meeting days or the roster are invalid.
pub fn validate_settings(settings: &Settings) -> Result<(), DomainError> {
    validate_meeting_days(&settings.meeting_days)?;
    validate_roster(&settings.people)
}
