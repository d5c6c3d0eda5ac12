// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::RosterState;
use meeting_roster_domain::{
    DEFAULT_RECENCY_WINDOW_DAYS, DomainError, RecencyWindow, RestrictionPolicy, Role,
    STANDARD_RESTRICTION_CODES, Settings, sort_roster, validate_settings,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wednesday and Saturday.
const DEFAULT_MEETING_DAYS: [u8; 2] = [3, 6];

/// Runtime policy for the roster.
///
/// Loaded from a camelCase JSON file; every field is optional:
///
/// ```json
/// { "recencyWindowDays": 14,
///   "restrictionCodes": { "!": ["Presidência", "Leitura", "Oração Final"] },
///   "defaultMeetingDays": [3, 6],
///   "defaultPeople": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterConfig {
    /// Days after an assignment during which a person is flagged as recent.
    pub recency_window_days: u32,
    /// Trailing name character to allowed roles. Replaces the built-in table.
    pub restriction_codes: BTreeMap<String, Vec<Role>>,
    /// Meeting days of the built-in default document.
    pub default_meeting_days: Vec<u8>,
    /// Roster of the built-in default document.
    pub default_people: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            recency_window_days: DEFAULT_RECENCY_WINDOW_DAYS,
            restriction_codes: STANDARD_RESTRICTION_CODES
                .iter()
                .map(|(code, roles)| (code.to_string(), roles.to_vec()))
                .collect(),
            default_meeting_days: DEFAULT_MEETING_DAYS.to_vec(),
            default_people: Vec::new(),
        }
    }
}

impl RosterConfig {
    /// Parses a configuration file's contents and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration is
    /// inconsistent.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| CoreError::InvalidConfiguration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the restriction codes and the default document.
    ///
    /// # Errors
    ///
    /// Returns an error if a code is not a single character, or if the
    /// default meeting days or roster are invalid.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.restriction_policy()?;
        validate_settings(&self.default_settings())?;
        Ok(())
    }

    /// Builds the restriction policy from the configured codes.
    ///
    /// # Errors
    ///
    /// Returns an error if a code key is not exactly one character.
    pub fn restriction_policy(&self) -> Result<RestrictionPolicy, CoreError> {
        self.restriction_codes
            .iter()
            .try_fold(RestrictionPolicy::empty(), |policy, (code, roles)| {
                let mut chars: std::str::Chars<'_> = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(policy.with_code(c, roles.iter().copied())),
                    _ => Err(CoreError::from(DomainError::InvalidRestrictionCode(
                        code.clone(),
                    ))),
                }
            })
    }

    #[must_use]
    pub const fn recency_window(&self) -> RecencyWindow {
        RecencyWindow::new(self.recency_window_days)
    }

    /// The settings used when nothing usable is stored.
    #[must_use]
    pub fn default_settings(&self) -> Settings {
        let mut people: Vec<String> = self.default_people.clone();
        sort_roster(&mut people);
        Settings::new(self.default_meeting_days.clone(), people)
    }

    /// The document used when nothing usable is stored.
    #[must_use]
    pub fn default_state(&self) -> RosterState {
        RosterState::with_settings(self.default_settings())
    }
}
