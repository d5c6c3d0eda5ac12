// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::WriteScope;
use meeting_roster_domain::{AssignmentsStore, Settings};
use serde::{Deserialize, Serialize};

/// The combined document: every assignment plus the settings.
///
/// This is both the in-memory state a session shows and the JSON document
/// that is persisted, exported and imported:
///
/// ```json
/// { "assignments": { "2024-01-10": { "Leitura": { "person": "Ana" } } },
///   "settings": { "meetingDays": [3, 6], "people": ["Ana"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterState {
    /// All assignments, keyed by date.
    pub assignments: AssignmentsStore,
    /// Meeting days and roster.
    pub settings: Settings,
}

impl RosterState {
    /// Creates a state from its two halves.
    ///
    /// # Arguments
    ///
    /// * `assignments` - The assignment store
    /// * `settings` - The meeting days and roster
    #[must_use]
    pub const fn new(assignments: AssignmentsStore, settings: Settings) -> Self {
        Self {
            assignments,
            settings,
        }
    }

    /// Creates a state with settings and no assignments.
    #[must_use]
    pub const fn with_settings(settings: Settings) -> Self {
        Self::new(AssignmentsStore::new(), settings)
    }
}

/// The result of a successful state transition.
///
/// Transitions are pure: they either produce a new state or fail without
/// touching the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: RosterState,
    /// Which part of the document must be written to make it durable.
    pub scope: WriteScope,
}
