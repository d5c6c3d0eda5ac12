// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DocumentWriter, Notification, NotificationKind, NotificationSink, RosterState};
use meeting_roster_domain::{AssignmentValue, AssignmentsStore, DateKey, Role, Settings};
use std::cell::RefCell;

pub fn date(s: &str) -> DateKey {
    s.parse().unwrap()
}

pub fn create_test_settings() -> Settings {
    Settings::new(
        vec![3, 6],
        ["Ana!", "Bruno", "Carla\"", "Diego"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    )
}

/// Ana reads on 2024-01-03, Diego is on stage on 2024-02-05 and Bruno
/// presides on 2024-02-07.
pub fn create_test_state() -> RosterState {
    let mut assignments: AssignmentsStore = AssignmentsStore::new();
    assignments.set_role(
        date("2024-01-03"),
        Role::Leitura,
        AssignmentValue::new("Ana!", None),
    );
    assignments.set_role(
        date("2024-02-05"),
        Role::Palco,
        AssignmentValue::new("Diego", None),
    );
    assignments.set_role(
        date("2024-02-07"),
        Role::Presidencia,
        AssignmentValue::new("Bruno", None),
    );
    RosterState::new(assignments, create_test_settings())
}

/// Collects notifications in order.
#[derive(Default)]
pub struct RecordingSink {
    pub received: RefCell<Vec<Notification>>,
}

impl RecordingSink {
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.received.borrow().iter().map(|n| n.kind).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}

/// Keeps the last written document, or fails every write when `fail` is set.
#[derive(Default)]
pub struct MemoryWriter {
    pub stored: RosterState,
    pub fail: bool,
    pub assignment_writes: usize,
    pub settings_writes: usize,
}

impl DocumentWriter for MemoryWriter {
    type Error = String;

    fn write_assignments(&mut self, assignments: &AssignmentsStore) -> Result<(), Self::Error> {
        if self.fail {
            return Err(String::from("backend unreachable"));
        }
        self.assignment_writes += 1;
        self.stored.assignments = assignments.clone();
        Ok(())
    }

    fn write_settings(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        if self.fail {
            return Err(String::from("backend unreachable"));
        }
        self.settings_writes += 1;
        self.stored.settings = settings.clone();
        Ok(())
    }
}
