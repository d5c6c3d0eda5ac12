// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use meeting_roster::{Notification, NotificationKind, NotificationSink, RosterSession, RosterState};
use meeting_roster_domain::{
    AssignmentValue, AssignmentsStore, DateKey, RestrictionPolicy, Role, Settings,
};
use meeting_roster_persistence::{MemoryDocumentStore, PersistenceGateway};
use std::cell::RefCell;

pub fn date(s: &str) -> DateKey {
    s.parse().unwrap()
}

/// Ana reads on 2024-01-03 (a Wednesday) and Bruno presides on 2024-01-06.
pub fn create_test_state() -> RosterState {
    let mut assignments: AssignmentsStore = AssignmentsStore::new();
    assignments.set_role(
        date("2024-01-03"),
        Role::Leitura,
        AssignmentValue::new("Ana!", Some(String::from("Lucas 4"))),
    );
    assignments.set_role(
        date("2024-01-06"),
        Role::Presidencia,
        AssignmentValue::new("Bruno", None),
    );
    RosterState::new(
        assignments,
        Settings::new(
            vec![3, 6],
            ["Ana!", "Bruno", "Carla\"", "Diego"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        ),
    )
}

pub struct Fixture {
    pub session: RosterSession,
    pub gateway: PersistenceGateway<MemoryDocumentStore>,
    pub sink: RecordingSink,
}

/// A session over an in-memory store that already holds the test state.
pub fn create_fixture() -> Fixture {
    let body: String = serde_json::to_string(&create_test_state()).unwrap();
    let mut gateway: PersistenceGateway<MemoryDocumentStore> = PersistenceGateway::new(
        MemoryDocumentStore::with_body(body),
        RosterState::default(),
    );
    let state: RosterState = gateway.initialize().clone();
    Fixture {
        session: RosterSession::new(state, RestrictionPolicy::standard()),
        gateway,
        sink: RecordingSink::default(),
    }
}

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
