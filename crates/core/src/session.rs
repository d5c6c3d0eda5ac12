// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The optimistic mutation controller.
//!
//! Every mutation follows the same sequence: snapshot the visible state,
//! compute the next state, show it, announce the write, persist, then
//! either keep the new state or restore the snapshot.

use crate::apply::apply;
use crate::command::{Mutation, MutationMessages, WriteScope};
use crate::error::CoreError;
use crate::notification::{Notification, NotificationSink};
use crate::state::{RosterState, TransitionResult};
use meeting_roster_domain::{AssignmentsStore, RestrictionPolicy, Settings};
use tracing::{debug, error, info};

/// The durable side of a mutation.
///
/// The persistence gateway implements this; tests use in-memory writers.
pub trait DocumentWriter {
    /// The failure reported when a write does not become durable.
    type Error: std::fmt::Display;

    /// Persists new assignments, keeping the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_assignments(&mut self, assignments: &AssignmentsStore) -> Result<(), Self::Error>;

    /// Persists new settings, keeping the stored assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_settings(&mut self, settings: &Settings) -> Result<(), Self::Error>;

    /// Persists both halves of the document.
    ///
    /// The default writes assignments first, then settings. Writers that can
    /// store the document in one step should override it.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    fn write_document(&mut self, state: &RosterState) -> Result<(), Self::Error> {
        self.write_assignments(&state.assignments)?;
        self.write_settings(&state.settings)
    }
}

/// Where a session is in the life of its latest mutation.
///
/// `Idle → Applying → Committed | RolledBack`. The two outcomes are resting
/// states: the next mutation starts from either of them as from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MutationPhase {
    #[default]
    Idle,
    /// The next state is visible and its write is in flight.
    Applying,
    /// The write succeeded.
    Committed,
    /// The write failed and the snapshot was restored.
    RolledBack,
}

impl MutationPhase {
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Applying)
    }
}

/// Why a commit did not take effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The mutation broke a rule. Nothing changed and nothing was announced.
    Rejected(CoreError),
    /// The write failed. The state was rolled back and an error was announced.
    PersistenceFailed {
        /// The writer's error message.
        message: String,
    },
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "Mutation rejected: {err}"),
            Self::PersistenceFailed { message } => {
                write!(f, "Persistence failed, changes rolled back: {message}")
            }
        }
    }
}

impl std::error::Error for CommitError {}

impl From<CoreError> for CommitError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

/// The visible roster state and the controller that changes it.
#[derive(Debug, Clone)]
pub struct RosterSession {
    state: RosterState,
    policy: RestrictionPolicy,
    phase: MutationPhase,
}

impl RosterSession {
    /// Creates a session showing `state`.
    ///
    /// # Arguments
    ///
    /// * `state` - The state loaded from persistence
    /// * `policy` - The restriction policy for eligibility checks
    #[must_use]
    pub const fn new(state: RosterState, policy: RestrictionPolicy) -> Self {
        Self {
            state,
            policy,
            phase: MutationPhase::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &RosterState {
        &self.state
    }

    #[must_use]
    pub const fn policy(&self) -> &RestrictionPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn phase(&self) -> MutationPhase {
        self.phase
    }

    /// Applies a mutation optimistically and persists it.
    ///
    /// # Arguments
    ///
    /// * `mutation` - The mutation to apply
    /// * `writer` - The durable store for the new state
    /// * `sink` - Receives the loading, success and error notifications
    ///
    /// # Returns
    ///
    /// * `Ok(&RosterState)` with the committed state
    ///
    /// # Errors
    ///
    /// Returns `CommitError::Rejected` if the mutation breaks a rule, before
    /// anything changes. Returns `CommitError::PersistenceFailed` if the
    /// write fails, after the state has been rolled back.
    pub fn commit<W, N>(
        &mut self,
        mutation: Mutation,
        writer: &mut W,
        sink: &N,
    ) -> Result<&RosterState, CommitError>
    where
        W: DocumentWriter + ?Sized,
        N: NotificationSink + ?Sized,
    {
        let name: &'static str = mutation.name();
        let messages: MutationMessages = mutation.messages();
        let scope: WriteScope = mutation.write_scope();
        let policy: RestrictionPolicy = self.policy.clone();

        self.transact(
            name,
            move |state| apply(state, mutation, &policy),
            scope,
            messages,
            writer,
            sink,
        )
    }

    /// Runs any pure transition through the optimistic write sequence.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs
    /// * `transition` - Computes the next state from the current one
    /// * `scope` - Which part of the document to write
    /// * `messages` - Notification texts
    /// * `writer` - The durable store
    /// * `sink` - The notification receiver
    ///
    /// # Errors
    ///
    /// Returns `CommitError::Rejected` if `transition` fails and
    /// `CommitError::PersistenceFailed` if the write fails.
    pub fn transact<F, W, N>(
        &mut self,
        name: &str,
        transition: F,
        scope: WriteScope,
        messages: MutationMessages,
        writer: &mut W,
        sink: &N,
    ) -> Result<&RosterState, CommitError>
    where
        F: FnOnce(&RosterState) -> Result<TransitionResult, CoreError>,
        W: DocumentWriter + ?Sized,
        N: NotificationSink + ?Sized,
    {
        let next: TransitionResult = transition(&self.state).map_err(|err| {
            debug!(mutation = name, error = %err, "Mutation rejected");
            CommitError::Rejected(err)
        })?;

        let rollback_state: RosterState = std::mem::replace(&mut self.state, next.new_state);
        self.phase = MutationPhase::Applying;
        debug!(mutation = name, ?scope, "Applying mutation");
        sink.notify(Notification::loading(messages.loading));

        let written: Result<(), W::Error> = match scope {
            WriteScope::Assignments => writer.write_assignments(&self.state.assignments),
            WriteScope::Document => writer.write_document(&self.state),
        };

        match written {
            Ok(()) => {
                self.phase = MutationPhase::Committed;
                info!(mutation = name, "Mutation committed");
                sink.notify(Notification::success(messages.success));
                Ok(&self.state)
            }
            Err(err) => {
                self.state = rollback_state;
                self.phase = MutationPhase::RolledBack;
                let message: String = err.to_string();
                error!(mutation = name, error = %message, "Write failed, mutation rolled back");
                sink.notify(Notification::error(messages.failure));
                Err(CommitError::PersistenceFailed { message })
            }
        }
    }

    /// Replaces the visible state without persisting it.
    ///
    /// Used after the backing store was reloaded.
    pub fn reset(&mut self, state: RosterState) {
        self.state = state;
        self.phase = MutationPhase::Idle;
    }
}
