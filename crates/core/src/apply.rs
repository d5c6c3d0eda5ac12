// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Mutation, WriteScope};
use crate::error::CoreError;
use crate::state::{RosterState, TransitionResult};
use meeting_roster_domain::{
    AssignmentValue, AssignmentsStore, DateKey, DomainError, RestrictionPolicy, Role,
    is_assigned_elsewhere, validate_settings,
};

/// Applies a mutation to the current state, producing the next state.
///
/// The input state is never modified. Every rule is checked before any
/// change is computed, so a rejected mutation has no side effects.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `mutation` - The mutation to apply
/// * `policy` - The restriction policy used to check eligibility
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and its write scope
/// * `Err(CoreError)` if the mutation is invalid
///
/// # Errors
///
/// Returns an error if:
/// - An assigned person is not on the roster
/// - An assigned person's restriction does not allow the role
/// - An assigned person already holds another role on that date
/// - Saved settings contain an invalid roster or meeting day
pub fn apply(
    state: &RosterState,
    mutation: Mutation,
    policy: &RestrictionPolicy,
) -> Result<TransitionResult, CoreError> {
    let scope: WriteScope = mutation.write_scope();
    let new_state: RosterState = match mutation {
        Mutation::Assign {
            date,
            role,
            person,
            note,
        } => apply_assign(state, date, role, person, note, policy)?,
        Mutation::SaveSettings { settings } => {
            validate_settings(&settings)?;

            // Removing someone from the roster un-assigns them everywhere
            let mut assignments: AssignmentsStore = state.assignments.clone();
            assignments.retain_people(&settings.people);
            RosterState::new(assignments, settings)
        }
        Mutation::ClearPast { today } => {
            let mut assignments: AssignmentsStore = state.assignments.clone();
            assignments.retain_from(today.first_of_month());
            RosterState::new(assignments, state.settings.clone())
        }
        Mutation::Import { document } => document,
    };

    Ok(TransitionResult { new_state, scope })
}

fn apply_assign(
    state: &RosterState,
    date: DateKey,
    role: Role,
    person: String,
    note: Option<String>,
    policy: &RestrictionPolicy,
) -> Result<RosterState, CoreError> {
    let mut new_state: RosterState = state.clone();

    if person.is_empty() {
        new_state.assignments.clear_role(date, role);
        return Ok(new_state);
    }

    if !state.settings.has_person(&person) {
        return Err(DomainError::PersonNotInRoster(person).into());
    }
    if !policy.is_eligible(&person, role) {
        return Err(DomainError::IneligibleForRole { person, role }.into());
    }
    if is_assigned_elsewhere(&state.assignments, &date, role, &person) {
        return Err(DomainError::AlreadyAssignedOnDay { person, date }.into());
    }

    new_state
        .assignments
        .set_role(date, role, AssignmentValue::new(person, note));
    Ok(new_state)
}
