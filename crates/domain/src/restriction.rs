// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role restrictions and eligibility.
//!
//! A restriction is written into the roster as a single trailing character
//! on a person's display name. The policy turns that character into an
//! explicit [`Restriction`], so callers never inspect names themselves.

use crate::types::Role;
use std::collections::{BTreeMap, BTreeSet};

/// The built-in restriction codes and the roles each one allows.
///
/// The allowed sets are nested: `"` ⊂ `*` ⊂ `!`.
pub const STANDARD_RESTRICTION_CODES: [(char, &[Role]); 3] = [
    ('!', &[Role::Presidencia, Role::Leitura, Role::OracaoFinal]),
    ('*', &[Role::Presidencia, Role::OracaoFinal]),
    ('"', &[Role::OracaoFinal]),
];

/// Which roles a person may hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    /// Eligible for every role.
    Unrestricted,
    /// Eligible only for the listed roles.
    AllowedRoles(BTreeSet<Role>),
}

impl Restriction {
    /// Returns whether this restriction permits `role`.
    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::AllowedRoles(roles) => roles.contains(&role),
        }
    }
}

/// A roster entry with its restriction resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// The display name exactly as it appears on the roster.
    pub name: String,
    /// The restriction inferred from the name.
    pub restriction: Restriction,
}

/// Maps trailing name characters to allowed-role sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionPolicy {
    codes: BTreeMap<char, BTreeSet<Role>>,
}

impl RestrictionPolicy {
    /// A policy with no codes; everybody is unrestricted.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// The policy with [`STANDARD_RESTRICTION_CODES`].
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_RESTRICTION_CODES
            .into_iter()
            .fold(Self::empty(), |policy, (code, roles)| {
                policy.with_code(code, roles.iter().copied())
            })
    }

    /// Adds or replaces a code.
    #[must_use]
    pub fn with_code(mut self, code: char, roles: impl IntoIterator<Item = Role>) -> Self {
        self.codes.insert(code, roles.into_iter().collect());
        self
    }

    /// Iterates the configured codes in character order.
    pub fn codes(&self) -> impl Iterator<Item = (char, &BTreeSet<Role>)> {
        self.codes.iter().map(|(code, roles)| (*code, roles))
    }

    /// Resolves the restriction encoded in `name`.
    ///
    /// An empty name has no last character and resolves to
    /// [`Restriction::Unrestricted`].
    #[must_use]
    pub fn classify(&self, name: &str) -> Restriction {
        name.chars()
            .next_back()
            .and_then(|last| self.codes.get(&last))
            .map_or(Restriction::Unrestricted, |roles| {
                Restriction::AllowedRoles(roles.clone())
            })
    }

    /// Resolves a roster entry.
    #[must_use]
    pub fn person(&self, name: &str) -> Person {
        Person {
            name: name.to_string(),
            restriction: self.classify(name),
        }
    }

    #[must_use]
    pub fn is_eligible(&self, name: &str, role: Role) -> bool {
        self.classify(name).permits(role)
    }

    /// Filters `roster` down to the people allowed to hold `role`.
    ///
    /// Roster order is preserved; callers sort for presentation.
    #[must_use]
    pub fn eligible_people(&self, roster: &[String], role: Role) -> Vec<String> {
        roster
            .iter()
            .filter(|name| self.is_eligible(name, role))
            .cloned()
            .collect()
    }
}

impl Default for RestrictionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Filters `roster` with the standard restriction codes.
#[must_use]
pub fn eligible_people(roster: &[String], role: Role) -> Vec<String> {
    RestrictionPolicy::standard().eligible_people(roster, role)
}
