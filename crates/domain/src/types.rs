// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Wire format of a date key.
const DATE_KEY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A named duty slot filled by at most one person per meeting date.
///
/// The declaration order is the display order, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Presidência.
    Presidencia,
    /// Leitura.
    Leitura,
    /// Oração Final.
    OracaoFinal,
    /// Palco.
    Palco,
    /// Áudio & Vídeo.
    AudioVideo,
    /// Indicador 1.
    Indicador1,
    /// Indicador 2.
    Indicador2,
    /// Microfone Volante 1.
    MicrofoneVolante1,
    /// Microfone Volante 2.
    MicrofoneVolante2,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Self; 9] = [
        Self::Presidencia,
        Self::Leitura,
        Self::OracaoFinal,
        Self::Palco,
        Self::AudioVideo,
        Self::Indicador1,
        Self::Indicador2,
        Self::MicrofoneVolante1,
        Self::MicrofoneVolante2,
    ];

    /// The display name, which is also the persisted name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Presidencia => "Presidência",
            Self::Leitura => "Leitura",
            Self::OracaoFinal => "Oração Final",
            Self::Palco => "Palco",
            Self::AudioVideo => "Áudio & Vídeo",
            Self::Indicador1 => "Indicador 1",
            Self::Indicador2 => "Indicador 2",
            Self::MicrofoneVolante1 => "Microfone Volante 1",
            Self::MicrofoneVolante2 => "Microfone Volante 2",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::UnknownRole(s.to_string()))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name: String = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A calendar date used as the primary key of the assignments store.
///
/// The textual form is the fixed-width, zero-padded `YYYY-MM-DD`, so the
/// chronological `Ord` of this type coincides with the lexicographic order
/// of the persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0
    }

    /// Returns the weekday index with Sunday as 0.
    #[must_use]
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().number_days_from_sunday()
    }

    /// Returns the key for the first day of this key's calendar month.
    #[must_use]
    pub fn first_of_month(&self) -> Self {
        Self(self.0.replace_day(1).unwrap_or(self.0))
    }

    /// Whole days from `earlier` to `self`; negative when `earlier` is later.
    #[must_use]
    pub fn days_since(&self, earlier: Self) -> i64 {
        (self.0 - earlier.0).whole_days()
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `[year]` would also accept signed or wider years.
        if s.len() != 10 {
            return Err(DomainError::InvalidDateKey {
                input: s.to_string(),
                error: String::from("expected YYYY-MM-DD"),
            });
        }
        Date::parse(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::InvalidDateKey {
                input: s.to_string(),
                error: e.to_string(),
            })
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted: String = self
            .0
            .format(DATE_KEY_FORMAT)
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One person's assignment to one role on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentValue {
    /// Free-text name, matched against the roster by exact equality.
    pub person: String,
    /// Optional note shown next to the assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AssignmentValue {
    /// Creates an assignment value. An empty note is stored as absent.
    #[must_use]
    pub fn new(person: impl Into<String>, note: Option<String>) -> Self {
        Self {
            person: person.into(),
            note: note.filter(|n| !n.is_empty()),
        }
    }

    /// An empty person means "unassigned".
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.person.is_empty()
    }
}

/// The role bindings of a single date.
///
/// Entries with an empty person are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Role, AssignmentValue>",
    into = "BTreeMap<Role, AssignmentValue>"
)]
pub struct Assignment {
    roles: BTreeMap<Role, AssignmentValue>,
}

impl Assignment {
    /// Creates an empty assignment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, role: Role) -> Option<&AssignmentValue> {
        self.roles.get(&role)
    }

    /// Binds a role. An unassigned value removes the binding instead.
    pub fn insert(&mut self, role: Role, value: AssignmentValue) {
        if value.is_unassigned() {
            self.roles.remove(&role);
        } else {
            self.roles.insert(role, value);
        }
    }

    pub fn remove(&mut self, role: Role) -> Option<AssignmentValue> {
        self.roles.remove(&role)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Iterates bindings in role display order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &AssignmentValue)> {
        self.roles.iter().map(|(role, value)| (*role, value))
    }

    /// Keeps only the bindings for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Role, &AssignmentValue) -> bool) {
        self.roles.retain(|role, value| keep(*role, value));
    }
}

impl From<BTreeMap<Role, AssignmentValue>> for Assignment {
    fn from(roles: BTreeMap<Role, AssignmentValue>) -> Self {
        let mut assignment: Self = Self::new();
        for (role, value) in roles {
            assignment.insert(role, AssignmentValue::new(value.person, value.note));
        }
        assignment
    }
}

impl From<Assignment> for BTreeMap<Role, AssignmentValue> {
    fn from(assignment: Assignment) -> Self {
        assignment.roles
    }
}

impl FromIterator<(Role, AssignmentValue)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Role, AssignmentValue)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

/// All assignments, keyed by date.
///
/// Invariant: a date present in the store maps to a non-empty [`Assignment`].
/// Every mutating method and the deserializer uphold it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DateKey, Assignment>",
    into = "BTreeMap<DateKey, Assignment>"
)]
pub struct AssignmentsStore {
    days: BTreeMap<DateKey, Assignment>,
}

impl AssignmentsStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Returns the assignment for a date, if any role is bound on it.
    #[must_use]
    pub fn day(&self, date: &DateKey) -> Option<&Assignment> {
        self.days.get(date)
    }

    /// Returns the binding of `role` on `date`.
    #[must_use]
    pub fn role(&self, date: &DateKey, role: Role) -> Option<&AssignmentValue> {
        self.days.get(date).and_then(|day| day.get(role))
    }

    /// Sets or clears a role on a date.
    ///
    /// An empty `person` clears the role. A date whose assignment becomes
    /// empty is removed from the store.
    pub fn set_role(&mut self, date: DateKey, role: Role, value: AssignmentValue) {
        let day: &mut Assignment = self.days.entry(date).or_default();
        day.insert(role, value);
        if day.is_empty() {
            self.days.remove(&date);
        }
    }

    /// Clears a role on a date, dropping the date if nothing is left.
    pub fn clear_role(&mut self, date: DateKey, role: Role) -> Option<AssignmentValue> {
        let day: &mut Assignment = self.days.get_mut(&date)?;
        let removed: Option<AssignmentValue> = day.remove(role);
        if day.is_empty() {
            self.days.remove(&date);
        }
        removed
    }

    /// Removes every binding whose person is not in `people`, then drops
    /// dates left empty.
    pub fn retain_people(&mut self, people: &[String]) {
        for day in self.days.values_mut() {
            day.retain(|_, value| people.contains(&value.person));
        }
        self.days.retain(|_, day| !day.is_empty());
    }

    /// Removes every date strictly before `cutoff`.
    pub fn retain_from(&mut self, cutoff: DateKey) {
        self.days.retain(|date, _| *date >= cutoff);
    }

    /// Iterates dates in ascending (chronological) order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &Assignment)> {
        self.days.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of dates with at least one binding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Total number of role bindings across all dates.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.days.values().map(Assignment::len).sum()
    }
}

impl From<BTreeMap<DateKey, Assignment>> for AssignmentsStore {
    fn from(mut days: BTreeMap<DateKey, Assignment>) -> Self {
        days.retain(|_, day| !day.is_empty());
        Self { days }
    }
}

impl From<AssignmentsStore> for BTreeMap<DateKey, Assignment> {
    fn from(store: AssignmentsStore) -> Self {
        store.days
    }
}

impl FromIterator<(DateKey, Assignment)> for AssignmentsStore {
    fn from_iter<I: IntoIterator<Item = (DateKey, Assignment)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

/// Meeting days and the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Weekday indexes with Sunday as 0.
    pub meeting_days: Vec<u8>,
    /// Roster of display names, unique ignoring case.
    pub people: Vec<String>,
}

impl Settings {
    #[must_use]
    pub const fn new(meeting_days: Vec<u8>, people: Vec<String>) -> Self {
        Self {
            meeting_days,
            people,
        }
    }

    /// Exact-match roster lookup.
    #[must_use]
    pub fn has_person(&self, name: &str) -> bool {
        self.people.iter().any(|p| p == name)
    }

    #[must_use]
    pub fn is_meeting_day(&self, date: DateKey) -> bool {
        self.meeting_days.contains(&date.weekday_index())
    }
}
