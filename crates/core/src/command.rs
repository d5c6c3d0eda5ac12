// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::RosterState;
use meeting_roster_domain::{DateKey, Role, Settings};

/// A mutation represents user intent as data only.
///
/// Mutations are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set or clear the person holding a role on a date.
    Assign {
        /// The meeting date.
        date: DateKey,
        /// The role being edited.
        role: Role,
        /// The person to assign. An empty string clears the role.
        person: String,
        /// Optional free-text note shown next to the person.
        note: Option<String>,
    },
    /// Replace the settings, dropping assignments of removed people.
    SaveSettings {
        /// The new meeting days and roster.
        settings: Settings,
    },
    /// Remove every date before the first day of the month of `today`.
    ClearPast {
        /// The current date as seen by the caller.
        today: DateKey,
    },
    /// Replace the whole document with externally supplied data.
    Import {
        /// The validated document.
        document: RosterState,
    },
}

/// The part of the document a mutation has to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteScope {
    /// Only the assignments changed.
    Assignments,
    /// Assignments and settings are written together.
    Document,
}

/// Notification texts shown while a mutation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationMessages {
    /// Shown when the mutation starts.
    pub loading: &'static str,
    /// Shown when the write succeeds.
    pub success: &'static str,
    /// Shown when the write fails and the state is rolled back.
    pub failure: &'static str,
}

impl Mutation {
    /// A short, stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "Assign",
            Self::SaveSettings { .. } => "SaveSettings",
            Self::ClearPast { .. } => "ClearPast",
            Self::Import { .. } => "Import",
        }
    }

    #[must_use]
    pub const fn write_scope(&self) -> WriteScope {
        match self {
            Self::Assign { .. } | Self::ClearPast { .. } => WriteScope::Assignments,
            Self::SaveSettings { .. } | Self::Import { .. } => WriteScope::Document,
        }
    }

    /// The user-facing notification texts for this mutation.
    #[must_use]
    pub const fn messages(&self) -> MutationMessages {
        match self {
            Self::Assign { .. } => MutationMessages {
                loading: "Salvando designação...",
                success: "Designação salva com sucesso!",
                failure: "Falha ao salvar. Verifique sua conexão.",
            },
            Self::SaveSettings { .. } => MutationMessages {
                loading: "Salvando configurações...",
                success: "Configurações salvas com sucesso!",
                failure: "Falha ao salvar. Verifique sua conexão.",
            },
            Self::ClearPast { .. } => MutationMessages {
                loading: "Limpando designações...",
                success: "Designações antigas limpas!",
                failure: "Falha ao limpar. Verifique sua conexão.",
            },
            Self::Import { .. } => MutationMessages {
                loading: "Importando dados...",
                success: "Dados importados com sucesso!",
                failure: "Falha ao importar dados. Verifique o arquivo.",
            },
        }
    }
}
