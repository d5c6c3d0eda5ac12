// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The cached read/write path to the roster document.
//!
//! The first read fails soft: a missing, unreadable or malformed document is
//! replaced by the built-in defaults and only logged. An explicit reload and
//! every write fail hard so that the caller keeps or rolls back its state.

use crate::error::PersistenceError;
use crate::store::{DocumentStore, StoredDocument};
use meeting_roster::{DocumentWriter, RosterState};
use meeting_roster_domain::{AssignmentsStore, Settings};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// What the gateway last loaded or wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedDocument {
    state: RosterState,
    /// The stored version this state is based on. `None` when the store
    /// could not be read, in which case the next write is unconditional.
    version: Option<i64>,
}

/// The sole read/write path to the stored roster document.
#[derive(Debug)]
pub struct PersistenceGateway<S: DocumentStore> {
    store: S,
    defaults: RosterState,
    cache: Option<CachedDocument>,
}

impl<S: DocumentStore> PersistenceGateway<S> {
    /// Creates a gateway with an empty cache.
    ///
    /// # Arguments
    ///
    /// * `store` - The durable document store
    /// * `defaults` - The document used when nothing usable is stored
    #[must_use]
    pub const fn new(store: S, defaults: RosterState) -> Self {
        Self {
            store,
            defaults,
            cache: None,
        }
    }

    /// Warms the cache with one read. Never fails.
    pub fn initialize(&mut self) -> &RosterState {
        self.load()
    }

    /// Returns the cached assignments, loading them first if needed.
    pub fn read_assignments(&mut self) -> AssignmentsStore {
        self.cached().assignments.clone()
    }

    /// Returns the cached settings, loading them first if needed.
    pub fn read_settings(&mut self) -> Settings {
        self.cached().settings.clone()
    }

    /// Returns the whole cached document, loading it first if needed.
    pub fn read_document(&mut self) -> &RosterState {
        self.cached()
    }

    /// Reads the store again and replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. The cache is left as it
    /// was before the call.
    pub fn reload(&mut self) -> Result<&RosterState, PersistenceError> {
        let fetched: Option<StoredDocument> = self.store.fetch().inspect_err(|err| {
            error!(error = %err, "Failed to reload roster document, keeping cached state");
        })?;
        let loaded: CachedDocument = self.cached_from(fetched);
        Ok(&self.cache.insert(loaded).state)
    }

    /// The version the cache is based on, if known.
    #[must_use]
    pub fn version(&self) -> Option<i64> {
        self.cache.as_ref().and_then(|cached| cached.version)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Persists new assignments together with the cached settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or stored. The
    /// cache is left as it was before the call.
    pub fn write_assignments(
        &mut self,
        assignments: &AssignmentsStore,
    ) -> Result<(), PersistenceError> {
        let settings: Settings = self.cached().settings.clone();
        self.write(RosterState::new(assignments.clone(), settings))
    }

    /// Persists new settings together with the cached assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or stored. The
    /// cache is left as it was before the call.
    pub fn write_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        let assignments: AssignmentsStore = self.cached().assignments.clone();
        self.write(RosterState::new(assignments, settings.clone()))
    }

    /// Persists a whole document in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or stored. The
    /// cache is left as it was before the call.
    pub fn write_document(&mut self, state: &RosterState) -> Result<(), PersistenceError> {
        self.write(state.clone())
    }

    fn ensure_loaded(&mut self) {
        if self.cache.is_none() {
            self.load();
        }
    }

    fn cached(&mut self) -> &RosterState {
        self.ensure_loaded();
        match &self.cache {
            Some(cached) => &cached.state,
            None => &self.defaults,
        }
    }

    fn load(&mut self) -> &RosterState {
        let loaded: CachedDocument = match self.store.fetch() {
            Ok(fetched) => self.cached_from(fetched),
            Err(err) => {
                error!(error = %err, "Failed to read roster document, using defaults");
                CachedDocument {
                    state: self.defaults.clone(),
                    version: None,
                }
            }
        };
        &self.cache.insert(loaded).state
    }

    fn cached_from(&self, fetched: Option<StoredDocument>) -> CachedDocument {
        match fetched {
            Some(StoredDocument { body, version }) => match decode_document(&body) {
                Ok(state) => {
                    debug!(version, "Loaded roster document");
                    CachedDocument {
                        state,
                        version: Some(version),
                    }
                }
                Err(reason) => {
                    warn!(version, %reason, "Stored roster document is malformed, using defaults");
                    CachedDocument {
                        state: self.defaults.clone(),
                        version: Some(version),
                    }
                }
            },
            None => {
                info!("No roster document stored yet, using defaults");
                CachedDocument {
                    state: self.defaults.clone(),
                    version: Some(0),
                }
            }
        }
    }

    fn write(&mut self, next: RosterState) -> Result<(), PersistenceError> {
        self.ensure_loaded();
        let body: String = serde_json::to_string(&next)?;
        let expected: Option<i64> = self.version();

        // The cache reflects the new document before the store confirms it
        let previous: Option<CachedDocument> = self.cache.replace(CachedDocument {
            state: next,
            version: expected,
        });

        match self.store.store(&body, expected) {
            Ok(version) => {
                if let Some(cached) = self.cache.as_mut() {
                    cached.version = Some(version);
                }
                debug!(version, "Stored roster document");
                Ok(())
            }
            Err(err) => {
                self.cache = previous;
                error!(error = %err, "Failed to store roster document");
                Err(err)
            }
        }
    }
}

impl<S: DocumentStore> DocumentWriter for PersistenceGateway<S> {
    type Error = PersistenceError;

    fn write_assignments(&mut self, assignments: &AssignmentsStore) -> Result<(), Self::Error> {
        Self::write_assignments(self, assignments)
    }

    fn write_settings(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        Self::write_settings(self, settings)
    }

    fn write_document(&mut self, state: &RosterState) -> Result<(), Self::Error> {
        Self::write_document(self, state)
    }
}

/// Decodes a stored document, checking its shape before its contents.
fn decode_document(body: &str) -> Result<RosterState, String> {
    let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let object: &serde_json::Map<String, Value> = value
        .as_object()
        .ok_or_else(|| String::from("document is not an object"))?;
    for field in ["assignments", "settings"] {
        if !object.get(field).is_some_and(Value::is_object) {
            return Err(format!("'{field}' is missing or not an object"));
        }
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
