//! Provider-scoped remote identifier storage.
//!
//! A membership may hold one remote identifier per provider-defined purpose,
//! keyed by a well-known scope string (e.g. a purchase token key). The map
//! lives inside the aggregate and is persisted with it by the storage
//! collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Remote identifiers attached to a membership, keyed by provider scope.
///
/// # Invariants
///
/// - At most one current value per key: inserting under an existing key
///   overwrites rather than accumulates.
/// - Lookup on an empty map is not an error; it returns `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteIdentifierMap {
    ids: BTreeMap<String, String>,
}

impl RemoteIdentifierMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.ids.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, returning the previous value if one existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.ids.insert(key.into(), value.into())
    }

    /// Removes the identifier stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.ids.remove(key)
    }

    /// Returns true if no identifiers are stored.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of stored identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Iterates over (key, value) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
