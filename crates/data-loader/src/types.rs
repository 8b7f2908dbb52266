//! Core domain types for the id-mapping artifacts.
//!
//! The model only knows dense internal indices. These maps translate between
//! the application's external ids and those indices.

use crate::error::{DataLoadError, Result};
use serde::Deserialize;
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Dense internal index of a user, as enumerated at training time
pub type UserIndex = u32;

/// Dense internal index of an item (a column of the model's score vector)
pub type ItemIndex = u32;

// =============================================================================
// User map
// =============================================================================

/// External user id → internal index.
#[derive(Debug, Clone, Default)]
pub struct UserMap {
    indices: HashMap<String, UserIndex>,
}

impl UserMap {
    /// Build from `(external id, index)` pairs. A repeated key keeps the last index.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, UserIndex)>,
    {
        Self {
            indices: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, external_id: &str) -> Option<UserIndex> {
        self.indices.get(external_id).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index used for users the model has never seen: the middle of the
    /// enumeration, or 0 for an empty map.
    pub fn fallback_index(&self) -> UserIndex {
        (self.indices.len() / 2) as UserIndex
    }

    /// Resolve an external user id, substituting the fallback index for
    /// unknown users.
    pub fn resolve(&self, external_id: &str) -> UserIndex {
        match self.get(external_id) {
            Some(index) => index,
            None => {
                let fallback = self.fallback_index();
                tracing::debug!(
                    "Unknown user {:?}, using fallback index {}",
                    external_id,
                    fallback
                );
                fallback
            }
        }
    }
}

// =============================================================================
// Item map
// =============================================================================

/// External item id → internal index, with insertion order preserved.
///
/// Reverse lookups return the first entry (in insertion order) carrying the
/// requested index, so a map that is not a clean bijection still resolves
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct ItemMap {
    entries: Vec<(String, ItemIndex)>,
    first_by_index: HashMap<ItemIndex, usize>,
}

impl ItemMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(external id, index)` pairs in file order.
    ///
    /// A repeated key takes the later index but keeps its original position.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ItemIndex)>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut ordered: Vec<(String, ItemIndex)> = Vec::new();

        for (external_id, index) in entries {
            match positions.get(&external_id) {
                Some(&pos) => ordered[pos].1 = index,
                None => {
                    positions.insert(external_id.clone(), ordered.len());
                    ordered.push((external_id, index));
                }
            }
        }

        let mut first_by_index = HashMap::with_capacity(ordered.len());
        for (pos, (_, index)) in ordered.iter().enumerate() {
            first_by_index.entry(*index).or_insert(pos);
        }

        Self {
            entries: ordered,
            first_by_index,
        }
    }

    pub fn get(&self, external_id: &str) -> Option<ItemIndex> {
        self.entries
            .iter()
            .find(|(id, _)| id == external_id)
            .map(|(_, index)| *index)
    }

    /// First external id (in insertion order) mapped to `index`
    pub fn external_id_for(&self, index: ItemIndex) -> Option<&str> {
        self.first_by_index
            .get(&index)
            .map(|&pos| self.entries[pos].0.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemIndex)> {
        self.entries.iter().map(|(id, index)| (id.as_str(), *index))
    }
}

/// Both id maps, as loaded for one invocation
#[derive(Debug, Clone, Default)]
pub struct IdMaps {
    pub users: UserMap,
    pub items: ItemMap,
}

// =============================================================================
// Ratings payload
// =============================================================================

/// The ratings document passed on the command line.
///
/// It must be valid JSON, but its content plays no part in scoring.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RatingsPayload(serde_json::Value);

impl RatingsPayload {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| DataLoadError::Json {
            file: "<ratings argument>".to_string(),
            source,
        })
    }

    /// Number of top-level entries (array elements or object keys)
    pub fn entry_count(&self) -> usize {
        match &self.0 {
            serde_json::Value::Array(items) => items.len(),
            serde_json::Value::Object(fields) => fields.len(),
            _ => 0,
        }
    }
}
