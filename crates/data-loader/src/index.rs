//! Building the IdMaps from the map artifacts on disk.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;

impl IdMaps {
    /// Load both id maps.
    ///
    /// The two files are parsed in parallel; either one failing fails the load.
    pub fn load_from_files(item_map_path: &Path, user_map_path: &Path) -> Result<Self> {
        tracing::debug!(
            "Loading id maps from {:?} and {:?}",
            item_map_path,
            user_map_path
        );

        let (items, users) = rayon::join(
            || parser::parse_id_map(item_map_path),
            || parser::parse_id_map(user_map_path),
        );

        let items = ItemMap::from_entries(items?);
        let users = UserMap::from_entries(users?);

        tracing::debug!("Loaded {} items, {} users", items.len(), users.len());
        Ok(Self { users, items })
    }
}
