//! Mapping ranked item indices back to external item ids.

use crate::ranking::RankedItem;
use data_loader::{ItemIndex, ItemMap};
use thiserror::Error;

/// External item id as printed in the recommendation list
pub type ItemId = u64;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Item {external_id:?} (index {index}) is not a numeric id")]
    NonNumericItemId {
        external_id: String,
        index: ItemIndex,
    },
}

/// Translate ranked indices into external ids, keeping the ranking order.
///
/// An index with no entry in the item map is skipped, so the result can be
/// shorter than `ranked`. A mapped id that is not an unsigned integer is an
/// error.
pub fn to_external_ids(ranked: &[RankedItem], items: &ItemMap) -> Result<Vec<ItemId>, MappingError> {
    let mut ids = Vec::with_capacity(ranked.len());

    for item in ranked {
        let Some(external_id) = items.external_id_for(item.index) else {
            tracing::debug!("No external id for item index {}, skipping", item.index);
            continue;
        };

        let id = external_id
            .trim()
            .parse::<ItemId>()
            .map_err(|_| MappingError::NonNumericItemId {
                external_id: external_id.to_string(),
                index: item.index,
            })?;
        ids.push(id);
    }

    Ok(ids)
}
