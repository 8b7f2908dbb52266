//! Turning a score vector into a recommendation list.
//!
//! This crate provides:
//! - `top_k` for selecting the best-scoring item indices
//! - `to_external_ids` for mapping those indices back to item ids
//!
//! ## Architecture
//! The pipeline processes one score vector in two stages:
//! 1. Rank: keep the K highest scores, highest first
//! 2. Map: look up each index in the ItemMap (first match wins)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{rank_and_map, DEFAULT_TOP_K};
//!
//! let scores = predictor.predict(user_index)?;
//! let movie_ids = rank_and_map(&scores, &maps.items, DEFAULT_TOP_K)?;
//! ```

pub mod mapping;
pub mod ranking;

// Re-export main types
pub use mapping::{to_external_ids, ItemId, MappingError};
pub use ranking::{top_k, RankedItem, DEFAULT_TOP_K};

use data_loader::ItemMap;

/// Rank `scores` and map the best `k` to external item ids.
pub fn rank_and_map(scores: &[f32], items: &ItemMap, k: usize) -> Result<Vec<ItemId>, MappingError> {
    let ranked = top_k(scores, k);
    tracing::debug!(
        "Ranked {} of {} scores (k = {})",
        ranked.len(),
        scores.len(),
        k
    );
    to_external_ids(&ranked, items)
}
