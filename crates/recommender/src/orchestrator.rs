//! # Recommendation Orchestrator
//!
//! Runs the whole one-shot pipeline for a single user:
//! 1. Load the model through the loader chain
//! 2. Load the user and item id maps
//! 3. Parse the ratings payload
//! 4. Resolve the user's internal index (unknown users get the fallback)
//! 5. Score every item with one predictor call
//! 6. Rank and keep the top K
//! 7. Map indices back to external item ids
//!
//! Every failure along the way ends in `RecommendationOutcome::Unavailable`;
//! nothing is retried and no partial result is returned.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use data_loader::{DataLoadError, IdMaps, ItemMap, RatingsPayload, UserIndex};
use model::{LoaderChain, ModelError, Predictor};
use pipeline::{rank_and_map, ItemId, MappingError};

use crate::config::RecommenderConfig;

/// Why no recommendation could be produced
#[derive(Error, Debug)]
pub enum Unavailable {
    #[error("no model available")]
    NoModel,

    #[error("id maps could not be loaded: {0}")]
    Maps(#[source] DataLoadError),

    #[error("ratings payload is not valid JSON: {0}")]
    Ratings(#[source] DataLoadError),

    #[error("prediction failed: {0}")]
    Prediction(#[from] ModelError),

    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

/// Result of one invocation.
#[derive(Debug)]
pub enum RecommendationOutcome {
    /// External item ids, highest predicted score first
    Recommended(Vec<ItemId>),
    /// Nothing could be recommended; callers see an empty list
    Unavailable(Unavailable),
}

impl RecommendationOutcome {
    /// The ids to hand back; empty when unavailable.
    pub fn items(&self) -> &[ItemId] {
        match self {
            RecommendationOutcome::Recommended(ids) => ids,
            RecommendationOutcome::Unavailable(_) => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RecommendationOutcome::Recommended(_))
    }

    /// Render as a single-line JSON array of integers.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self.items()).unwrap_or_else(|_| "[]".to_string())
    }
}

impl From<Result<Vec<ItemId>, Unavailable>> for RecommendationOutcome {
    fn from(result: Result<Vec<ItemId>, Unavailable>) -> Self {
        match result {
            Ok(ids) => RecommendationOutcome::Recommended(ids),
            Err(reason) => RecommendationOutcome::Unavailable(reason),
        }
    }
}

/// One-shot recommender over the artifacts named by a `RecommenderConfig`
pub struct Recommender {
    config: RecommenderConfig,
    loaders: LoaderChain,
}

impl Recommender {
    /// Create a recommender that tries every known model layout
    pub fn new(config: RecommenderConfig) -> Self {
        Self::with_loaders(config, LoaderChain::standard())
    }

    pub fn with_loaders(config: RecommenderConfig, loaders: LoaderChain) -> Self {
        Self { config, loaders }
    }

    /// Main entry point: recommend items for an external user id.
    ///
    /// `ratings_json` must parse as JSON but does not influence the result.
    pub fn recommend(&self, ratings_json: &str, user_id: &str) -> RecommendationOutcome {
        let outcome = RecommendationOutcome::from(self.try_recommend(ratings_json, user_id));
        if let RecommendationOutcome::Unavailable(reason) = &outcome {
            warn!("No recommendations for user {:?}: {}", user_id, reason);
        }
        outcome
    }

    fn try_recommend(&self, ratings_json: &str, user_id: &str) -> Result<Vec<ItemId>, Unavailable> {
        let start_time = Instant::now();

        let predictor = self
            .loaders
            .load(&self.config.model_path())
            .ok_or(Unavailable::NoModel)?;

        let maps = IdMaps::load_from_files(&self.config.item_map_path(), &self.config.user_map_path())
            .map_err(Unavailable::Maps)?;
        info!(
            "Loaded id maps: {} users, {} items",
            maps.users.len(),
            maps.items.len()
        );

        let ratings = RatingsPayload::parse(ratings_json).map_err(Unavailable::Ratings)?;
        debug!(
            "Ratings payload has {} entries (not used for scoring)",
            ratings.entry_count()
        );

        let user_index = maps.users.resolve(user_id);
        let recommendations =
            recommend_for_index(predictor.as_ref(), &maps.items, user_index, self.config.top_k)?;

        info!(
            "Selected {} recommendations for user {:?} (index {}) in {:.2?}",
            recommendations.len(),
            user_id,
            user_index,
            start_time.elapsed()
        );
        Ok(recommendations)
    }
}

/// Score, rank and map for an already-resolved internal user index.
pub fn recommend_for_index(
    predictor: &dyn Predictor,
    items: &ItemMap,
    user_index: UserIndex,
    k: usize,
) -> Result<Vec<ItemId>, Unavailable> {
    let scores = predictor.predict(user_index)?;
    debug!("Scored {} items for user index {}", scores.len(), user_index);
    Ok(rank_and_map(&scores, items, k)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::ScoreTable;

    #[test]
    fn test_outcome_json() {
        let outcome = RecommendationOutcome::Recommended(vec![550, 238, 13]);
        assert_eq!(outcome.to_json(), "[550,238,13]");
        assert!(outcome.is_available());

        let outcome = RecommendationOutcome::Unavailable(Unavailable::NoModel);
        assert_eq!(outcome.to_json(), "[]");
        assert!(outcome.items().is_empty());
        assert!(!outcome.is_available());

        assert_eq!(RecommendationOutcome::Recommended(Vec::new()).to_json(), "[]");
    }

    #[test]
    fn test_recommend_for_index() {
        let table = ScoreTable::from_rows(vec![vec![0.1, 0.9, 0.5], vec![0.8, 0.2, 0.4]]).unwrap();
        let items = ItemMap::from_entries(vec![
            ("550".to_string(), 0),
            ("238".to_string(), 1),
            ("13".to_string(), 2),
        ]);

        assert_eq!(recommend_for_index(&table, &items, 0, 10).unwrap(), vec![238, 13, 550]);
        assert_eq!(recommend_for_index(&table, &items, 1, 2).unwrap(), vec![550, 13]);
    }

    #[test]
    fn test_recommend_for_index_out_of_range() {
        let table = ScoreTable::from_rows(vec![vec![0.1]]).unwrap();
        let err = recommend_for_index(&table, &ItemMap::new(), 3, 10).unwrap_err();
        assert!(matches!(err, Unavailable::Prediction(ModelError::UserOutOfRange { .. })));
    }
}
