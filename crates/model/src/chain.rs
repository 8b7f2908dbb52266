//! The LoaderChain tries several loading strategies in order.

use crate::loaders::{LayerListLoader, ModelLoader, NativeLoader, ScoreTableLoader};
use crate::predictor::Predictor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered list of loading strategies; the first success wins.
///
/// ## Usage
/// ```ignore
/// let chain = LoaderChain::new()
///     .add_loader(NativeLoader)
///     .add_loader(ScoreTableLoader);
///
/// match chain.load(&model_path) {
///     Some(predictor) => { /* score */ }
///     None => { /* no model available */ }
/// }
/// ```
pub struct LoaderChain {
    loaders: Vec<Box<dyn ModelLoader>>,
}

impl LoaderChain {
    /// Create a new empty LoaderChain.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Every layout this crate understands, most specific first.
    pub fn standard() -> Self {
        Self::new()
            .add_loader(NativeLoader)
            .add_loader(LayerListLoader)
            .add_loader(ScoreTableLoader)
    }

    /// Add a loader to the end of the chain (builder pattern).
    pub fn add_loader(mut self, loader: impl ModelLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(|loader| loader.name()).collect()
    }

    /// Try each loader in turn.
    ///
    /// Returns `None` when the artifact is missing or no loader accepts it;
    /// that is "no model available", not an error.
    pub fn load(&self, path: &Path) -> Option<Box<dyn Predictor>> {
        if !path.exists() {
            warn!("Model artifact {:?} not found", path);
            return None;
        }

        for loader in &self.loaders {
            debug!("Trying model loader: {}", loader.name());
            if let Some(predictor) = loader.try_load(path) {
                info!(
                    "Loaded {} model with loader {} ({} users, {} items)",
                    predictor.kind(),
                    loader.name(),
                    predictor.user_count(),
                    predictor.item_count()
                );
                return Some(predictor);
            }
        }

        warn!("No loader could read model artifact {:?}", path);
        None
    }
}

impl Default for LoaderChain {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::score_table::ScoreTable;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records how often it was asked, then fails or succeeds as configured.
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        succeed: bool,
    }

    impl ModelLoader for CountingLoader {
        fn name(&self) -> &str {
            "counting"
        }

        fn load(&self, _path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(Box::new(ScoreTable::from_rows(vec![vec![1.0]])?))
            } else {
                Err(ModelError::MissingLayer("test".to_string()))
            }
        }
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            LoaderChain::standard().loader_names(),
            vec!["native", "layer-list", "score-table"]
        );
    }

    #[test]
    fn test_missing_artifact_tries_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = LoaderChain::new().add_loader(CountingLoader {
            calls: calls.clone(),
            succeed: true,
        });

        assert!(chain.load(Path::new("/nonexistent/model.json")).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_first_success_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{}").unwrap();

        let failing = Arc::new(AtomicUsize::new(0));
        let winning = Arc::new(AtomicUsize::new(0));
        let never = Arc::new(AtomicUsize::new(0));
        let chain = LoaderChain::new()
            .add_loader(CountingLoader { calls: failing.clone(), succeed: false })
            .add_loader(CountingLoader { calls: winning.clone(), succeed: true })
            .add_loader(CountingLoader { calls: never.clone(), succeed: true });

        assert!(chain.load(&path).is_some());
        assert_eq!(failing.load(Ordering::SeqCst), 1);
        assert_eq!(winning.load(Ordering::SeqCst), 1);
        assert_eq!(never.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_fields_fall_through_to_score_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(
            &path,
            r#"{"user_embedding": [[1.0]], "kernel": [[1.0, 2.0]], "scores": [[0.3, 0.1]]}"#,
        )
        .unwrap();

        let predictor = LoaderChain::standard().load(&path).unwrap();
        assert_eq!(predictor.kind(), "score-table");
        assert_eq!(predictor.predict(0).unwrap(), vec![0.3, 0.1]);
    }

    #[test]
    fn test_unreadable_artifact_yields_no_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie_recommender_dl.json");
        fs::write(&path, b"\x89HDF\r\n\x1a\n").unwrap();

        assert!(LoaderChain::standard().load(&path).is_none());
        assert!(LoaderChain::new().load(&path).is_none());
    }
}
