//! Where the artifacts live and how many items to return.

use pipeline::DEFAULT_TOP_K;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_FILE: &str = "movie_recommender_dl.json";
pub const DEFAULT_ITEM_MAP_FILE: &str = "movie_map.json";
pub const DEFAULT_USER_MAP_FILE: &str = "user_map.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Directory holding the model and both id maps
    pub artifact_dir: PathBuf,
    pub model_file: String,
    pub item_map_file: String,
    pub user_map_file: String,
    pub top_k: usize,
}

impl RecommenderConfig {
    pub fn with_artifact_dir(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            ..Self::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.model_file)
    }

    pub fn item_map_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.item_map_file)
    }

    pub fn user_map_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.user_map_file)
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("."),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            item_map_file: DEFAULT_ITEM_MAP_FILE.to_string(),
            user_map_file: DEFAULT_USER_MAP_FILE.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_artifact_dir() {
        let config = RecommenderConfig::with_artifact_dir("/srv/aimodel");
        assert_eq!(
            config.model_path(),
            PathBuf::from("/srv/aimodel/movie_recommender_dl.json")
        );
        assert_eq!(config.item_map_path(), PathBuf::from("/srv/aimodel/movie_map.json"));
        assert_eq!(config.user_map_path(), PathBuf::from("/srv/aimodel/user_map.json"));
        assert_eq!(config.top_k, 10);
    }
}
