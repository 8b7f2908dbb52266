//! Loading strategies for the model artifact.
//!
//! Each strategy understands one on-disk layout. They are tried in order by
//! [`LoaderChain`](crate::LoaderChain) until one of them succeeds.

use crate::error::ModelError;
use crate::network::{Activation, EmbeddingNetwork};
use crate::predictor::Predictor;
use crate::score_table::ScoreTable;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A way of turning a model artifact into a predictor.
pub trait ModelLoader: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// Load the artifact at `path`, or explain why this layout doesn't fit.
    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError>;

    /// Attempt a load. Failures are logged and turned into `None`.
    fn try_load(&self, path: &Path) -> Option<Box<dyn Predictor>> {
        match self.load(path) {
            Ok(predictor) => Some(predictor),
            Err(e) => {
                tracing::debug!("Loader {} could not load {:?}: {}", self.name(), path, e);
                None
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

// =============================================================================
// Native layout
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NativeWeights {
    user_embedding: Vec<Vec<f32>>,
    kernel: Vec<Vec<f32>>,
    #[serde(default)]
    bias: Option<Vec<f32>>,
    #[serde(default)]
    activation: Activation,
}

/// Reads the crate's own weight layout:
/// `{"user_embedding", "kernel", "bias", "activation"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLoader;

impl ModelLoader for NativeLoader {
    fn name(&self) -> &str {
        "native"
    }

    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
        let weights: NativeWeights = read_json(path)?;
        let network = EmbeddingNetwork::from_rows(
            weights.user_embedding,
            weights.kernel,
            weights.bias,
            weights.activation,
        )?;
        Ok(Box::new(network))
    }
}

// =============================================================================
// Layer-list export
// =============================================================================

#[derive(Debug, Deserialize)]
struct LayerExport {
    layers: Vec<LayerRecord>,
}

#[derive(Debug, Deserialize)]
struct LayerRecord {
    class_name: String,
    #[serde(default)]
    activation: Option<String>,
    #[serde(default)]
    weights: Vec<serde_json::Value>,
}

impl LayerRecord {
    fn weight<T: DeserializeOwned>(&self, slot: usize) -> Result<Option<T>, ModelError> {
        self.weights
            .get(slot)
            .map(|value| T::deserialize(value).map_err(ModelError::from))
            .transpose()
    }
}

/// Reads a layer-by-layer export.
///
/// The first `Embedding` layer supplies the user embedding, the last `Dense`
/// layer supplies kernel, bias and activation. Anything in between (flatten,
/// dropout, ...) carries no weights the scorer needs and is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerListLoader;

impl ModelLoader for LayerListLoader {
    fn name(&self) -> &str {
        "layer-list"
    }

    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
        let export: LayerExport = read_json(path)?;

        let embedding = export
            .layers
            .iter()
            .find(|layer| layer.class_name == "Embedding")
            .ok_or_else(|| ModelError::MissingLayer("Embedding".to_string()))?;
        let dense = export
            .layers
            .iter()
            .rev()
            .find(|layer| layer.class_name == "Dense")
            .ok_or_else(|| ModelError::MissingLayer("Dense".to_string()))?;

        let user_embedding: Vec<Vec<f32>> = embedding
            .weight(0)?
            .ok_or_else(|| ModelError::shape("Embedding layer", "no weights"))?;
        let kernel: Vec<Vec<f32>> = dense
            .weight(0)?
            .ok_or_else(|| ModelError::shape("Dense layer", "no kernel"))?;
        let bias: Option<Vec<f32>> = dense.weight(1)?;
        let activation = match dense.activation.as_deref() {
            Some(name) => name.parse()?,
            None => Activation::Linear,
        };

        let network = EmbeddingNetwork::from_rows(user_embedding, kernel, bias, activation)?;
        Ok(Box::new(network))
    }
}

// =============================================================================
// Precomputed score table
// =============================================================================

#[derive(Debug, Deserialize)]
struct ScoreTableFile {
    scores: Vec<Vec<f32>>,
}

/// Reads a precomputed `{"scores": [[...], ...]}` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTableLoader;

impl ModelLoader for ScoreTableLoader {
    fn name(&self) -> &str {
        "score-table"
    }

    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
        let file: ScoreTableFile = read_json(path)?;
        Ok(Box::new(ScoreTable::from_rows(file.scores)?))
    }
}
