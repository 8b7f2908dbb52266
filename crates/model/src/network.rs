//! Embedding → dense scoring network.
//!
//! The exported recommender is a user-embedding lookup followed by a single
//! dense layer with one output unit per item:
//!
//! ```text
//! scores = activation(E[user] · K + b)
//! ```
//!
//! with `E: users × d`, `K: d × items` and `b: items`.

use crate::error::ModelError;
use crate::predictor::{check_user, Predictor, ScoreVector};
use data_loader::UserIndex;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::str::FromStr;

/// Output activation of the dense layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Sigmoid,
    Softmax,
    Relu,
    Tanh,
}

impl FromStr for Activation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Activation::Linear),
            "sigmoid" => Ok(Activation::Sigmoid),
            "softmax" => Ok(Activation::Softmax),
            "relu" => Ok(Activation::Relu),
            "tanh" => Ok(Activation::Tanh),
            other => Err(ModelError::UnsupportedActivation(other.to_string())),
        }
    }
}

impl Activation {
    fn apply(self, logits: &mut Array1<f32>) {
        match self {
            Activation::Linear => {}
            Activation::Sigmoid => logits.mapv_inplace(|x| 1.0 / (1.0 + (-x).exp())),
            Activation::Relu => logits.mapv_inplace(|x| x.max(0.0)),
            Activation::Tanh => logits.mapv_inplace(f32::tanh),
            Activation::Softmax => {
                let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                logits.mapv_inplace(|x| (x - max).exp());
                let total = logits.sum();
                if total > 0.0 {
                    logits.mapv_inplace(|x| x / total);
                }
            }
        }
    }
}

/// Loaded embedding network weights.
#[derive(Debug, Clone)]
pub struct EmbeddingNetwork {
    user_embedding: Array2<f32>,
    kernel: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl EmbeddingNetwork {
    /// Assemble a network, checking that the weight shapes line up.
    pub fn new(
        user_embedding: Array2<f32>,
        kernel: Array2<f32>,
        bias: Array1<f32>,
        activation: Activation,
    ) -> Result<Self, ModelError> {
        if user_embedding.ncols() != kernel.nrows() {
            return Err(ModelError::shape(
                "dense kernel",
                format!(
                    "embedding width {} but kernel has {} rows",
                    user_embedding.ncols(),
                    kernel.nrows()
                ),
            ));
        }
        if bias.len() != kernel.ncols() {
            return Err(ModelError::shape(
                "dense bias",
                format!("{} items but bias has {} entries", kernel.ncols(), bias.len()),
            ));
        }

        Ok(Self {
            user_embedding,
            kernel,
            bias,
            activation,
        })
    }

    /// Build from nested rows as they appear in JSON exports.
    pub fn from_rows(
        user_embedding: Vec<Vec<f32>>,
        kernel: Vec<Vec<f32>>,
        bias: Option<Vec<f32>>,
        activation: Activation,
    ) -> Result<Self, ModelError> {
        let user_embedding = to_matrix("user embedding", user_embedding)?;
        let kernel = to_matrix("dense kernel", kernel)?;
        let bias = match bias {
            Some(bias) => Array1::from(bias),
            None => Array1::zeros(kernel.ncols()),
        };
        Self::new(user_embedding, kernel, bias, activation)
    }
}

impl Predictor for EmbeddingNetwork {
    fn kind(&self) -> &'static str {
        "embedding-network"
    }

    fn user_count(&self) -> usize {
        self.user_embedding.nrows()
    }

    fn item_count(&self) -> usize {
        self.kernel.ncols()
    }

    fn predict(&self, user: UserIndex) -> Result<ScoreVector, ModelError> {
        let row = check_user(user, self.user_count())?;
        let mut logits = self.user_embedding.row(row).dot(&self.kernel) + &self.bias;
        self.activation.apply(&mut logits);
        Ok(logits.to_vec())
    }
}

/// Convert nested rows into a matrix, rejecting ragged input.
pub(crate) fn to_matrix(what: &str, rows: Vec<Vec<f32>>) -> Result<Array2<f32>, ModelError> {
    let nrows = rows.len();
    let ncols = rows.first().map(Vec::len).unwrap_or(0);

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
        return Err(ModelError::shape(
            what,
            format!("row {} has {} columns, expected {}", i, row.len(), ncols),
        ));
    }

    let flat: Vec<f32> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat).map_err(|e| ModelError::shape(what, e.to_string()))
}
