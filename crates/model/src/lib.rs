//! Loading and running the pretrained recommendation model.
//!
//! The model is an opaque artifact produced at training time. This crate
//! provides:
//! - The `Predictor` capability: user index in, one score per item out
//! - Concrete model layouts (`EmbeddingNetwork`, `ScoreTable`)
//! - `ModelLoader` strategies for the on-disk layouts
//! - `LoaderChain`, which tries the strategies in order

pub mod chain;
pub mod error;
pub mod loaders;
pub mod network;
pub mod predictor;
pub mod score_table;

pub use chain::LoaderChain;
pub use error::ModelError;
pub use loaders::{LayerListLoader, ModelLoader, NativeLoader, ScoreTableLoader};
pub use network::{Activation, EmbeddingNetwork};
pub use predictor::{Predictor, ScoreVector};
pub use score_table::ScoreTable;
