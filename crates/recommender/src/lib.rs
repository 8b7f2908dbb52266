//! Recommender crate for the movie-recs CLI.
//!
//! This crate contains the orchestrator that ties the model, the id maps and
//! the ranking pipeline together for one invocation.

pub mod config;
pub mod orchestrator;

pub use config::RecommenderConfig;
pub use orchestrator::{recommend_for_index, RecommendationOutcome, Recommender, Unavailable};
