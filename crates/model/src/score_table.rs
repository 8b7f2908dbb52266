use crate::error::ModelError;
use crate::network::to_matrix;
use crate::predictor::{check_user, Predictor, ScoreVector};
use data_loader::UserIndex;
use ndarray::Array2;

/// Precomputed scores: one row per user, one column per item.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    scores: Array2<f32>,
}

impl ScoreTable {
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, ModelError> {
        Ok(Self {
            scores: to_matrix("score table", rows)?,
        })
    }
}

impl Predictor for ScoreTable {
    fn kind(&self) -> &'static str {
        "score-table"
    }

    fn user_count(&self) -> usize {
        self.scores.nrows()
    }

    fn item_count(&self) -> usize {
        self.scores.ncols()
    }

    fn predict(&self, user: UserIndex) -> Result<ScoreVector, ModelError> {
        let row = check_user(user, self.user_count())?;
        Ok(self.scores.row(row).to_vec())
    }
}
