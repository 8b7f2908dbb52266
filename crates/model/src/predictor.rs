//! The capability every loaded model exposes.

use crate::error::ModelError;
use data_loader::UserIndex;

/// One score per item index, in item-index order
pub type ScoreVector = Vec<f32>;

/// A loaded model that scores every item for a single user.
///
/// `Send + Sync` so a predictor can be handed across threads, although a
/// single invocation only ever calls it once.
pub trait Predictor: Send + Sync {
    /// Short name of the model layout (for logging)
    fn kind(&self) -> &'static str;

    /// Number of users the model was trained on
    fn user_count(&self) -> usize;

    /// Width of the score vector
    fn item_count(&self) -> usize;

    /// Score every item for `user`.
    ///
    /// Returns `UserOutOfRange` when the model has no row for `user`.
    fn predict(&self, user: UserIndex) -> Result<ScoreVector, ModelError>;
}

pub(crate) fn check_user(user: UserIndex, users: usize) -> Result<usize, ModelError> {
    let row = user as usize;
    if row >= users {
        return Err(ModelError::UserOutOfRange { index: user, users });
    }
    Ok(row)
}
