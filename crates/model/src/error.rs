use thiserror::Error;

/// Errors that can occur when loading a model artifact or running it
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact is not in the expected layout: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shape mismatch in {what}: {detail}")]
    Shape { what: String, detail: String },

    #[error("Unsupported activation: {0}")]
    UnsupportedActivation(String),

    #[error("Model export has no {0} layer")]
    MissingLayer(String),

    #[error("User index {index} out of range for model with {users} users")]
    UserOutOfRange { index: u32, users: usize },
}

impl ModelError {
    pub(crate) fn shape(what: impl Into<String>, detail: impl Into<String>) -> Self {
        ModelError::Shape {
            what: what.into(),
            detail: detail.into(),
        }
    }
}
