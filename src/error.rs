use std::path::PathBuf;

use thiserror::Error;

/// Reasons a model adapter falls back to its mock path.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    Missing(PathBuf),
    #[error("model artifact incompatible: {0}")]
    Incompatible(String),
    #[error("preprocessing failed: {0}")]
    Preprocess(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unseen category '{value}' for column '{column}' and no 'Unknown' class")]
    UnseenCategory { column: String, value: String },
}
