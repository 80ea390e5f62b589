//! Error types for the diet plan model

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while loading diet plan records
#[derive(Error, Debug)]
pub enum ModelError {
    /// Malformed or incomplete record JSON
    #[error("Invalid diet plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}
