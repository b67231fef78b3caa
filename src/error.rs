use thiserror::Error;

/// Failures of the record store. Pipeline code above the store works with
/// `anyhow::Result` and converts these with `?`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Alert not found: {id}")]
    AlertNotFound { id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed document: {0}")]
    Document(#[from] serde_json::Error),
}
