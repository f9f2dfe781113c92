use thiserror::Error;

pub type PromoResult<T> = Result<T, PromoError>;

/// Error taxonomy shared across the workspace.
///
/// The variant determines how callers surface the failure: `Fetch` replaces
/// the content area with a blocking error view, `Save` becomes a transient
/// notification while local state is kept for retry, and `Validation` blocks
/// the action before any network call is made.
#[derive(Error, Debug)]
pub enum PromoError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Save failed: {0}")]
    Save(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
