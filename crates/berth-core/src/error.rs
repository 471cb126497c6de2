use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown action: {0} (expected create, update or delete)")]
    UnknownAction(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}
