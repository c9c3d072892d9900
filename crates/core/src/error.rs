#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
