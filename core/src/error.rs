use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed, duplicate or incomplete input records. Fatal to the load.
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
