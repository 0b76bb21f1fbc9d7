use thiserror::Error;

/// Errors raised by the annotation engine and its boundaries
#[derive(Debug, Error)]
pub enum EngineError {
    /// A taxonomy or lexicon pattern failed to compile
    #[error("invalid pattern {pattern:?} in {label}: {source}")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two taxonomy entries share a label
    #[error("duplicate taxonomy label: {0}")]
    DuplicateLabel(String),

    /// A taxonomy file was structurally valid JSON but unusable
    #[error("invalid taxonomy: {0}")]
    Taxonomy(String),

    /// The sentiment service returned an error or an unreadable reply
    #[error("sentiment service error: {0}")]
    Sentiment(String),

    /// The annotation store rejected a write
    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
