use thiserror::Error;

#[derive(Debug, Error)]
pub enum SunsiteError {
    #[error("Empty batch: at least one region is required to score")]
    EmptyBatch,

    #[error("Region '{region_id}' is missing required metric '{field}'")]
    MissingField {
        region_id: String,
        field: &'static str,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SunsiteError>;
