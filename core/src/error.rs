use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;
