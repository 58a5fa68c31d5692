use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewlintError {
    #[error("Failed to parse record: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Record file not found: {0}")]
    RecordNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BrewlintError>;
