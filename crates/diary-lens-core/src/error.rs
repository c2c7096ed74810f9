use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed diary file {}: expected at least 3 segments, found {segments}", path.display())]
    MalformedFile { path: PathBuf, segments: usize },

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
