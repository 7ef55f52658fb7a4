use thiserror::Error;

pub type Result<T> = std::result::Result<T, SprintError>;

#[derive(Debug, Error)]
pub enum SprintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog asset missing: {name}")]
    MissingAsset { name: String },

    #[error("unknown language: {key}")]
    UnknownLanguage { key: String },

    #[error("file index {index} out of range for {language} ({count} files)")]
    FileOutOfRange {
        language: String,
        index: usize,
        count: usize,
    },
}

impl SprintError {
    #[must_use]
    pub fn unknown_language(key: impl Into<String>) -> Self {
        Self::UnknownLanguage { key: key.into() }
    }
}
