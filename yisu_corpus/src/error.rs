use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Xlsx(#[from] calamine::Error),

    #[error("Corpus is neither UTF-8 nor GBK text: {0}")]
    Encoding(String),

    #[error("Unsupported corpus format: {0} (expected .csv, .json or .xlsx)")]
    UnsupportedFormat(String),

    #[error("Corpus has no records: {0}")]
    Empty(String),

    #[error("CSV write error: {0}")]
    Write(String),
}
