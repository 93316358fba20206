use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExomeError {
    #[error("gene not found: {symbol}")]
    NotFound { symbol: String },

    #[error("{0}")]
    Validation(String),

    #[error("record store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("failed to read delimited file: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Ingest { line: u64, message: String },

    #[error("malformed exon coordinates: {0}")]
    MalformedExons(String),
}

pub type Result<T> = std::result::Result<T, ExomeError>;
