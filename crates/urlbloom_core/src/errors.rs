use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("bit-vector length {0} is zero or too large to allocate")]
    InvalidBits(u64),

    #[error("hash count must be positive (got {0})")]
    InvalidHashes(u32),

    #[error("malformed record on line {line_no}: {line:?}")]
    MalformedRecord { line_no: usize, line: String },

    #[error("source {} is unavailable", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BloomError>;
