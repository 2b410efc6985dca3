use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Value for column '{column}' contains the delimiter {delimiter:?}")]
    DelimiterInValue { column: String, delimiter: char },

    #[error("Invalid weight for attribute '{attribute}': {weight} (expected 0.0..=1.0)")]
    InvalidWeight { attribute: String, weight: f64 },

    #[error("No case id left after {last}")]
    IdExhausted { last: u64 },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
