//! Error types for hotel analytics

use thiserror::Error;

/// Result type alias for hotel analytics operations
pub type Result<T> = std::result::Result<T, HotelError>;

/// Main error type shared by the aggregation engine and the dataset sources
#[derive(Error, Debug)]
pub enum HotelError {
    /// Calendar components that do not form a real date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Argument outside an operation's contract (e.g. negative lead time)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Aggregation '{0}' is undefined on an empty dataset")]
    EmptyDataset(&'static str),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Dataset source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),
}

impl HotelError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found", resource_type, identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HotelError::not_found("Booking", 42);
        assert_eq!(err.to_string(), "Not found: Booking '42' not found");
    }
}
