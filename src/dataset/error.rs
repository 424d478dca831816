//! Dataset error types
//!
//! Errors raised while turning raw CSV text into a [`Dataset`](super::Dataset).

use thiserror::Error;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A period cell could not be read as an integer year
    #[error("Line {line}: invalid refPeriod {value:?}")]
    InvalidPeriod { line: usize, value: String },

    /// A value cell is present but not numeric
    #[error("Line {line}: invalid Value {value:?}")]
    InvalidValue { line: usize, value: String },
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn("refPeriod".to_string());
        assert_eq!(err.to_string(), "Missing column: refPeriod");

        let err = DatasetError::InvalidPeriod {
            line: 4,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Line 4: invalid refPeriod \"abc\"");
    }
}
