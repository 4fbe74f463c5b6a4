//! Custom error types for paperscope.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, ExplorerError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for paperscope operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// File I/O error while reading the dataset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column absent from the input file
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A sampling request exceeds the available population
    #[error("Insufficient data: requested {requested} records, only {available} available")]
    InsufficientData {
        /// Number of records requested
        requested: usize,
        /// Number of records actually present
        available: usize,
    },

    /// Text parsing error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias using `ExplorerError`
pub type Result<T> = std::result::Result<T, ExplorerError>;
