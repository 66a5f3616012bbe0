//! Error types for the ridemaster enrichment pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV reading and table-shape errors
//! - [`EnrichError`] - fatal enrichment errors (malformed numbers, missing dimension keys)
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a delimited table into memory.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// Table width does not match the canonical schema width.
    ///
    /// Columns are renamed by position, so a table with the wrong number
    /// of columns cannot be mapped onto the canonical schema at all.
    #[error("Table '{table}' has {found} columns, expected {expected}")]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    /// A named column is absent from the table.
    #[error("Column '{0}' not found in table")]
    MissingColumn(String),
}

// =============================================================================
// Enrichment Errors
// =============================================================================

/// Fatal enrichment errors.
///
/// All three kinds abort the pipeline with no partial output. The
/// transaction-link inner join is deliberately *not* represented here:
/// rides without a matching link row are filtered, not failed.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// A numeric field did not parse after stripping grouping commas.
    #[error("Malformed number in {table}.{column}: '{value}'")]
    MalformedNumber {
        table: String,
        column: String,
        value: String,
    },

    /// A ride's city string has no row in the city table.
    #[error("Ride city '{0}' is not present in the city table")]
    UnknownCity(String),

    /// A linked customer id has no row in the customer table.
    #[error("Customer '{0}' is not present in the customer table")]
    UnknownCustomer(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::enrich::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Enrichment error.
    #[error("Enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// Output writing error.
    #[error("Failed to write output: {0}")]
    Output(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for enrichment operations.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // EnrichError -> PipelineError
        let enrich_err = EnrichError::UnknownCity("ATLANTIS GA".into());
        let pipeline_err: PipelineError = enrich_err.into();
        assert!(pipeline_err.to_string().contains("ATLANTIS GA"));
    }

    #[test]
    fn test_malformed_number_format() {
        let err = EnrichError::MalformedNumber {
            table: "cities".into(),
            column: "population".into(),
            value: "8,41x,000".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cities.population"));
        assert!(msg.contains("8,41x,000"));
    }

    #[test]
    fn test_column_count_mismatch_format() {
        let err = CsvError::ColumnCountMismatch {
            table: "rides".into(),
            expected: 7,
            found: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("rides"));
        assert!(msg.contains('7'));
        assert!(msg.contains('5'));
    }
}
