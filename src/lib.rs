//! # Ridemaster - cab ride master-data enrichment
//!
//! Ridemaster joins four flat cab-ride exports (ride transactions, city
//! demographics, transaction-to-customer links, customer demographics)
//! into one denormalized master table with derived columns (profit,
//! user ratio, city/state split).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  4 CSV files│────▶│   Loaders   │────▶│   Enrich    │────▶│  Master CSV │
//! │ (auto-enc)  │     │ (positional │     │ (broadcast  │     │ (wide rows) │
//! └─────────────┘     │   rename)   │     │  + joins)   │     └─────────────┘
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ridemaster::{run, PipelinePaths};
//!
//! let run = run(&PipelinePaths {
//!     rides: "Cab_Data.csv".into(),
//!     cities: "City.csv".into(),
//!     transactions: "Transaction_ID.csv".into(),
//!     customers: "Customer_ID.csv".into(),
//!     output: "Master_Data.csv".into(),
//! })?;
//! println!("{} enriched rows", run.report.enriched_rows);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (RideFact, CityStats, EnrichedRide, ...)
//! - [`parser`] - Delimited-table reading with auto-detection
//! - [`loader`] - Positional-rename loaders for the four sources
//! - [`enrich`] - Location splitting and the join-and-enrich pipeline
//! - [`writer`] - CSV sink for the master table

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod loader;

// Enrichment
pub mod enrich;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, EnrichError, PipelineError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CityStats, CustomerProfile, EnrichedRide, RideFact, TransactionLink};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    detect_delimiter, detect_encoding, parse_bytes_auto, parse_table, read_table,
    read_table_auto, Table,
};

// =============================================================================
// Re-exports - Loaders
// =============================================================================

pub use loader::{
    load_cities, load_customers, load_rides, load_transactions, parse_grouped_number,
};

// =============================================================================
// Re-exports - Enrichment
// =============================================================================

pub use enrich::{
    enrich, run, split_location, Enrichment, PipelinePaths, PipelineReport, PipelineRun,
};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{write_enriched, OUTPUT_COLUMNS};
