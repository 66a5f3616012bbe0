//! The join-and-enrich core.
//!
//! - [`location`] - composite city/state splitting with the exception table
//! - [`pipeline`] - join orchestration, run report, and the file-level driver

pub mod location;
pub mod pipeline;

pub use location::split_location;
pub use pipeline::{enrich, run, Enrichment, PipelinePaths, PipelineReport, PipelineRun};
