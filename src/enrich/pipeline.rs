//! Join orchestration: broadcast dimensions onto ride facts and drive a
//! full file-to-file run.
//!
//! The steps form a strict total order: each consumes columns derived by
//! the one before:
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────────┐   ┌───────────┐
//! │  4 CSVs  │──▶│  Loaders  │──▶│ enrich()     │──▶│ Master CSV│
//! │          │   │ (typed)   │   │ city ▸ link  │   │ + report  │
//! └──────────┘   └───────────┘   │ ▸ customer   │   └───────────┘
//!                                │ ▸ split      │
//!                                └──────────────┘
//! ```
//!
//! Missing dimension keys (city, customer) abort the run; a ride without
//! a transaction-link row is inner-join filtered. That filtering is
//! surfaced as a count rather than swallowed, since it is the one place
//! the pipeline can silently lose data.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;

use crate::error::{EnrichError, EnrichResult, PipelineResult};
use crate::loader::{load_cities, load_customers, load_rides, load_transactions};
use crate::models::{CityStats, CustomerProfile, EnrichedRide, RideFact, TransactionLink};
use crate::parser::read_table_auto;
use crate::writer::write_enriched;

use super::location::split_location;

/// Input and output file locations for one run.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    pub rides: PathBuf,
    pub cities: PathBuf,
    pub transactions: PathBuf,
    pub customers: PathBuf,
    pub output: PathBuf,
}

/// Counters from a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub rides_read: usize,
    pub cities: usize,
    pub transaction_links: usize,
    pub customers: usize,
    pub enriched_rows: usize,
    /// Rides with no transaction-link row, filtered by the inner join.
    pub dropped_rides: usize,
    pub output: String,
}

/// Result of the in-memory enrichment step.
#[derive(Debug, Clone)]
pub struct Enrichment {
    /// Output rows, in ride input order.
    pub rows: Vec<EnrichedRide>,
    /// Rides filtered by the transaction-link inner join.
    pub dropped_rides: usize,
}

/// A completed run: the enriched rows plus the report.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub rows: Vec<EnrichedRide>,
    pub report: PipelineReport,
}

/// Broadcast city and customer attributes onto the ride facts.
///
/// Rides are processed in input order, so identical inputs always produce
/// identical output. Per ride:
///
/// 1. city lookup: a miss is fatal, even for a ride the join would later
///    drop (the city broadcast runs over every fact);
/// 2. transaction-link lookup: a miss drops the ride silently;
/// 3. customer lookup via the link: a miss is fatal;
/// 4. location split, derived columns, row emitted.
pub fn enrich(
    rides: &[RideFact],
    cities: &HashMap<String, CityStats>,
    links: &HashMap<String, TransactionLink>,
    customers: &HashMap<String, CustomerProfile>,
) -> EnrichResult<Enrichment> {
    let mut rows = Vec::with_capacity(rides.len());
    let mut dropped_rides = 0usize;

    for ride in rides {
        let stats = cities
            .get(&ride.city)
            .ok_or_else(|| EnrichError::UnknownCity(ride.city.clone()))?;

        let link = match links.get(&ride.txn_id) {
            Some(link) => link,
            None => {
                dropped_rides += 1;
                continue;
            }
        };

        let customer = customers
            .get(&link.customer_id)
            .ok_or_else(|| EnrichError::UnknownCustomer(link.customer_id.clone()))?;

        let (city, state) = split_location(&ride.city);

        rows.push(EnrichedRide {
            txn_id: ride.txn_id.clone(),
            company: ride.company.clone(),
            city,
            travel_distance: ride.travel_distance,
            price: ride.price,
            cost: ride.cost,
            profit: ride.profit(),
            population: stats.population,
            user_ratio: stats.user_ratio(),
            customer_id: link.customer_id.clone(),
            payment_mode: link.payment_mode.clone(),
            gender: customer.gender.clone(),
            age: customer.age,
            income_per_month: customer.income_per_month,
            state,
        });
    }

    if dropped_rides > 0 {
        warn!("{dropped_rides} ride(s) had no transaction record and were dropped by the inner join");
    }

    Ok(Enrichment { rows, dropped_rides })
}

/// Run the whole pipeline: load the four tables, enrich, write the master
/// table.
///
/// The output file is created only after the full enriched table exists
/// in memory, so a fatal load or enrichment error never leaves a partial
/// file behind.
pub fn run(paths: &PipelinePaths) -> PipelineResult<PipelineRun> {
    info!("reading ride table from {}", paths.rides.display());
    let rides = load_rides(read_table_auto(&paths.rides)?)?;

    info!("reading city table from {}", paths.cities.display());
    let cities = load_cities(read_table_auto(&paths.cities)?)?;

    info!("reading transaction table from {}", paths.transactions.display());
    let links = load_transactions(read_table_auto(&paths.transactions)?)?;

    info!("reading customer table from {}", paths.customers.display());
    let customers = load_customers(read_table_auto(&paths.customers)?)?;

    info!(
        "enriching {} rides against {} cities and {} customers",
        rides.len(),
        cities.len(),
        customers.len()
    );
    let enrichment = enrich(&rides, &cities, &links, &customers)?;

    write_enriched(&paths.output, &enrichment.rows)?;
    info!(
        "wrote {} enriched rows to {}",
        enrichment.rows.len(),
        paths.output.display()
    );

    let report = PipelineReport {
        rides_read: rides.len(),
        cities: cities.len(),
        transaction_links: links.len(),
        customers: customers.len(),
        enriched_rows: enrichment.rows.len(),
        dropped_rides: enrichment.dropped_rides,
        output: paths.output.display().to_string(),
    };

    Ok(PipelineRun {
        rows: enrichment.rows,
        report,
    })
}
