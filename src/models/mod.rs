//! Domain models for the enrichment pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`RideFact`] - one cab ride, the finest-grained table
//! - [`CityStats`] - city dimension row (population, registered users)
//! - [`TransactionLink`] - transaction-to-customer link with payment mode
//! - [`CustomerProfile`] - customer dimension row
//! - [`EnrichedRide`] - one output row of the denormalized master table
//!
//! Categorical fields (company, gender, payment mode) stay free-form
//! strings; the pipeline coerces types but does not enforce vocabularies.

use serde::{Deserialize, Serialize};

// =============================================================================
// Ride Fact
// =============================================================================

/// One cab ride, keyed by transaction id.
///
/// `travel_date` from the source file is dropped at load time; it never
/// reaches the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideFact {
    pub txn_id: String,
    pub company: String,
    /// Raw composite location string, e.g. `"NEW YORK NY"`. Used as the
    /// city-dimension key as-is; split into city and state only at
    /// output time.
    pub city: String,
    pub travel_distance: f64,
    pub price: f64,
    pub cost: f64,
}

impl RideFact {
    /// Profit per ride: price minus cost, no rounding.
    pub fn profit(&self) -> f64 {
        self.price - self.cost
    }
}

// =============================================================================
// City Dimension
// =============================================================================

/// City dimension row. Keyed externally by the raw city string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: f64,
    pub users: f64,
}

impl CityStats {
    /// Fraction of the population registered as cab users.
    ///
    /// A zero population yields a non-finite value (infinity or NaN)
    /// which propagates into the output unflagged.
    pub fn user_ratio(&self) -> f64 {
        self.users / self.population
    }
}

// =============================================================================
// Transaction Link
// =============================================================================

/// Transaction-to-customer link row, keyed by transaction id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLink {
    pub txn_id: String,
    pub customer_id: String,
    pub payment_mode: String,
}

// =============================================================================
// Customer Dimension
// =============================================================================

/// Customer dimension row. Keyed externally by customer id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub gender: String,
    pub age: u32,
    pub income_per_month: f64,
}

// =============================================================================
// Enriched Output Row
// =============================================================================

/// One row of the denormalized master table.
///
/// Field order here *is* the output column order; the CSV sink derives
/// its header row from these field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRide {
    pub txn_id: String,
    pub company: String,
    /// City proper, after the state suffix has been split off.
    pub city: String,
    pub travel_distance: f64,
    pub price: f64,
    pub cost: f64,
    pub profit: f64,
    pub population: f64,
    pub user_ratio: f64,
    pub customer_id: String,
    pub payment_mode: String,
    pub gender: String,
    pub age: u32,
    pub income_per_month: f64,
    /// 2-letter state code (or the exception-table code `"LA"`).
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_is_exact_difference() {
        let ride = RideFact {
            txn_id: "10000011".into(),
            company: "Pink Cab".into(),
            city: "ATLANTA GA".into(),
            travel_distance: 30.45,
            price: 370.95,
            cost: 313.635,
        };
        assert_eq!(ride.profit(), 370.95 - 313.635);
    }

    #[test]
    fn test_user_ratio() {
        let stats = CityStats {
            population: 814_885.0,
            users: 24_701.0,
        };
        assert_eq!(stats.user_ratio(), 24_701.0 / 814_885.0);
    }

    #[test]
    fn test_user_ratio_zero_population_is_non_finite() {
        let stats = CityStats {
            population: 0.0,
            users: 5.0,
        };
        let ratio = stats.user_ratio();
        assert!(!ratio.is_finite());
        assert_eq!(ratio, f64::INFINITY);
    }
}
