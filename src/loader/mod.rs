//! Source-specific table loaders.
//!
//! Each loader renames its table's columns to the canonical schema *by
//! position* (the files' own header labels are ignored: a fragile but
//! deliberate convention inherited from the upstream exports), then
//! coerces cells into typed rows.
//!
//! Numeric coercion is shared: [`parse_grouped_number`] strips ASCII
//! grouping commas and surrounding whitespace before parsing, so
//! `"1,234,567 "` loads as `1234567.0`. A cell that still fails to parse
//! is a fatal [`EnrichError::MalformedNumber`].

use std::collections::HashMap;

use log::debug;

use crate::error::{EnrichError, EnrichResult, PipelineResult};
use crate::models::{CityStats, CustomerProfile, RideFact, TransactionLink};
use crate::parser::Table;

/// Canonical ride-table schema, in source column order.
pub const RIDE_COLUMNS: [&str; 7] = [
    "txn_id",
    "travel_date",
    "company",
    "city",
    "travel_distance",
    "price",
    "cost",
];

/// Canonical city-table schema, in source column order.
pub const CITY_COLUMNS: [&str; 3] = ["city", "population", "users"];

/// Canonical transaction-table schema, in source column order.
pub const TRANSACTION_COLUMNS: [&str; 3] = ["txn_id", "customer_id", "payment_mode"];

/// Canonical customer-table schema, in source column order.
pub const CUSTOMER_COLUMNS: [&str; 4] = ["customer_id", "gender", "age", "income_per_month"];

/// Parse a numeric cell that may carry thousands-separating commas.
pub fn parse_grouped_number(raw: &str, table: &str, column: &str) -> EnrichResult<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| EnrichError::MalformedNumber {
            table: table.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn parse_age(raw: &str, table: &str) -> EnrichResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| EnrichError::MalformedNumber {
            table: table.to_string(),
            column: "age".to_string(),
            value: raw.to_string(),
        })
}

/// Load ride facts, preserving source row order.
///
/// `travel_date` is renamed like every other column but dropped here; it
/// is not part of the output.
pub fn load_rides(mut table: Table) -> PipelineResult<Vec<RideFact>> {
    table.rename_columns("rides", &RIDE_COLUMNS)?;

    let txn_id = table.require_column("txn_id")?;
    let company = table.require_column("company")?;
    let city = table.require_column("city")?;
    let distance = table.require_column("travel_distance")?;
    let price = table.require_column("price")?;
    let cost = table.require_column("cost")?;

    let mut rides = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        rides.push(RideFact {
            txn_id: row[txn_id].clone(),
            company: row[company].clone(),
            city: row[city].clone(),
            travel_distance: parse_grouped_number(&row[distance], "rides", "travel_distance")?,
            price: parse_grouped_number(&row[price], "rides", "price")?,
            cost: parse_grouped_number(&row[cost], "rides", "cost")?,
        });
    }

    debug!("loaded {} ride facts", rides.len());
    Ok(rides)
}

/// Load the city dimension, keyed by the raw city string.
///
/// Population and users arrive as comma-grouped strings ("1,000,000").
pub fn load_cities(mut table: Table) -> PipelineResult<HashMap<String, CityStats>> {
    table.rename_columns("cities", &CITY_COLUMNS)?;

    let city = table.require_column("city")?;
    let population = table.require_column("population")?;
    let users = table.require_column("users")?;

    let mut cities = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        cities.insert(
            row[city].clone(),
            CityStats {
                population: parse_grouped_number(&row[population], "cities", "population")?,
                users: parse_grouped_number(&row[users], "cities", "users")?,
            },
        );
    }

    debug!("loaded {} city rows", cities.len());
    Ok(cities)
}

/// Load the transaction-to-customer link table, keyed by transaction id.
pub fn load_transactions(mut table: Table) -> PipelineResult<HashMap<String, TransactionLink>> {
    table.rename_columns("transactions", &TRANSACTION_COLUMNS)?;

    let txn_id = table.require_column("txn_id")?;
    let customer_id = table.require_column("customer_id")?;
    let payment_mode = table.require_column("payment_mode")?;

    let mut links = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        links.insert(
            row[txn_id].clone(),
            TransactionLink {
                txn_id: row[txn_id].clone(),
                customer_id: row[customer_id].clone(),
                payment_mode: row[payment_mode].clone(),
            },
        );
    }

    debug!("loaded {} transaction links", links.len());
    Ok(links)
}

/// Load the customer dimension, keyed by customer id.
pub fn load_customers(mut table: Table) -> PipelineResult<HashMap<String, CustomerProfile>> {
    table.rename_columns("customers", &CUSTOMER_COLUMNS)?;

    let customer_id = table.require_column("customer_id")?;
    let gender = table.require_column("gender")?;
    let age = table.require_column("age")?;
    let income = table.require_column("income_per_month")?;

    let mut customers = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        customers.insert(
            row[customer_id].clone(),
            CustomerProfile {
                gender: row[gender].clone(),
                age: parse_age(&row[age], "customers")?,
                income_per_month: parse_grouped_number(&row[income], "customers", "income_per_month")?,
            },
        );
    }

    debug!("loaded {} customer rows", customers.len());
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::parser::parse_table;

    fn table(csv: &str) -> Table {
        parse_table(csv, ',', "utf-8".into()).unwrap()
    }

    #[test]
    fn test_parse_grouped_number() {
        assert_eq!(
            parse_grouped_number("1,234,567 ", "cities", "population").unwrap(),
            1_234_567.0
        );
        assert_eq!(parse_grouped_number("814885", "t", "c").unwrap(), 814_885.0);
        assert_eq!(parse_grouped_number(" 30.45", "t", "c").unwrap(), 30.45);
    }

    #[test]
    fn test_parse_grouped_number_malformed() {
        let err = parse_grouped_number("8,41x,000", "cities", "users").unwrap_err();
        match err {
            EnrichError::MalformedNumber {
                table,
                column,
                value,
            } => {
                assert_eq!(table, "cities");
                assert_eq!(column, "users");
                assert_eq!(value, "8,41x,000");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rides_order_and_profit_inputs() {
        let t = table(
            "Transaction ID,Date of Travel,Company,City,KM Travelled,Price Charged,Cost of Trip\n\
             10000011,42377,Pink Cab,ATLANTA GA,30.45,370.95,313.635\n\
             10000012,42375,Yellow Cab,NEW YORK NY,28.62,358.52,334.854",
        );
        let rides = load_rides(t).unwrap();
        assert_eq!(rides.len(), 2);
        assert_eq!(rides[0].txn_id, "10000011");
        assert_eq!(rides[1].city, "NEW YORK NY");
        assert_eq!(rides[0].price, 370.95);
        assert_eq!(rides[0].cost, 313.635);
    }

    #[test]
    fn test_load_rides_drops_travel_date() {
        let t = table("a,b,c,d,e,f,g\nT1,42377,Pink Cab,BOSTON MA,1.0,2.0,1.5");
        let rides = load_rides(t).unwrap();
        // Nothing in RideFact carries the date.
        assert_eq!(rides[0].company, "Pink Cab");
        assert_eq!(rides[0].travel_distance, 1.0);
    }

    #[test]
    fn test_load_rides_width_mismatch() {
        let t = table("a,b,c\n1,2,3");
        let err = load_rides(t).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(_)));
    }

    #[test]
    fn test_load_cities_grouped_numbers() {
        let t = table("City,Population,Users\nNEW YORK NY,\"8,405,837\",\"302,149\"");
        let cities = load_cities(t).unwrap();
        let stats = &cities["NEW YORK NY"];
        assert_eq!(stats.population, 8_405_837.0);
        assert_eq!(stats.users, 302_149.0);
    }

    #[test]
    fn test_load_cities_malformed_population() {
        let t = table("City,Population,Users\nNOWHERE ND,not-a-number,5");
        let err = load_cities(t).unwrap_err();
        assert!(err.to_string().contains("cities.population"));
    }

    #[test]
    fn test_load_transactions() {
        let t = table("Transaction ID,Customer ID,Payment_Mode\n10000011,29290,Card");
        let links = load_transactions(t).unwrap();
        let link = &links["10000011"];
        assert_eq!(link.customer_id, "29290");
        assert_eq!(link.payment_mode, "Card");
    }

    #[test]
    fn test_load_customers() {
        let t = table("Customer ID,Gender,Age,Income (USD/Month)\n29290,Male,28,10813");
        let customers = load_customers(t).unwrap();
        let c = &customers["29290"];
        assert_eq!(c.gender, "Male");
        assert_eq!(c.age, 28);
        assert_eq!(c.income_per_month, 10_813.0);
    }

    #[test]
    fn test_load_customers_malformed_age() {
        let t = table("Customer ID,Gender,Age,Income (USD/Month)\n29290,Male,abc,10813");
        let err = load_customers(t).unwrap_err();
        assert!(err.to_string().contains("customers.age"));
    }
}
