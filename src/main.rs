//! Ridemaster CLI - build the cab ride master dataset
//!
//! # Main Command
//!
//! ```bash
//! ridemaster enrich --rides Cab_Data.csv --cities City.csv \
//!     --transactions Transaction_ID.csv --customers Customer_ID.csv \
//!     --output Master_Data.csv
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! ridemaster parse input.csv        # Inspect a raw table (encoding, delimiter, headers)
//! ```

use clap::{Parser, Subcommand};
use ridemaster::{read_table, read_table_auto, run, PipelinePaths};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ridemaster")]
#[command(about = "Join cab ride exports with city and customer data into one master dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full enrichment pipeline: four CSVs in, one master CSV out
    Enrich {
        /// Ride transactions CSV (Cab_Data)
        #[arg(long)]
        rides: PathBuf,

        /// City demographics CSV
        #[arg(long)]
        cities: PathBuf,

        /// Transaction-to-customer link CSV
        #[arg(long)]
        transactions: PathBuf,

        /// Customer demographics CSV
        #[arg(long)]
        customers: PathBuf,

        /// Output file for the master table
        #[arg(short, long)]
        output: PathBuf,

        /// Write a JSON run report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the first N enriched rows to stdout
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Parse a CSV file and show its shape
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Enrich {
            rides,
            cities,
            transactions,
            customers,
            output,
            report,
            preview,
        } => cmd_enrich(
            PipelinePaths {
                rides,
                cities,
                transactions,
                customers,
                output,
            },
            report,
            preview,
        ),

        Commands::Parse { input, delimiter } => cmd_parse(&input, delimiter),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_enrich(
    paths: PipelinePaths,
    report_path: Option<PathBuf>,
    preview: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Enriching rides from: {}", paths.rides.display());

    let run = run(&paths)?;

    eprintln!("   Rides read: {}", run.report.rides_read);
    eprintln!("   Cities: {}", run.report.cities);
    eprintln!("   Transaction links: {}", run.report.transaction_links);
    eprintln!("   Customers: {}", run.report.customers);
    eprintln!("✅ Enriched {} rows", run.report.enriched_rows);

    if run.report.dropped_rides > 0 {
        eprintln!(
            "⚠️  {} ride(s) had no transaction record and were dropped",
            run.report.dropped_rides
        );
    }

    eprintln!("💾 Output written to: {}", paths.output.display());

    if let Some(n) = preview {
        print_preview(&run.rows, n)?;
    }

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&run.report)?;
        fs::write(&path, json)?;
        eprintln!("💾 Report written to: {}", path.display());
    }

    Ok(())
}

/// Print the first `n` enriched rows to stdout in CSV form.
fn print_preview(
    rows: &[ridemaster::EnrichedRide],
    n: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows.iter().take(n) {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    print!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

fn cmd_parse(input: &Path, delimiter: Option<char>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let table = match delimiter {
        Some(d) => read_table(input, d)?,
        None => read_table_auto(input)?,
    };

    eprintln!("   Encoding: {}", table.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        match table.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        },
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", table.headers.join(", "));
    eprintln!("✅ Parsed {} rows", table.rows.len());

    Ok(())
}
