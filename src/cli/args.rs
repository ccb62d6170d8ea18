//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Strata - Prepare a tabular dataset for supervised learning with
/// stratified train/test partitioning, label encoding, and imputation
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Continuous column the sampling strata are derived from
    #[arg(long, default_value = "median_income")]
    pub strata_column: String,

    /// Ascending bin boundaries for stratum derivation (comma-separated).
    /// N boundaries produce N+1 strata.
    #[arg(long, value_delimiter = ',', default_value = "1.5,3.0,4.5,6.0")]
    pub bin_boundaries: Vec<f64>,

    /// Target column handed to the regressor as labels
    #[arg(short, long, default_value = "median_house_value")]
    pub target: String,

    /// Categorical string columns to label-encode (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "ocean_proximity")]
    pub categorical_columns: Vec<String>,

    /// Fraction of each stratum assigned to the test partition
    #[arg(long, default_value = "0.2", value_parser = validate_test_fraction)]
    pub test_fraction: f64,

    /// Random seed for the per-stratum sampling draws.
    /// The same seed always reproduces the same partitions.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Imputation strategy for missing numeric values.
    /// Options: "median" (default) or "mean"
    #[arg(long, default_value = "median")]
    pub impute_strategy: String,

    /// Evaluate the model on the held-out test partition instead of the
    /// training data it was fitted on
    #[arg(long, default_value = "false")]
    pub holdout: bool,

    /// Optional path for a JSON run summary
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validator for the test_fraction parameter
fn validate_test_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "test_fraction must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
