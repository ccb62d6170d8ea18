//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small housing-style dataset with known characteristics:
///
/// - `median_income`: 10 rows below 1.5 (stratum 1) and 10 rows in
///   [3.0, 4.5) (stratum 3)
/// - `total_rooms`: numeric feature with two missing entries
/// - `ocean_proximity`: two categories, both present in every stratum
/// - `median_house_value`: target, unique per row
pub fn create_housing_dataframe() -> DataFrame {
    let mut median_income = Vec::new();
    let mut total_rooms: Vec<Option<f64>> = Vec::new();
    let mut ocean_proximity = Vec::new();
    let mut median_house_value = Vec::new();

    for i in 0..10 {
        median_income.push(0.5 + 0.09 * i as f64); // stratum 1
        total_rooms.push(if i == 3 { None } else { Some(800.0 + 10.0 * i as f64) });
        ocean_proximity.push(if i % 2 == 0 { "INLAND" } else { "NEAR BAY" });
        median_house_value.push(100_000.0 + 1_000.0 * i as f64);
    }
    for i in 0..10 {
        median_income.push(3.0 + 0.14 * i as f64); // stratum 3
        total_rooms.push(if i == 7 { None } else { Some(1500.0 + 10.0 * i as f64) });
        ocean_proximity.push(if i % 2 == 0 { "INLAND" } else { "NEAR BAY" });
        median_house_value.push(200_000.0 + 1_000.0 * i as f64);
    }

    df! {
        "median_income" => median_income,
        "total_rooms" => total_rooms,
        "ocean_proximity" => ocean_proximity,
        "median_house_value" => median_house_value,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Collect a numeric column as bit patterns for exact set comparison
pub fn column_value_bits(df: &DataFrame, column: &str) -> Vec<u64> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .map(f64::to_bits)
        .collect()
}
