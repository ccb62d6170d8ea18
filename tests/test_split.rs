//! Partitioning properties across seeds and test fractions

use std::collections::HashSet;

use strata::pipeline::{
    finalize_partitions, stratified_sample, stratum_shares, with_stratum_column,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

const BOUNDARIES: [f64; 4] = [1.5, 3.0, 4.5, 6.0];

#[test]
fn test_partitions_disjoint_for_all_seeds_and_fractions() {
    let df = create_housing_dataframe();
    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();

    for seed in [0u64, 1, 7, 42, 123] {
        for fraction in [0.1f64, 0.2, 0.5] {
            let test_raw = stratified_sample(&binned, "stratum", fraction, seed).unwrap();
            let (train, test) = finalize_partitions(&binned, &test_raw).unwrap();

            // median_house_value is unique per fixture row, so it identifies rows
            let train_values: HashSet<u64> =
                column_value_bits(&train, "median_house_value").into_iter().collect();
            let test_values: HashSet<u64> =
                column_value_bits(&test, "median_house_value").into_iter().collect();

            assert!(
                train_values.is_disjoint(&test_values),
                "partitions overlap for seed {} fraction {}",
                seed,
                fraction
            );
            assert_eq!(
                train_values.len() + test_values.len(),
                df.height(),
                "every row must land in exactly one partition"
            );
        }
    }
}

#[test]
fn test_per_stratum_share_within_rounding() {
    let df = create_housing_dataframe();
    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();

    for seed in [0u64, 42, 99] {
        let test_raw = stratified_sample(&binned, "stratum", 0.2, seed).unwrap();
        let shares = stratum_shares(&binned, &test_raw, "stratum").unwrap();

        assert_eq!(shares.len(), 2);
        for share in shares {
            let expected = (0.2 * share.total_rows as f64).round() as usize;
            assert_eq!(share.test_rows, expected);
        }
    }
}

#[test]
fn test_fixture_split_reference_counts() {
    // 20 rows, 2 strata of 10, fraction 0.2: 2 test rows from each stratum
    let df = create_housing_dataframe();
    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();
    let test_raw = stratified_sample(&binned, "stratum", 0.2, 42).unwrap();
    let (train, test) = finalize_partitions(&binned, &test_raw).unwrap();

    assert_eq!(test.height(), 4);
    assert_eq!(train.height(), 16);
}

#[test]
fn test_same_seed_reproduces_partitions() {
    let df = create_housing_dataframe();
    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();

    let first = stratified_sample(&binned, "stratum", 0.3, 9).unwrap();
    let second = stratified_sample(&binned, "stratum", 0.3, 9).unwrap();
    assert!(first.equals_missing(&second));

    // A different seed is allowed to pick different rows, but must still
    // pick the same number per stratum
    let other = stratified_sample(&binned, "stratum", 0.3, 10).unwrap();
    assert_eq!(other.height(), first.height());
}
