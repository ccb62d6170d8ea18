//! Stratified train/test partitioning.
//!
//! The split runs in two steps. [`stratified_sample`] draws a seeded random
//! sample of the target fraction from every stratum independently, so each
//! stratum's share of the test partition matches its share of the population.
//! [`finalize_partitions`] then rebuilds the train partition as the exact
//! set difference over full-row identity, guaranteeing no row value appears
//! on both sides.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Test-partition share of a single stratum, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct StratumShare {
    pub stratum: u32,
    pub total_rows: usize,
    pub test_rows: usize,
    pub test_ratio: f64,
}

/// Draw the raw test sample: `round(test_fraction * n)` rows per stratum,
/// uniformly without replacement.
///
/// The seed is reused verbatim for every stratum draw, matching the
/// reference policy: two strata of equal size produce identical row
/// offsets. Rows are returned in stratum-then-source order.
///
/// A stratum too small to contribute a test row (including a single-row
/// stratum at fraction 0.2) is logged as a warning and skipped; this is
/// accepted behavior, not an error.
pub fn stratified_sample(
    df: &DataFrame,
    strata_column: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<DataFrame> {
    let strata = df
        .column(strata_column)
        .with_context(|| format!("Stratum column '{}' not found", strata_column))?
        .cast(&DataType::UInt32)
        .with_context(|| format!("Stratum column '{}' must be integer-valued", strata_column))?;
    let ca = strata.u32()?;

    // Row indices grouped by stratum, ascending stratum order, source order
    // preserved within each stratum.
    let mut by_stratum: BTreeMap<u32, Vec<IdxSize>> = BTreeMap::new();
    for (row, opt_val) in ca.into_iter().enumerate() {
        let stratum = opt_val
            .with_context(|| format!("Stratum column '{}' contains null values", strata_column))?;
        by_stratum.entry(stratum).or_default().push(row as IdxSize);
    }

    let mut picked: Vec<IdxSize> = Vec::new();
    for (stratum, rows) in &by_stratum {
        let sample_size = (test_fraction * rows.len() as f64).round() as usize;
        if sample_size == 0 {
            eprintln!(
                "Warning: stratum {} has {} row(s) and contributes no test rows at fraction {}",
                stratum,
                rows.len(),
                test_fraction
            );
            continue;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut offsets = rand::seq::index::sample(&mut rng, rows.len(), sample_size).into_vec();
        offsets.sort_unstable();
        picked.extend(offsets.into_iter().map(|offset| rows[offset]));
    }

    let idx = IdxCa::from_vec("idx".into(), picked);
    Ok(df.take(&idx)?)
}

/// Finalize the partition pair: train is the set difference
/// `original - test_raw` over full-row identity, test is returned unchanged.
///
/// Rows are compared as value tuples across all columns; rows with identical
/// values collapse to one logical row, so callers needing positional
/// fidelity must add a unique identifier column first. Train row order after
/// this step is not part of the contract.
pub fn finalize_partitions(
    original: &DataFrame,
    test_raw: &DataFrame,
) -> Result<(DataFrame, DataFrame)> {
    let test_keys: HashSet<String> = row_keys(test_raw)?.into_iter().collect();
    let original_keys = row_keys(original)?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(original_keys.len());
    let mut keep: Vec<IdxSize> = Vec::new();
    for (row, key) in original_keys.iter().enumerate() {
        if test_keys.contains(key.as_str()) {
            continue;
        }
        if seen.insert(key.as_str()) {
            keep.push(row as IdxSize);
        }
    }

    let idx = IdxCa::from_vec("idx".into(), keep);
    Ok((original.take(&idx)?, test_raw.clone()))
}

/// Per-stratum test share of the original population, for the run summary.
pub fn stratum_shares(
    original: &DataFrame,
    test_raw: &DataFrame,
    strata_column: &str,
) -> Result<Vec<StratumShare>> {
    let totals = stratum_counts(original, strata_column)?;
    let sampled = stratum_counts(test_raw, strata_column)?;

    Ok(totals
        .into_iter()
        .map(|(stratum, total_rows)| {
            let test_rows = sampled.get(&stratum).copied().unwrap_or(0);
            StratumShare {
                stratum,
                total_rows,
                test_rows,
                test_ratio: test_rows as f64 / total_rows as f64,
            }
        })
        .collect())
}

fn stratum_counts(df: &DataFrame, strata_column: &str) -> Result<BTreeMap<u32, usize>> {
    let strata = df.column(strata_column)?.cast(&DataType::UInt32)?;
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for opt_val in strata.u32()?.into_iter() {
        if let Some(stratum) = opt_val {
            *counts.entry(stratum).or_default() += 1;
        }
    }
    Ok(counts)
}

/// Build a full-row identity key for every row. Two rows with equal values
/// in every column produce the same key; nulls are distinguished from any
/// rendered value.
fn row_keys(df: &DataFrame) -> Result<Vec<String>> {
    let mut rendered: Vec<Vec<Option<String>>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        rendered.push(column_to_string_vec(column)?);
    }

    let mut keys = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut key = String::new();
        for column in &rendered {
            match &column[row] {
                Some(value) => key.push_str(value),
                None => key.push('\u{0}'),
            }
            // Unit separator keeps adjacent column values from merging
            key.push('\u{1f}');
        }
        keys.push(key);
    }
    Ok(keys)
}

/// Convert a column to displayable values for row-identity comparison.
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        dtype if dtype.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_bits().to_string()))
                .collect()
        }
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
