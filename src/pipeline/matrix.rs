//! Feature matrix and label vector extraction.
//!
//! The last dataframe-to-numeric step: runs only after every non-numeric
//! column has been encoded, so every remaining column casts to float64.
//! Any null still present (an encoded categorical that was null in the
//! source) becomes the NaN sentinel here and is handled by the imputer.

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;

use super::error::PrepError;

/// Separate the label column from the features and lower both to ndarray.
///
/// Returns the row-major feature matrix, the parallel label vector, and the
/// feature column names in matrix column order. Matrix row count always
/// equals label length equals the partition row count.
pub fn split_features_and_target(
    df: &DataFrame,
    target: &str,
) -> Result<(Array2<f64>, Array1<f64>, Vec<String>)> {
    let target_col = df
        .column(target)
        .map_err(|_| PrepError::MissingColumn(target.to_string()))?;
    if !target_col.dtype().is_primitive_numeric() {
        return Err(PrepError::ColumnType {
            column: target.to_string(),
            dtype: target_col.dtype().to_string(),
            expected: "numeric".to_string(),
        }
        .into());
    }
    if target_col.null_count() > 0 {
        anyhow::bail!(
            "Target column '{}' contains {} null value(s); labels must be complete",
            target,
            target_col.null_count()
        );
    }
    let labels: Vec<f64> = target_col
        .cast(&DataType::Float64)
        .with_context(|| format!("Target column '{}' must be numeric", target))?
        .f64()?
        .into_iter()
        .flatten()
        .collect();

    let features = df.drop(target)?;
    let (height, width) = features.shape();

    let mut matrix = Array2::<f64>::zeros((height, width));
    let mut names = Vec::with_capacity(width);
    for (col_idx, column) in features.get_columns().iter().enumerate() {
        if !column.dtype().is_primitive_numeric() {
            return Err(PrepError::ColumnType {
                column: column.name().to_string(),
                dtype: column.dtype().to_string(),
                expected: "numeric".to_string(),
            }
            .into());
        }
        names.push(column.name().to_string());
        let cast = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Feature column '{}' must be numeric", column.name()))?;
        for (row_idx, opt_val) in cast.f64()?.into_iter().enumerate() {
            matrix[[row_idx, col_idx]] = opt_val.unwrap_or(f64::NAN);
        }
    }

    Ok((matrix, Array1::from(labels), names))
}
