//! Category binning: derive discrete sampling strata from a continuous column.
//!
//! Strata balance the random split so rare value ranges of the source column
//! keep their population share in the test partition instead of being
//! under-represented by a single global draw.

use anyhow::Result;
use polars::prelude::*;

use super::error::PrepError;

/// Map a finite value to a stratum label using fixed ascending boundaries.
///
/// `k` boundaries yield `k + 1` strata labeled `1..=k+1`. The test is strict
/// less-than, so a value sitting exactly on a boundary falls into the later
/// stratum: with boundaries `[1.5, 3.0, 4.5, 6.0]`, `1.2 -> 1`, `1.5 -> 2`,
/// `9.9 -> 5`. Non-finite input is rejected upstream by
/// [`with_stratum_column`], never here.
pub fn bin_value(value: f64, boundaries: &[f64]) -> u32 {
    for (i, bound) in boundaries.iter().enumerate() {
        if value < *bound {
            return (i + 1) as u32;
        }
    }
    boundaries.len() as u32 + 1
}

/// Check boundaries are usable: non-empty, finite, strictly ascending.
/// Called once at pipeline construction, before any data is touched.
pub fn validate_boundaries(boundaries: &[f64]) -> Result<()> {
    if boundaries.is_empty() {
        anyhow::bail!("At least one bin boundary is required");
    }
    for bound in boundaries {
        if !bound.is_finite() {
            anyhow::bail!("Bin boundaries must be finite, got {}", bound);
        }
    }
    for pair in boundaries.windows(2) {
        if pair[0] >= pair[1] {
            anyhow::bail!(
                "Bin boundaries must be strictly ascending: {} >= {}",
                pair[0],
                pair[1]
            );
        }
    }
    Ok(())
}

/// Append a stratum column derived from `source` to the dataset.
///
/// The source column must be numeric with no null or non-finite entries;
/// binning is only defined over finite reals.
pub fn with_stratum_column(
    df: &DataFrame,
    source: &str,
    boundaries: &[f64],
    stratum_name: &str,
) -> Result<DataFrame> {
    let column = df
        .column(source)
        .map_err(|_| PrepError::MissingColumn(source.to_string()))?;
    // A non-strict cast would turn a string column into nulls instead of
    // failing, so the dtype is checked explicitly.
    if !column.dtype().is_primitive_numeric() {
        return Err(PrepError::ColumnType {
            column: source.to_string(),
            dtype: column.dtype().to_string(),
            expected: "numeric".to_string(),
        }
        .into());
    }
    let float_col = column.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;

    let mut strata: Vec<u32> = Vec::with_capacity(df.height());
    for (row, opt_val) in ca.into_iter().enumerate() {
        match opt_val {
            Some(v) if v.is_finite() => strata.push(bin_value(v, boundaries)),
            _ => {
                return Err(PrepError::NonFiniteStratumSource {
                    column: source.to_string(),
                    row,
                }
                .into())
            }
        }
    }

    let mut out = df.clone();
    out.with_column(Column::new(stratum_name.into(), strata))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: [f64; 4] = [1.5, 3.0, 4.5, 6.0];

    #[test]
    fn test_bin_value_reference_examples() {
        assert_eq!(bin_value(1.2, &BOUNDARIES), 1);
        assert_eq!(bin_value(1.5, &BOUNDARIES), 2);
        assert_eq!(bin_value(6.0, &BOUNDARIES), 5);
        assert_eq!(bin_value(9.9, &BOUNDARIES), 5);
    }

    #[test]
    fn test_bin_value_interior_boundary() {
        // Strict less-than: the boundary value belongs to the later stratum
        assert_eq!(bin_value(2.9, &BOUNDARIES), 2);
        assert_eq!(bin_value(3.0, &BOUNDARIES), 3);
        assert_eq!(bin_value(4.5, &BOUNDARIES), 4);
    }

    #[test]
    fn test_bin_value_single_boundary() {
        assert_eq!(bin_value(-10.0, &[0.0]), 1);
        assert_eq!(bin_value(0.0, &[0.0]), 2);
    }

    #[test]
    fn test_validate_boundaries_accepts_ascending() {
        assert!(validate_boundaries(&BOUNDARIES).is_ok());
    }

    #[test]
    fn test_validate_boundaries_rejects_unordered() {
        let result = validate_boundaries(&[1.5, 1.5, 3.0]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ascending"));
    }

    #[test]
    fn test_validate_boundaries_rejects_empty() {
        assert!(validate_boundaries(&[]).is_err());
    }

    #[test]
    fn test_validate_boundaries_rejects_nan() {
        assert!(validate_boundaries(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_with_stratum_column() {
        let df = df! {
            "median_income" => [1.2f64, 1.5, 6.0, 2.4],
        }
        .unwrap();

        let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();
        let strata: Vec<u32> = binned
            .column("stratum")
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

        assert_eq!(strata, vec![1, 2, 5, 2]);
    }

    #[test]
    fn test_with_stratum_column_rejects_null() {
        let df = df! {
            "median_income" => [Some(1.2f64), None, Some(3.1)],
        }
        .unwrap();

        let result = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("non-finite"));
    }

    #[test]
    fn test_with_stratum_column_rejects_nan() {
        let df = df! {
            "median_income" => [1.2f64, f64::NAN, 3.1],
        }
        .unwrap();

        assert!(with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").is_err());
    }

    #[test]
    fn test_with_stratum_column_missing_source() {
        let df = df! { "other" => [1.0f64] }.unwrap();
        let result = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
