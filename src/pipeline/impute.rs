//! Missing-value normalization: sentinel fill, then fitted imputation.
//!
//! Stage one rewrites absent float entries as the NaN sentinel so the
//! numeric matrix stays homogeneous. Stage two replaces sentinels with a
//! per-column statistic fitted on the training matrix only. Fitting and
//! transforming are separate on purpose: the stored statistic must never be
//! recomputed from data being transformed, or test statistics would leak
//! into model evaluation.

use anyhow::Result;
use ndarray::Array2;
use polars::prelude::*;

use super::error::PrepError;

/// Statistic used to replace sentinel entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImputeStrategy {
    /// Column median, ignoring sentinel entries (default)
    #[default]
    Median,
    /// Column mean, ignoring sentinel entries
    Mean,
}

impl std::fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImputeStrategy::Median => write!(f, "median"),
            ImputeStrategy::Mean => write!(f, "mean"),
        }
    }
}

impl std::str::FromStr for ImputeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "median" => Ok(ImputeStrategy::Median),
            "mean" => Ok(ImputeStrategy::Mean),
            _ => Err(format!(
                "Unknown imputation strategy: '{}'. Use 'median' or 'mean'.",
                s
            )),
        }
    }
}

/// Replace absent entries in every float column with the NaN sentinel.
///
/// Non-float columns pass through untouched; integer-coded categoricals
/// keep their nulls until matrix extraction.
pub fn sentinel_fill(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in df.get_columns() {
        if !matches!(column.dtype(), DataType::Float32 | DataType::Float64) {
            continue;
        }
        if column.null_count() == 0 {
            continue;
        }
        let cast = column.cast(&DataType::Float64)?;
        let filled: Vec<f64> = cast
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        out.with_column(Column::new(column.name().clone(), filled))?;
    }
    Ok(out)
}

/// A column-wise imputer with fitted statistics.
#[derive(Debug, Clone, Default)]
pub struct Imputer {
    strategy: ImputeStrategy,
    statistics: Option<Vec<f64>>,
}

impl Imputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            statistics: None,
        }
    }

    /// Compute and store the per-column statistic from the training matrix,
    /// ignoring sentinel entries.
    ///
    /// # Errors
    /// `PrepError::EmptyColumn` if a column has no observed values at all.
    pub fn fit(&mut self, matrix: &Array2<f64>) -> Result<()> {
        let mut statistics = Vec::with_capacity(matrix.ncols());
        for (index, column) in matrix.columns().into_iter().enumerate() {
            let mut observed: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
            if observed.is_empty() {
                return Err(PrepError::EmptyColumn {
                    index,
                    strategy: self.strategy.to_string(),
                }
                .into());
            }
            let statistic = match self.strategy {
                ImputeStrategy::Median => median(&mut observed),
                ImputeStrategy::Mean => observed.iter().sum::<f64>() / observed.len() as f64,
            };
            statistics.push(statistic);
        }
        self.statistics = Some(statistics);
        Ok(())
    }

    /// Replace every sentinel entry with the stored column statistic.
    ///
    /// Works on any matrix with the fitted column count - train or future
    /// inference data. The statistic is never recomputed here.
    ///
    /// # Errors
    /// `PrepError::ImputerNotFitted` when called before [`Imputer::fit`].
    pub fn transform(&self, matrix: &Array2<f64>) -> Result<Array2<f64>> {
        let statistics = self
            .statistics
            .as_ref()
            .ok_or(PrepError::ImputerNotFitted)?;
        if statistics.len() != matrix.ncols() {
            anyhow::bail!(
                "Imputer was fitted on {} columns but received {}",
                statistics.len(),
                matrix.ncols()
            );
        }

        let mut out = matrix.clone();
        for ((_, col), value) in out.indexed_iter_mut() {
            if value.is_nan() {
                *value = statistics[col];
            }
        }
        Ok(out)
    }

    /// Fitted statistics, if any.
    pub fn statistics(&self) -> Option<&[f64]> {
        self.statistics.as_deref()
    }

    pub fn strategy(&self) -> ImputeStrategy {
        self.strategy
    }
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
