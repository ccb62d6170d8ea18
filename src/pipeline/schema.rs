//! Typed column-role mapping, validated at pipeline construction time.
//!
//! Every column the pipeline touches is resolved and type-checked here,
//! before any splitting occurs, so a missing or mistyped column fails fast
//! instead of surfacing at first use deep inside a transformation.

use polars::prelude::*;

use super::error::PrepError;

/// Resolved column roles for a preparation run.
#[derive(Debug, Clone)]
pub struct PipelineSchema {
    /// Continuous column the sampling strata are derived from.
    pub strata_source: String,
    /// Label column handed to the regressor.
    pub target: String,
    /// Categorical string columns to label-encode.
    pub categorical: Vec<String>,
    /// Remaining numeric feature columns.
    pub numeric_features: Vec<String>,
}

impl PipelineSchema {
    /// Validate the dataset against the requested column roles.
    ///
    /// # Arguments
    /// * `df` - The loaded dataset
    /// * `strata_source` - Column to bin into strata (must be numeric)
    /// * `target` - Label column (must be numeric)
    /// * `categorical` - Columns to encode (must be string-typed)
    ///
    /// # Errors
    /// `PrepError::MissingColumn` or `PrepError::ColumnType` on the first
    /// role that cannot be satisfied.
    pub fn validate(
        df: &DataFrame,
        strata_source: &str,
        target: &str,
        categorical: &[String],
    ) -> Result<Self, PrepError> {
        require_numeric(df, strata_source)?;
        require_numeric(df, target)?;

        for name in categorical {
            let column = lookup(df, name)?;
            if !matches!(column.dtype(), DataType::String) {
                return Err(PrepError::ColumnType {
                    column: name.clone(),
                    dtype: column.dtype().to_string(),
                    expected: "str".to_string(),
                });
            }
        }

        // Everything that is not the target or a declared categorical is a
        // numeric feature and must already be numeric.
        let mut numeric_features = Vec::new();
        for column in df.get_columns() {
            let name = column.name().to_string();
            if name == target || categorical.contains(&name) {
                continue;
            }
            if !column.dtype().is_primitive_numeric() {
                return Err(PrepError::ColumnType {
                    column: name,
                    dtype: column.dtype().to_string(),
                    expected: "numeric".to_string(),
                });
            }
            numeric_features.push(name);
        }

        Ok(Self {
            strata_source: strata_source.to_string(),
            target: target.to_string(),
            categorical: categorical.to_vec(),
            numeric_features,
        })
    }
}

fn lookup<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, PrepError> {
    df.column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))
}

fn require_numeric(df: &DataFrame, name: &str) -> Result<(), PrepError> {
    let column = lookup(df, name)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(PrepError::ColumnType {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
            expected: "numeric".to_string(),
        });
    }
    Ok(())
}
