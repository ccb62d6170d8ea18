//! Error taxonomy for the preparation pipeline.
//!
//! Every variant identifies the offending stage precisely so the driver can
//! abort with a useful message. There is no partial-success mode: the full
//! partition + encode + impute sequence either completes or fails outright.

use thiserror::Error;

/// Errors raised by the preparation pipeline components.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A required column is absent from the dataset.
    #[error("required column '{0}' not found in dataset")]
    MissingColumn(String),

    /// A column exists but has the wrong declared type.
    #[error("column '{column}' has type {dtype}, expected {expected}")]
    ColumnType {
        column: String,
        dtype: String,
        expected: String,
    },

    /// The stratification source column contains a null or non-finite value.
    /// Binning is only defined for finite reals, so this is rejected before
    /// any stratum is derived.
    #[error("stratification column '{column}' has a null or non-finite value at row {row}")]
    NonFiniteStratumSource { column: String, row: usize },

    /// A categorical value appeared at transform time that was absent from
    /// the fitted encoding map.
    #[error("category '{value}' in column '{column}' was not seen when the encoder was fitted")]
    UnknownCategory { column: String, value: String },

    /// `transform` was called on an imputer that has not been fitted.
    #[error("imputer must be fitted before transform is called")]
    ImputerNotFitted,

    /// A feature column has no observed (non-missing) values, so no
    /// imputation statistic can be computed for it.
    #[error("feature column {index} has no observed values to compute a {strategy} from")]
    EmptyColumn { index: usize, strategy: String },
}
