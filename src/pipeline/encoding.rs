//! Label encoding for categorical columns.
//!
//! The encoding map is fitted once on the training partition and reused for
//! any data the model later scores; it is never rebuilt at transform time.
//! A value absent from the fitted map is a hard error, not a silent lookup
//! miss.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::error::PrepError;

/// A fitted label -> integer mapping for one categorical column.
///
/// Codes are assigned in first-seen distinct order starting at 0, so the
/// mapping is a bijection over the values observed during fitting.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEncoder {
    column: String,
    levels: Vec<String>,
    #[serde(skip)]
    codes: HashMap<String, u32>,
}

impl CategoryEncoder {
    /// Fit an encoder on the training data's distinct values.
    ///
    /// Null entries are skipped; they stay null through `transform` and are
    /// handled by the missing-value stage downstream.
    pub fn fit(df: &DataFrame, column: &str) -> Result<Self> {
        let ca = string_column(df, column)?;

        let mut levels: Vec<String> = Vec::new();
        let mut codes: HashMap<String, u32> = HashMap::new();
        for value in ca.into_iter().flatten() {
            if !codes.contains_key(value) {
                codes.insert(value.to_string(), levels.len() as u32);
                levels.push(value.to_string());
            }
        }

        Ok(Self {
            column: column.to_string(),
            levels,
            codes,
        })
    }

    /// Rewrite the encoded column as integers, changing its declared type
    /// from string to `UInt32`.
    ///
    /// # Errors
    /// `PrepError::UnknownCategory` if a value was not seen during fitting.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let ca = string_column(df, &self.column)?;

        let mut encoded: Vec<Option<u32>> = Vec::with_capacity(df.height());
        for opt_value in ca.into_iter() {
            match opt_value {
                Some(value) => {
                    let code = self.codes.get(value).ok_or_else(|| {
                        PrepError::UnknownCategory {
                            column: self.column.clone(),
                            value: value.to_string(),
                        }
                    })?;
                    encoded.push(Some(*code));
                }
                None => encoded.push(None),
            }
        }

        let mut out = df.clone();
        out.with_column(Column::new(self.column.as_str().into(), encoded))?;
        Ok(out)
    }

    /// Recover the original label for a code.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.levels.get(code as usize).map(String::as_str)
    }

    /// Name of the encoded column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Number of distinct levels observed during fitting.
    pub fn cardinality(&self) -> usize {
        self.levels.len()
    }
}

fn string_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a StringChunked> {
    let col = df
        .column(column)
        .map_err(|_| PrepError::MissingColumn(column.to_string()))?;
    let ca = col.str().map_err(|_| PrepError::ColumnType {
        column: column.to_string(),
        dtype: col.dtype().to_string(),
        expected: "str".to_string(),
    })?;
    Ok(ca)
}
