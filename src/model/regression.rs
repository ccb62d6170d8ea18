//! Linear regression backend via linfa.
//!
//! The pipeline treats the model as an opaque fit/predict/evaluate
//! capability; everything model-specific stays behind these three
//! functions.

use anyhow::Result;
use linfa::prelude::*;
use ndarray::{Array1, Array2};

pub use linfa_linear::FittedLinearRegression;
use linfa_linear::LinearRegression;

/// Fit an ordinary least squares regressor on the prepared training data.
pub fn train_regressor(
    features: Array2<f64>,
    labels: Array1<f64>,
) -> Result<FittedLinearRegression<f64>> {
    let dataset = Dataset::new(features, labels);
    LinearRegression::new()
        .fit(&dataset)
        .map_err(|e| anyhow::anyhow!("Failed to fit linear regression: {}", e))
}

/// Predict labels for a prepared feature matrix.
pub fn predict(model: &FittedLinearRegression<f64>, features: &Array2<f64>) -> Array1<f64> {
    model.predict(features)
}

/// Mean absolute error between true labels and predictions.
pub fn mean_absolute_error(labels: &Array1<f64>, predictions: &Array1<f64>) -> Result<f64> {
    predictions
        .mean_absolute_error(labels)
        .map_err(|e| anyhow::anyhow!("Failed to compute mean absolute error: {}", e))
}
