//! Strata: Stratified Dataset Preparation Library
//!
//! A library for partitioning tabular datasets into train/test subsets with
//! bias-resistant stratified sampling, then normalizing feature
//! representations (label encoding, missing-value imputation) for a
//! downstream regressor.

pub mod cli;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
