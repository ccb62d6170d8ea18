//! End-to-end integration tests for the full preparation pipeline

use strata::model::{mean_absolute_error, predict, train_regressor};
use strata::pipeline::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

const BOUNDARIES: [f64; 4] = [1.5, 3.0, 4.5, 6.0];

#[test]
fn test_full_pipeline_produces_clean_training_matrix() {
    let mut df = create_housing_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);
    let df = load_dataset(&csv_path, 100).unwrap();

    let schema = PipelineSchema::validate(
        &df,
        "median_income",
        "median_house_value",
        &["ocean_proximity".to_string()],
    )
    .unwrap();

    // Split
    let binned = with_stratum_column(&df, &schema.strata_source, &BOUNDARIES, "stratum").unwrap();
    let test_raw = stratified_sample(&binned, "stratum", 0.2, 42).unwrap();
    let (train, _test) = finalize_partitions(&binned, &test_raw).unwrap();
    let mut train = train.drop("stratum").unwrap();
    assert_eq!(train.height(), 16);

    // Encode
    let encoder = CategoryEncoder::fit(&train, "ocean_proximity").unwrap();
    train = encoder.transform(&train).unwrap();

    // Normalize
    train = sentinel_fill(&train).unwrap();
    let (x_train, y_train, names) = split_features_and_target(&train, &schema.target).unwrap();
    assert_eq!(x_train.nrows(), y_train.len());
    assert_eq!(x_train.ncols(), names.len());

    let mut imputer = Imputer::new(ImputeStrategy::Median);
    imputer.fit(&x_train).unwrap();
    let x_train = imputer.transform(&x_train).unwrap();

    // No sentinel survives normalization
    assert!(x_train.iter().all(|v| !v.is_nan()));

    // Model capability consumes the result
    let model = train_regressor(x_train.clone(), y_train.clone()).unwrap();
    let predictions = predict(&model, &x_train);
    let mae = mean_absolute_error(&y_train, &predictions).unwrap();
    assert!(mae.is_finite());
}

#[test]
fn test_holdout_path_reuses_fitted_state() {
    let df = create_housing_dataframe();

    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();
    let test_raw = stratified_sample(&binned, "stratum", 0.2, 42).unwrap();
    let (train, test) = finalize_partitions(&binned, &test_raw).unwrap();
    let mut train = train.drop("stratum").unwrap();
    let mut test = test.drop("stratum").unwrap();

    // Both fixture categories appear at least 8 times per partition side,
    // so the train-fitted encoder must cover the test partition
    let encoder = CategoryEncoder::fit(&train, "ocean_proximity").unwrap();
    train = encoder.transform(&train).unwrap();
    test = encoder.transform(&test).unwrap();

    train = sentinel_fill(&train).unwrap();
    test = sentinel_fill(&test).unwrap();

    let (x_train, y_train, _) =
        split_features_and_target(&train, "median_house_value").unwrap();
    let (x_test, y_test, _) = split_features_and_target(&test, "median_house_value").unwrap();

    let mut imputer = Imputer::new(ImputeStrategy::Median);
    imputer.fit(&x_train).unwrap();
    let fitted: Vec<f64> = imputer.statistics().unwrap().to_vec();

    let x_train = imputer.transform(&x_train).unwrap();
    let x_test = imputer.transform(&x_test).unwrap();

    // Transforming the test matrix never re-fits the statistic
    assert_eq!(imputer.statistics().unwrap(), fitted.as_slice());
    assert!(x_test.iter().all(|v| !v.is_nan()));

    let model = train_regressor(x_train, y_train).unwrap();
    let predictions = predict(&model, &x_test);
    let mae = mean_absolute_error(&y_test, &predictions).unwrap();
    assert!(mae.is_finite());
}

#[test]
fn test_schema_failure_aborts_before_split() {
    let df = create_housing_dataframe();
    let result = PipelineSchema::validate(
        &df,
        "no_such_column",
        "median_house_value",
        &["ocean_proximity".to_string()],
    );
    assert!(result.is_err());
}

#[test]
fn test_stratum_column_dropped_before_features() {
    let df = create_housing_dataframe();
    let binned = with_stratum_column(&df, "median_income", &BOUNDARIES, "stratum").unwrap();
    let test_raw = stratified_sample(&binned, "stratum", 0.2, 42).unwrap();
    let (train, _) = finalize_partitions(&binned, &test_raw).unwrap();
    let train = train.drop("stratum").unwrap();

    assert_has_columns(
        &train,
        &[
            "median_income",
            "total_rooms",
            "ocean_proximity",
            "median_house_value",
        ],
    );
    assert!(train.column("stratum").is_err());
}
