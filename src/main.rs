//! Strata: Stratified Dataset Preparation CLI
//!
//! Partitions a tabular dataset into train/test subsets with stratified
//! sampling, encodes categorical features, imputes missing values, and
//! hands the result to a linear regression capability.

mod cli;
mod model;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use model::{mean_absolute_error, predict, train_regressor};
use pipeline::{
    dataset_stats, finalize_partitions, load_dataset, sentinel_fill, split_features_and_target,
    stratified_sample, stratum_shares, validate_boundaries, with_stratum_column, CategoryEncoder,
    ImputeStrategy, Imputer, PipelineSchema,
};
use report::PrepSummary;
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_count,
    print_info, print_step_header, print_step_time, print_success,
};

/// Name of the helper column holding derived strata. Dropped from both
/// partitions before any feature work.
const STRATUM_COLUMN: &str = "stratum";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve configuration before touching any data
    let impute_strategy: ImputeStrategy = cli
        .impute_strategy
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    validate_boundaries(&cli.bin_boundaries)?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.strata_column,
        &cli.target,
        cli.test_fraction,
        cli.seed,
    );

    // Step 1: Load dataset and validate the schema up front
    print_step_header(1, "Load & Validate");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    let (rows, cols, memory_mb) = dataset_stats(&df);
    finish_with_success(&spinner, "Dataset loaded");

    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let schema = PipelineSchema::validate(
        &df,
        &cli.strata_column,
        &cli.target,
        &cli.categorical_columns,
    )?;
    if df.column(STRATUM_COLUMN).is_ok() {
        anyhow::bail!(
            "Dataset already contains a '{}' column; rename it before running",
            STRATUM_COLUMN
        );
    }
    print_success("Schema validated");
    print_step_time(step_start.elapsed());

    let mut summary = PrepSummary::new(rows);

    // Step 2: Stratified split
    print_step_header(2, "Stratified Split");

    let step_start = Instant::now();
    let binned = with_stratum_column(
        &df,
        &schema.strata_source,
        &cli.bin_boundaries,
        STRATUM_COLUMN,
    )?;
    let test_raw = stratified_sample(&binned, STRATUM_COLUMN, cli.test_fraction, cli.seed)?;
    summary.stratum_shares = stratum_shares(&binned, &test_raw, STRATUM_COLUMN)?;
    let (train, test) = finalize_partitions(&binned, &test_raw)?;

    // The helper column has served its purpose
    let mut train = train.drop(STRATUM_COLUMN)?;
    let mut test = test.drop(STRATUM_COLUMN)?;

    summary.set_partitions(train.height(), test.height());
    print_count("train row(s)", train.height(), None);
    print_count(
        "test row(s)",
        test.height(),
        Some(&format!("(target fraction {:.0}%)", cli.test_fraction * 100.0)),
    );
    print_success("Partitions are disjoint by construction");
    print_step_time(step_start.elapsed());

    // Step 3: Encode categorical columns, fitted on train only
    print_step_header(3, "Categorical Encoding");

    let step_start = Instant::now();
    if schema.categorical.is_empty() {
        print_info("No categorical columns declared");
    } else {
        for column in &schema.categorical {
            let encoder = CategoryEncoder::fit(&train, column)?;
            train = encoder.transform(&train)?;
            if cli.holdout {
                // Reuse the train-fitted map; unseen test categories fail here
                test = encoder.transform(&test)?;
            }
            print_count(
                &format!("level(s) in '{}'", column),
                encoder.cardinality(),
                None,
            );
            summary.add_encoded_column(column.clone(), encoder.cardinality());
        }
        print_success("Categorical columns encoded");
    }
    print_step_time(step_start.elapsed());

    // Step 4: Missing-value normalization
    print_step_header(4, "Missing-Value Normalization");

    let step_start = Instant::now();
    train = sentinel_fill(&train)?;
    if cli.holdout {
        test = sentinel_fill(&test)?;
    }

    let (x_train, y_train, feature_names) = split_features_and_target(&train, &schema.target)?;
    let sentinel_count = x_train.iter().filter(|v| v.is_nan()).count();
    summary.imputed_cells = sentinel_count;

    let mut imputer = Imputer::new(impute_strategy);
    imputer.fit(&x_train)?;
    let x_train = imputer.transform(&x_train)?;

    if sentinel_count == 0 {
        print_info("No missing values found");
    } else {
        print_count(
            &format!("missing cell(s) imputed with column {}", impute_strategy),
            sentinel_count,
            None,
        );
    }
    print_success(&format!(
        "Feature matrix ready: {} x {}",
        x_train.nrows(),
        feature_names.len()
    ));
    print_step_time(step_start.elapsed());

    // Step 5: Fit and evaluate the regressor
    print_step_header(5, "Train & Evaluate");

    let step_start = Instant::now();
    let spinner = create_spinner("Fitting linear regression...");
    let regressor = train_regressor(x_train.clone(), y_train.clone())?;
    finish_with_success(&spinner, "Model fitted");

    let (partition, mae) = if cli.holdout {
        let (x_test, y_test, _) = split_features_and_target(&test, &schema.target)?;
        let x_test = imputer.transform(&x_test)?;
        let predictions = predict(&regressor, &x_test);
        ("test", mean_absolute_error(&y_test, &predictions)?)
    } else {
        let predictions = predict(&regressor, &x_train);
        ("train", mean_absolute_error(&y_train, &predictions)?)
    };
    summary.set_evaluation(partition, mae);
    print_success(&format!("Mean absolute error ({}): {:.2}", partition, mae));
    print_step_time(step_start.elapsed());

    summary.display();

    if let Some(report_path) = &cli.report {
        summary.write_json(report_path)?;
        print_success(&format!("Report written to {}", report_path.display()));
    }

    print_completion();

    Ok(())
}
