//! Preparation run summary: terminal table and optional JSON export

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::split::StratumShare;

/// One encoded categorical column and its fitted cardinality.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedColumn {
    pub column: String,
    pub cardinality: usize,
}

/// Model evaluation result for the summary.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Partition the error was measured on ("train" or "test")
    pub partition: String,
    pub mean_absolute_error: f64,
}

/// Summary of a preparation run.
#[derive(Debug, Default, Serialize)]
pub struct PrepSummary {
    pub total_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub stratum_shares: Vec<StratumShare>,
    pub encoded_columns: Vec<EncodedColumn>,
    pub imputed_cells: usize,
    pub evaluation: Option<Evaluation>,
}

impl PrepSummary {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Default::default()
        }
    }

    pub fn set_partitions(&mut self, train_rows: usize, test_rows: usize) {
        self.train_rows = train_rows;
        self.test_rows = test_rows;
    }

    pub fn add_encoded_column(&mut self, column: String, cardinality: usize) {
        self.encoded_columns.push(EncodedColumn {
            column,
            cardinality,
        });
    }

    pub fn set_evaluation(&mut self, partition: &str, mean_absolute_error: f64) {
        self.evaluation = Some(Evaluation {
            partition: partition.to_string(),
            mean_absolute_error,
        });
    }

    /// Render the summary table to the terminal.
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Total Rows"),
            Cell::new(self.total_rows),
        ]);
        table.add_row(vec![
            Cell::new("🏋  Train Rows"),
            Cell::new(self.train_rows).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Test Rows"),
            Cell::new(self.test_rows).fg(Color::Yellow),
        ]);
        table.add_row(vec![
            Cell::new("🔤 Encoded Columns"),
            Cell::new(self.encoded_columns.len()),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Imputed Cells"),
            Cell::new(self.imputed_cells).fg(if self.imputed_cells == 0 {
                Color::White
            } else {
                Color::Cyan
            }),
        ]);
        if let Some(eval) = &self.evaluation {
            table.add_row(vec![
                Cell::new(format!("📉 MAE ({})", eval.partition)),
                Cell::new(format!("{:.2}", eval.mean_absolute_error))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.stratum_shares.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📊").cyan(),
                style("TEST SHARE PER STRATUM").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            let mut strata_table = Table::new();
            strata_table.load_preset(UTF8_FULL_CONDENSED);
            strata_table.set_header(vec![
                Cell::new("Stratum").add_attribute(Attribute::Bold),
                Cell::new("Rows").add_attribute(Attribute::Bold),
                Cell::new("Test Rows").add_attribute(Attribute::Bold),
                Cell::new("Test Share").add_attribute(Attribute::Bold),
            ]);
            for share in &self.stratum_shares {
                strata_table.add_row(vec![
                    Cell::new(share.stratum),
                    Cell::new(share.total_rows),
                    Cell::new(share.test_rows),
                    Cell::new(format!("{:.1}%", share.test_ratio * 100.0)),
                ]);
            }
            for line in strata_table.to_string().lines() {
                println!("    {}", line);
            }
        }

        if !self.encoded_columns.is_empty() {
            println!();
            for encoded in &self.encoded_columns {
                println!(
                    "      {} {} {}",
                    style("•").dim(),
                    encoded.column,
                    style(format!("({} levels)", encoded.cardinality)).dim()
                );
            }
        }
    }

    /// Export the summary as JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}
