//! Mining summary report for the console

use std::collections::HashMap;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use super::results::ResultCollection;
use crate::error::MiningResult;
use crate::pipeline::{MissingBreakdown, MissingnessMask};

/// F1 at or above this is highlighted as a systematic missingness pattern
const STRONG_PATTERN_F1: f64 = 0.5;

/// One mined column in the summary
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub missing_count: usize,
    pub missing_pct: f64,
    pub f1_score: f64,
    pub top_feature: Option<String>,
}

/// Summary of a mining run
#[derive(Debug, Default)]
pub struct MiningSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<ColumnSummary>,
    pub elapsed: Option<Duration>,
}

impl MiningSummary {
    pub fn new(results: &ResultCollection, mask: &MissingnessMask) -> MiningResult<Self> {
        let total_rows = mask.n_rows();
        let ratios: HashMap<String, f64> = mask.missing_ratios().into_iter().collect();
        let mut columns = Vec::with_capacity(results.len());

        for record in results {
            let missing_count = mask.missing_count(record.variable())?;
            let missing_pct = ratios.get(record.variable()).copied().unwrap_or(0.0) * 100.0;
            let top_feature = record
                .ranked_features()
                .first()
                .filter(|(_, importance)| *importance > 0.0)
                .map(|(feature, _)| feature.to_string());

            columns.push(ColumnSummary {
                column: record.variable().to_string(),
                missing_count,
                missing_pct,
                f1_score: record.score(),
                top_feature,
            });
        }

        Ok(Self {
            total_rows,
            total_columns: mask.columns().len(),
            columns,
            elapsed: None,
        })
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = Some(elapsed);
    }

    /// Number of columns whose missingness the model predicts well
    pub fn strong_patterns(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.f1_score >= STRONG_PATTERN_F1)
            .count()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Missing").add_attribute(Attribute::Bold),
            Cell::new("F1-score").add_attribute(Attribute::Bold),
            Cell::new("Top Feature").add_attribute(Attribute::Bold),
        ]);

        for entry in &self.columns {
            let color = if entry.f1_score >= STRONG_PATTERN_F1 {
                Color::Red
            } else {
                Color::Green
            };
            table.add_row(vec![
                Cell::new(&entry.column),
                Cell::new(format!("{} ({:.1}%)", entry.missing_count, entry.missing_pct)),
                Cell::new(format!("{:.3}", entry.f1_score)).fg(color),
                Cell::new(entry.top_feature.as_deref().unwrap_or("-")),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("MISSINGNESS SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!(
            "      {} row(s), {} column(s), {} with missing values",
            style(self.total_rows).yellow().bold(),
            style(self.total_columns).yellow().bold(),
            style(self.columns.len()).yellow().bold()
        );
        if let Some(elapsed) = self.elapsed {
            println!(
                "      {}",
                style(format!("Mined in {:.2}s", elapsed.as_secs_f64())).dim()
            );
        }
        println!();

        if self.columns.is_empty() {
            println!("      {}", style("No columns contain missing values").green());
            return;
        }

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        let strong = self.strong_patterns();
        if strong > 0 {
            println!();
            println!(
                "      {} column(s) show a systematic missingness pattern {}",
                style(strong).red().bold(),
                style(format!("(F1 >= {:.1})", STRONG_PATTERN_F1)).dim()
            );
        }
    }
}

/// Grouped missing-rate table for a breakdown
pub fn breakdown_table(breakdown: &MissingBreakdown) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(&breakdown.feature_column).add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
        Cell::new("Missing %").add_attribute(Attribute::Bold),
    ]);

    let overall = breakdown.overall.rate;
    for group in &breakdown.groups {
        let color = if group.rate > overall {
            Color::Red
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(&group.label),
            Cell::new(group.rows),
            Cell::new(group.missing),
            Cell::new(format!("{:.1}%", group.rate * 100.0)).fg(color),
        ]);
    }

    table.add_row(vec![
        Cell::new(&breakdown.overall.label).add_attribute(Attribute::Bold),
        Cell::new(breakdown.overall.rows).add_attribute(Attribute::Bold),
        Cell::new(breakdown.overall.missing).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", overall * 100.0)).add_attribute(Attribute::Bold),
    ]);

    table
}

/// Print a breakdown of one column's missing rate across another column
pub fn display_breakdown(breakdown: &MissingBreakdown) {
    println!();
    println!(
        "    {} {} {} {}",
        style("📋").cyan(),
        style(format!("'{}'", breakdown.missing_column)).white().bold(),
        style("missing by").dim(),
        style(format!("'{}' ({})", breakdown.feature_column, breakdown.feature_kind))
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in breakdown_table(breakdown).to_string().lines() {
        println!("    {}", line);
    }
}
