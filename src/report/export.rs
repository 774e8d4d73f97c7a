//! Export of mining results to markdown and JSON files

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::results::ResultCollection;
use crate::pipeline::{FeatureName, ImputeStrategy, MinerConfig, MissingnessMask};

/// Metadata about the mining run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Missminer version
    pub missminer_version: String,
    /// Input file path
    pub input_file: String,
    pub total_rows: usize,
    pub total_columns: usize,
    pub test_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    pub impute_strategy: String,
}

/// A single feature and its importance for one mined column
#[derive(Debug, Serialize)]
pub struct FeatureImportanceEntry {
    /// Human readable feature name
    pub feature: String,
    /// Source column of the feature
    pub variable: String,
    /// Category value for one-hot features
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub importance: f64,
}

/// Mining outcome for one column
#[derive(Debug, Serialize)]
pub struct ColumnResultEntry {
    pub column: String,
    pub model: String,
    pub missing_count: usize,
    pub missing_ratio: f64,
    pub f1_score: f64,
    /// Features ordered by importance, most important first
    pub features: Vec<FeatureImportanceEntry>,
}

/// Complete JSON export with metadata
#[derive(Debug, Serialize)]
pub struct MiningExport {
    pub metadata: ExportMetadata,
    pub results: Vec<ColumnResultEntry>,
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub total_columns: usize,
    pub config: &'a MinerConfig,
    pub impute_strategy: ImputeStrategy,
}

/// Build the export structure without writing it
pub fn build_export(
    results: &ResultCollection,
    mask: &MissingnessMask,
    params: &ExportParams,
) -> Result<MiningExport> {
    let total_rows = mask.n_rows();
    let mut entries = Vec::with_capacity(results.len());

    for record in results {
        let missing_count = mask.missing_count(record.variable())?;
        let features = record
            .ranked_features()
            .into_iter()
            .map(|(feature, importance)| {
                let value = match feature {
                    FeatureName::Category { value, .. } => Some(value.clone()),
                    FeatureName::Scalar(_) => None,
                };
                FeatureImportanceEntry {
                    feature: feature.to_string(),
                    variable: feature.variable().to_string(),
                    value,
                    importance,
                }
            })
            .collect();

        entries.push(ColumnResultEntry {
            column: record.variable().to_string(),
            model: record.model().name().to_string(),
            missing_count,
            missing_ratio: if total_rows > 0 {
                missing_count as f64 / total_rows as f64
            } else {
                0.0
            },
            f1_score: record.score(),
            features,
        });
    }

    Ok(MiningExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            missminer_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            total_rows,
            total_columns: params.total_columns,
            test_fraction: params.config.test_fraction,
            seed: params.config.seed,
            max_depth: params.config.tree.max_depth,
            impute_strategy: params.impute_strategy.to_string(),
        },
        results: entries,
    })
}

/// Export mining results to a JSON file with run metadata
pub fn export_results_json(
    results: &ResultCollection,
    mask: &MissingnessMask,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(results, mask, params)?;

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize mining results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write mining results to {}", output_path.display()))?;

    Ok(())
}

/// Write the markdown report to `output_path`
pub fn export_results_markdown(
    results: &ResultCollection,
    top_k: usize,
    output_path: &Path,
) -> Result<()> {
    std::fs::write(output_path, results.render_markdown(top_k))
        .with_context(|| format!("Failed to write markdown report to {}", output_path.display()))?;

    Ok(())
}
