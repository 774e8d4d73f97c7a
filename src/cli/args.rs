//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{ImputeStrategy, MinerConfig, TreeParams, DEFAULT_BREAKDOWN_BINS};
use crate::report::DEFAULT_TOP_FEATURES;

/// Default markdown export path
pub const DEFAULT_MARKDOWN_PATH: &str = ".md";

/// Default JSON export path
pub const DEFAULT_JSON_PATH: &str = ".json";

/// Missminer - Report on patterns in the 'missingness' of data
#[derive(Parser, Debug)]
#[command(name = "missminer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the data set (CSV, Parquet or an xls/xlsx/xlsm/xlsb/ods workbook)
    #[arg(value_name = "PATH")]
    pub file_path: PathBuf,

    /// Sheet name if reading spreadsheet data (defaults to the first sheet)
    #[arg(short = 's', long = "sheet")]
    pub sheet_name: Option<String>,

    /// Method for processing results: "markdown" writes a markdown report,
    /// anything else prints to the console
    #[arg(short, long, default_value = "")]
    pub method: String,

    /// File path to write the markdown report to (default: '.md')
    #[arg(short = 'e', long = "export-path")]
    pub export_path: Option<PathBuf>,

    /// Also write a JSON report, to PATH or '.json' when no path is given
    #[arg(
        long = "json",
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_JSON_PATH
    )]
    pub json_path: Option<PathBuf>,

    /// Number of top features per column in the markdown report
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_FEATURES)]
    pub top_k: usize,

    /// Seed for the train/test split. Omit for a fresh random split each run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of rows held out for scoring (0.0 to 1.0, exclusive)
    #[arg(long, default_value = "0.25", value_parser = validate_test_fraction)]
    pub test_fraction: f64,

    /// Imputation for numeric predictors.
    /// Options: "mean" (default), "median", "most_frequent", "constant:<value>"
    #[arg(long, default_value = "mean")]
    pub impute_strategy: ImputeStrategy,

    /// Maximum decision tree depth (unlimited when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_depth: Option<u64>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Show how the missing rate of this column varies across --by
    /// instead of mining
    #[arg(long, requires = "by")]
    pub breakdown: Option<String>,

    /// Column to group by for --breakdown
    #[arg(long, requires = "breakdown")]
    pub by: Option<String>,

    /// Number of equal-frequency bins for numeric --by columns
    #[arg(long, default_value_t = DEFAULT_BREAKDOWN_BINS)]
    pub bins: usize,
}

/// What to do with the mining results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMethod {
    Markdown,
    Console,
}

impl OutputMethod {
    pub fn parse(method: &str) -> Self {
        match method.to_lowercase().as_str() {
            "markdown" => OutputMethod::Markdown,
            _ => OutputMethod::Console,
        }
    }
}

impl Cli {
    pub fn output_method(&self) -> OutputMethod {
        OutputMethod::parse(&self.method)
    }

    /// Markdown export path, falling back to '.md'
    pub fn export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MARKDOWN_PATH))
    }

    pub fn miner_config(&self) -> MinerConfig {
        MinerConfig {
            test_fraction: self.test_fraction,
            seed: self.seed,
            tree: TreeParams {
                max_depth: self.max_depth.map(|d| d as usize),
                ..Default::default()
            },
        }
    }
}

/// Validator for test_fraction parameter
fn validate_test_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_fraction must be between 0.0 and 1.0 (exclusive), got {}",
            value
        ))
    }
}
