//! Missminer: Missingness Mining CLI Tool
//!
//! A command-line tool that reports which features predict the missing
//! values of each column in a dataset.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use missminer::cli::{Cli, OutputMethod};
use missminer::pipeline::{
    dataset_stats, load_dataset, missing_rate_by_group, MissingnessClassifier, SimpleImputer,
};
use missminer::report::{
    display_breakdown, export_results_json, export_results_markdown, ExportParams, MiningSummary,
};
use missminer::utils::{
    create_progress_bar, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let method = cli.output_method();
    let export_path = cli.export_path();
    let config = cli.miner_config();

    print_banner(env!("CARGO_PKG_VERSION"));

    let mut output_label = match method {
        OutputMethod::Markdown => export_path.display().to_string(),
        OutputMethod::Console => "console".to_string(),
    };
    if let Some(json_path) = &cli.json_path {
        output_label.push_str(&format!(" + {}", json_path.display()));
    }
    print_config(&cli.file_path, &output_label, config.test_fraction, config.seed);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(
        &cli.file_path,
        cli.sheet_name.as_deref(),
        cli.infer_schema_length,
    )?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols, memory_mb) = dataset_stats(&df);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    // Breakdown mode replaces mining
    if let (Some(missing_column), Some(feature_column)) = (&cli.breakdown, &cli.by) {
        print_step_header(2, "Missingness Breakdown");
        let breakdown = missing_rate_by_group(&df, missing_column, feature_column, cli.bins)?;
        display_breakdown(&breakdown);
        print_completion();
        return Ok(());
    }

    // Step 2: Prepare features
    print_step_header(2, "Prepare Features");
    let step_start = Instant::now();
    let strategy = cli.impute_strategy;
    let classifier =
        MissingnessClassifier::with_imputer(&df, config, || Box::new(SimpleImputer::new(strategy)))?;
    let detail = format!(
        "({} categorical, {} numeric column(s))",
        classifier.categorical_data().width(),
        classifier.numeric_data().width()
    );
    print_count(
        "column(s) with missing values",
        classifier.missing_columns().len(),
        Some(detail.as_str()),
    );
    print_step_time(step_start.elapsed());

    // Step 3: Mine
    print_step_header(3, "Mine Missingness Patterns");
    let step_start = Instant::now();
    let results = if classifier.missing_columns().is_empty() {
        print_info("No columns contain missing values");
        classifier.mine_all_columns()?
    } else {
        let pb = create_progress_bar(classifier.missing_columns().len() as u64, "Mining");
        let results = classifier.mine_all_columns_with_progress(&pb)?;
        finish_with_success(&pb, "Mining complete");
        results
    };
    let mining_elapsed = step_start.elapsed();
    print_step_time(mining_elapsed);

    // Step 4: Report
    print_step_header(4, "Report");
    match method {
        OutputMethod::Markdown => {
            export_results_markdown(&results, cli.top_k, &export_path)?;
            print_success(&format!("Markdown report written to {}", export_path.display()));
        }
        OutputMethod::Console => {
            println!();
            print!("{}", results.render());
        }
    }

    if let Some(json_path) = &cli.json_path {
        let input_file = cli.file_path.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            total_columns: df.width(),
            config: &config,
            impute_strategy: strategy,
        };
        export_results_json(&results, classifier.mask(), json_path, &params)?;
        print_success(&format!("JSON report written to {}", json_path.display()));
    }

    let mut summary = MiningSummary::new(&results, classifier.mask())?;
    summary.set_elapsed(mining_elapsed);
    summary.display();

    print_completion();

    Ok(())
}
