//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("missminer").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Mining the patterns of missingness").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, output: &str, test_fraction: f64, seed: Option<u64>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(input, 38)
    );
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_string(output, 38)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Test fraction: {:<32}│",
        CHART,
        style(format!("{:.2}", test_fraction)).yellow()
    );
    println!(
        "    │  {} Seed:          {:<32}│",
        DICE,
        style(seed.map_or_else(|| "random".to_string(), |s| s.to_string())).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Missingness mining complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
