//! CLI module - argument parsing

mod args;

pub use args::{Cli, OutputMethod, DEFAULT_JSON_PATH, DEFAULT_MARKDOWN_PATH};
