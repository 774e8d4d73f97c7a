//! Missminer: Missingness Mining Library
//!
//! A library for discovering whether the missing values in a dataset are
//! random or systematically related to other variables. For every column with
//! missing cells a decision tree is trained to predict "is this cell missing?"
//! from the remaining columns, and the most predictive features are reported.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{MiningError, MiningResult};
