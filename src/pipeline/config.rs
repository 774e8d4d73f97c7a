//! Mining configuration

use serde::Serialize;

use crate::error::{MiningError, MiningResult};

/// Default share of rows held out for scoring
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// Decision tree growth limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeParams {
    /// Maximum depth (None grows until leaves are pure or too small)
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it may be split
    pub min_samples_split: usize,
    /// Minimum samples each child of a split must hold
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Settings for a mining run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinerConfig {
    /// Fraction of rows in the held-out test partition, in (0, 1)
    pub test_fraction: f64,
    /// Seed for the train/test shuffle. None draws from entropy.
    pub seed: Option<u64>,
    pub tree: TreeParams,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
            tree: TreeParams::default(),
        }
    }
}

impl MinerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> MiningResult<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(MiningError::InvalidConfig(format!(
                "test_fraction must be between 0.0 and 1.0 (exclusive), got {}",
                self.test_fraction
            )));
        }
        if self.tree.min_samples_split < 2 {
            return Err(MiningError::InvalidConfig(format!(
                "min_samples_split must be at least 2, got {}",
                self.tree.min_samples_split
            )));
        }
        if self.tree.min_samples_leaf < 1 {
            return Err(MiningError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if self.tree.max_depth == Some(0) {
            return Err(MiningError::InvalidConfig(
                "max_depth must be at least 1 when given".to_string(),
            ));
        }
        Ok(())
    }
}
