//! Pipeline module - data preparation, model fitting and the mining loop

pub mod breakdown;
pub mod classifier;
pub mod config;
pub mod encoder;
pub mod features;
pub mod impute;
pub mod loader;
pub mod metrics;
pub mod missing;
pub mod partition;
pub mod tree;

pub use breakdown::*;
pub use classifier::*;
pub use config::*;
pub use encoder::*;
pub use features::*;
pub use impute::*;
pub use loader::*;
pub use metrics::*;
pub use missing::*;
pub use partition::*;
pub use tree::*;
