//! Report module - collecting, rendering and exporting mining results

pub mod export;
pub mod results;
pub mod summary;

pub use export::*;
pub use results::*;
pub use summary::*;
