pub mod analysis;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod results;
pub mod stats;

pub use error::PerfgradeError;
