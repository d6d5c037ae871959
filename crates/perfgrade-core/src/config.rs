use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisThresholds;
use crate::error::PerfgradeError;
use crate::metrics::DEFAULT_METRICS_DIR;
use crate::results::DEFAULT_RESULTS_FILE;

pub const DEFAULT_OUTPUT_FILE: &str = "comprehensive_report.json";

/// Inputs, output and rule thresholds for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    pub results_path: PathBuf,
    pub metrics_dir: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub thresholds: AnalysisThresholds,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(DEFAULT_RESULTS_FILE),
            metrics_dir: PathBuf::from(DEFAULT_METRICS_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            thresholds: AnalysisThresholds::default(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), PerfgradeError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(PerfgradeError::Validation(
                "output path must not be empty".to_string(),
            ));
        }
        self.thresholds.validate()
    }
}
