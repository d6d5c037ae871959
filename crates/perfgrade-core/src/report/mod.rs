pub mod render;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::analysis::{analyze, AnalysisResult, AnalysisThresholds};
use crate::config::ReportConfig;
use crate::error::PerfgradeError;
use crate::metrics::{collect_metrics, CloudWatchMetrics};
use crate::results::{read_test_results, TestResultSet, TestStatistics};

pub use render::render_summary;

/// `report_generated` format: UTC, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The combined record persisted to `comprehensive_report.json`.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Report {
    pub report_generated: String,
    pub test_results: ReportTestResults,
    pub cloudwatch_metrics: CloudWatchMetrics,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportTestResults {
    pub metadata: Value,
    pub statistics: TestStatistics,
}

/// Assemble a report from loaded inputs. `generated_at` is injected so
/// repeated builds over the same inputs are byte-identical.
pub fn build_report(
    results: &TestResultSet,
    metrics: CloudWatchMetrics,
    thresholds: &AnalysisThresholds,
    generated_at: DateTime<Utc>,
) -> Report {
    let analysis = analyze(&results.statistics, &metrics, thresholds);
    Report {
        report_generated: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        test_results: ReportTestResults {
            metadata: results.test_metadata.clone(),
            statistics: results.statistics.clone(),
        },
        cloudwatch_metrics: metrics,
        analysis,
    }
}

/// Serialize a report as pretty-printed (2-space) JSON.
pub fn export_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write a report to disk as pretty-printed JSON.
pub fn write_report(report: &Report, path: impl AsRef<Path>) -> Result<(), PerfgradeError> {
    let content = export_json(report)?;
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Load inputs, analyze, and persist the report described by `config`.
///
/// A missing results file is a clean stop: it is logged and `Ok(None)` is
/// returned without writing anything.
pub fn generate_report(
    config: &ReportConfig,
    now: DateTime<Utc>,
) -> Result<Option<Report>, PerfgradeError> {
    config.validate()?;

    let Some(results) = read_test_results(&config.results_path)? else {
        error!(
            path = %config.results_path.display(),
            "test results not found, no report produced"
        );
        return Ok(None);
    };
    info!(
        path = %config.results_path.display(),
        operations = results.statistics.operations.len(),
        "loaded test results"
    );

    let metrics = collect_metrics(&config.metrics_dir)?;
    let report = build_report(&results, metrics, &config.thresholds, now);

    write_report(&report, &config.output_path)?;
    info!(
        path = %config.output_path.display(),
        grade = %report.analysis.performance_grade,
        issues = report.analysis.issues.len(),
        "report written"
    );

    Ok(Some(report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
