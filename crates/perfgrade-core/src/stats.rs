use serde::{Deserialize, Serialize};

use crate::metrics::Datapoint;

// ---------------------------------------------------------------------------
// MetricSummary
// ---------------------------------------------------------------------------

/// Min/max/mean over one statistic field of a metric's datapoints.
///
/// All three figures are rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// Number of datapoints that carried the field.
    pub count: usize,
}

/// Summarize the `statistic` field across `datapoints`.
///
/// Datapoints without a numeric value for the field are skipped rather than
/// counted as zero. Returns `None` when no datapoint carries the field.
pub fn calculate_stats(datapoints: &[Datapoint], statistic: &str) -> Option<MetricSummary> {
    let values: Vec<f64> = datapoints
        .iter()
        .filter_map(|dp| dp.value(statistic))
        .collect();
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(MetricSummary {
        min: round2(min),
        max: round2(max),
        avg: round2(mean),
        count: values.len(),
    })
}

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
