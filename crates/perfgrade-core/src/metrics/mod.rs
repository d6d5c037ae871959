pub mod catalog;
pub mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::PerfgradeError;
use crate::stats::{calculate_stats, MetricSummary};

pub use catalog::{MetricKey, MetricSpec, CATALOG, DEFAULT_METRICS_DIR, DEFAULT_STATISTIC};
pub use loader::load_datapoints;

// ---------------------------------------------------------------------------
// Datapoint
// ---------------------------------------------------------------------------

/// One timestamped CloudWatch sample.
///
/// Holds statistic names (`Average`, `Sum`, `Maximum`, ...) alongside
/// `Timestamp` and `Unit`, exactly as exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datapoint(Map<String, Value>);

impl Datapoint {
    /// Numeric value of `statistic`, if present.
    pub fn value(&self, statistic: &str) -> Option<f64> {
        self.0.get(statistic).and_then(Value::as_f64)
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("Timestamp").and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// CloudWatchMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RdsMetrics {
    pub cpu: Option<MetricSummary>,
    pub connections: Option<MetricSummary>,
    pub read_iops: Option<MetricSummary>,
    pub write_iops: Option<MetricSummary>,
    pub read_latency: Option<MetricSummary>,
    pub write_latency: Option<MetricSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EcsMetrics {
    pub cpu: Option<MetricSummary>,
    pub memory: Option<MetricSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AlbMetrics {
    pub response_time: Option<MetricSummary>,
    pub request_count: Option<MetricSummary>,
    pub healthy_hosts: Option<MetricSummary>,
}

/// Per-service metric summaries. A `None` entry means no data was found and
/// serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CloudWatchMetrics {
    pub rds: RdsMetrics,
    pub ecs: EcsMetrics,
    pub alb: AlbMetrics,
}

impl CloudWatchMetrics {
    pub fn get(&self, key: MetricKey) -> Option<&MetricSummary> {
        self.slot(key).as_ref()
    }

    fn slot(&self, key: MetricKey) -> &Option<MetricSummary> {
        match key {
            MetricKey::RdsCpu => &self.rds.cpu,
            MetricKey::RdsConnections => &self.rds.connections,
            MetricKey::RdsReadIops => &self.rds.read_iops,
            MetricKey::RdsWriteIops => &self.rds.write_iops,
            MetricKey::RdsReadLatency => &self.rds.read_latency,
            MetricKey::RdsWriteLatency => &self.rds.write_latency,
            MetricKey::EcsCpu => &self.ecs.cpu,
            MetricKey::EcsMemory => &self.ecs.memory,
            MetricKey::AlbResponseTime => &self.alb.response_time,
            MetricKey::AlbRequestCount => &self.alb.request_count,
            MetricKey::AlbHealthyHosts => &self.alb.healthy_hosts,
        }
    }

    pub fn set(&mut self, key: MetricKey, summary: Option<MetricSummary>) {
        let slot = match key {
            MetricKey::RdsCpu => &mut self.rds.cpu,
            MetricKey::RdsConnections => &mut self.rds.connections,
            MetricKey::RdsReadIops => &mut self.rds.read_iops,
            MetricKey::RdsWriteIops => &mut self.rds.write_iops,
            MetricKey::RdsReadLatency => &mut self.rds.read_latency,
            MetricKey::RdsWriteLatency => &mut self.rds.write_latency,
            MetricKey::EcsCpu => &mut self.ecs.cpu,
            MetricKey::EcsMemory => &mut self.ecs.memory,
            MetricKey::AlbResponseTime => &mut self.alb.response_time,
            MetricKey::AlbRequestCount => &mut self.alb.request_count,
            MetricKey::AlbHealthyHosts => &mut self.alb.healthy_hosts,
        };
        *slot = summary;
    }
}

/// Load and summarize every catalog metric found under `dir`.
pub fn collect_metrics(dir: impl AsRef<Path>) -> Result<CloudWatchMetrics, PerfgradeError> {
    let dir = dir.as_ref();
    let mut metrics = CloudWatchMetrics::default();

    for spec in CATALOG {
        let datapoints = load_datapoints(dir, spec.pattern)?;
        let summary = calculate_stats(&datapoints, spec.statistic);
        match &summary {
            Some(s) => debug!(
                service = spec.key.service(),
                metric = spec.key.name(),
                count = s.count,
                avg = s.avg,
                "summarized metric"
            ),
            None => warn!(
                service = spec.key.service(),
                metric = spec.key.name(),
                pattern = spec.pattern,
                "no datapoints found"
            ),
        }
        metrics.set(spec.key, summary);
    }

    Ok(metrics)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
