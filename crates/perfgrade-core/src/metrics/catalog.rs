use serde::{Deserialize, Serialize};

/// Statistic field summarized for most metrics.
pub const DEFAULT_STATISTIC: &str = "Average";

/// Default directory holding the exported CloudWatch metric files.
pub const DEFAULT_METRICS_DIR: &str = "cloudwatch_metrics";

/// Identifies one logical metric in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    RdsCpu,
    RdsConnections,
    RdsReadIops,
    RdsWriteIops,
    RdsReadLatency,
    RdsWriteLatency,
    EcsCpu,
    EcsMemory,
    AlbResponseTime,
    AlbRequestCount,
    AlbHealthyHosts,
}

impl MetricKey {
    /// Service section the metric is reported under.
    pub fn service(self) -> &'static str {
        match self {
            MetricKey::RdsCpu
            | MetricKey::RdsConnections
            | MetricKey::RdsReadIops
            | MetricKey::RdsWriteIops
            | MetricKey::RdsReadLatency
            | MetricKey::RdsWriteLatency => "rds",
            MetricKey::EcsCpu | MetricKey::EcsMemory => "ecs",
            MetricKey::AlbResponseTime | MetricKey::AlbRequestCount | MetricKey::AlbHealthyHosts => {
                "alb"
            }
        }
    }

    /// Metric name within its service section.
    pub fn name(self) -> &'static str {
        match self {
            MetricKey::RdsCpu | MetricKey::EcsCpu => "cpu",
            MetricKey::RdsConnections => "connections",
            MetricKey::RdsReadIops => "read_iops",
            MetricKey::RdsWriteIops => "write_iops",
            MetricKey::RdsReadLatency => "read_latency",
            MetricKey::RdsWriteLatency => "write_latency",
            MetricKey::EcsMemory => "memory",
            MetricKey::AlbResponseTime => "response_time",
            MetricKey::AlbRequestCount => "request_count",
            MetricKey::AlbHealthyHosts => "healthy_hosts",
        }
    }
}

/// Where a metric's datapoints live and which statistic to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub key: MetricKey,
    /// File-name glob matched inside the metrics directory.
    pub pattern: &'static str,
    pub statistic: &'static str,
}

const fn spec(key: MetricKey, pattern: &'static str, statistic: &'static str) -> MetricSpec {
    MetricSpec {
        key,
        pattern,
        statistic,
    }
}

/// Every metric the report collects, in report order.
pub const CATALOG: &[MetricSpec] = &[
    spec(MetricKey::RdsCpu, "rds_cpu_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::RdsConnections, "rds_connections_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::RdsReadIops, "rds_read_iops_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::RdsWriteIops, "rds_write_iops_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::RdsReadLatency, "rds_read_latency_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::RdsWriteLatency, "rds_write_latency_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::EcsCpu, "ecs_cpu_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::EcsMemory, "ecs_memory_*.json", DEFAULT_STATISTIC),
    spec(MetricKey::AlbResponseTime, "alb_response_time_*.json", DEFAULT_STATISTIC),
    // Request count is a per-period total, not a gauge.
    spec(MetricKey::AlbRequestCount, "alb_request_count_*.json", "Sum"),
    spec(MetricKey::AlbHealthyHosts, "alb_healthy_hosts_*.json", DEFAULT_STATISTIC),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_covers_every_key_once() {
        let keys: HashSet<MetricKey> = CATALOG.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), CATALOG.len());
        assert_eq!(CATALOG.len(), 11);
    }

    #[test]
    fn only_request_count_uses_sum() {
        for entry in CATALOG {
            if entry.key == MetricKey::AlbRequestCount {
                assert_eq!(entry.statistic, "Sum");
            } else {
                assert_eq!(entry.statistic, DEFAULT_STATISTIC);
            }
        }
    }

    #[test]
    fn patterns_are_prefixed_by_service() {
        for entry in CATALOG {
            let prefix = format!("{}_{}_", entry.key.service(), entry.key.name());
            assert!(
                entry.pattern.starts_with(&prefix),
                "{} should start with {}",
                entry.pattern,
                prefix
            );
        }
    }
}
