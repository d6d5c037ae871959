use std::path::PathBuf;

use clap::Parser;
use perfgrade_core::analysis::AnalysisThresholds;
use perfgrade_core::config::{ReportConfig, DEFAULT_OUTPUT_FILE};
use perfgrade_core::metrics::DEFAULT_METRICS_DIR;
use perfgrade_core::results::DEFAULT_RESULTS_FILE;

/// Combine load-test results and CloudWatch metrics into a graded report.
#[derive(Debug, Parser)]
#[command(name = "perfgrade", version, about)]
pub struct Args {
    /// Load-test harness output.
    #[arg(long, env = "PERFGRADE_RESULTS", default_value = DEFAULT_RESULTS_FILE)]
    pub results: PathBuf,

    /// Directory of exported CloudWatch metric files.
    #[arg(long, env = "PERFGRADE_METRICS_DIR", default_value = DEFAULT_METRICS_DIR)]
    pub metrics_dir: PathBuf,

    /// Where the JSON report is written.
    #[arg(long, env = "PERFGRADE_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Write the report without printing the summary.
    #[arg(long, short)]
    pub quiet: bool,

    /// RDS average CPU (%) above which the run is flagged.
    #[arg(long, default_value_t = 70.0)]
    pub rds_cpu_threshold: f64,

    /// RDS peak connection count above which the run is flagged.
    #[arg(long, default_value_t = 50.0)]
    pub rds_connections_threshold: f64,

    /// ECS average CPU (%) above which the run is graded C.
    #[arg(long, default_value_t = 70.0)]
    pub ecs_cpu_threshold: f64,

    /// Operation average response time (ms) considered slow.
    #[arg(long, default_value_t = 1000.0)]
    pub slow_operation_ms: f64,

    #[arg(long, default_value_t = 10.0)]
    pub read_latency_ms: f64,

    #[arg(long, default_value_t = 10.0)]
    pub write_latency_ms: f64,
}

impl Args {
    pub fn into_config(self) -> ReportConfig {
        ReportConfig {
            results_path: self.results,
            metrics_dir: self.metrics_dir,
            output_path: self.output,
            thresholds: AnalysisThresholds {
                rds_cpu_percent: self.rds_cpu_threshold,
                rds_max_connections: self.rds_connections_threshold,
                ecs_cpu_percent: self.ecs_cpu_threshold,
                slow_operation_ms: self.slow_operation_ms,
                read_latency_ms: self.read_latency_ms,
                write_latency_ms: self.write_latency_ms,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_library_config() {
        let args = Args::try_parse_from(["perfgrade"]).expect("parse");
        assert_eq!(args.into_config(), ReportConfig::default());
    }

    #[test]
    fn overrides_flow_into_config() {
        let args = Args::try_parse_from([
            "perfgrade",
            "--results",
            "run/results.json",
            "--metrics-dir",
            "run/metrics",
            "--output",
            "run/report.json",
            "--slow-operation-ms",
            "250",
            "--quiet",
        ])
        .expect("parse");
        assert!(args.quiet);
        let config = args.into_config();
        assert_eq!(config.results_path, PathBuf::from("run/results.json"));
        assert_eq!(config.metrics_dir, PathBuf::from("run/metrics"));
        assert_eq!(config.output_path, PathBuf::from("run/report.json"));
        assert_eq!(config.thresholds.slow_operation_ms, 250.0);
        assert_eq!(config.thresholds.rds_cpu_percent, 70.0);
    }
}
