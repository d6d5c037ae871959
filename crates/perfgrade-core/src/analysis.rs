//! Analysis engine: grades a run and lists issues and recommendations.
//!
//! Rules run in a fixed order and can only lower the grade, so the outcome is
//! reproducible for a given set of inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PerfgradeError;
use crate::metrics::CloudWatchMetrics;
use crate::results::TestStatistics;

pub const EXCELLENT_SUMMARY: &str = "Excellent performance! All metrics within acceptable ranges.";

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Qualitative rating. Ordered by severity: `A < B < C`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    A,
    B,
    C,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
        };
        f.write_str(letter)
    }
}

// ---------------------------------------------------------------------------
// AnalysisThresholds
// ---------------------------------------------------------------------------

/// Limits above which a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisThresholds {
    /// RDS average CPU utilization, percent.
    pub rds_cpu_percent: f64,
    /// RDS peak connection count.
    pub rds_max_connections: f64,
    /// ECS average CPU utilization, percent.
    pub ecs_cpu_percent: f64,
    /// Per-operation average response time, milliseconds.
    pub slow_operation_ms: f64,
    pub read_latency_ms: f64,
    pub write_latency_ms: f64,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            rds_cpu_percent: 70.0,
            rds_max_connections: 50.0,
            ecs_cpu_percent: 70.0,
            slow_operation_ms: 1000.0,
            read_latency_ms: 10.0,
            write_latency_ms: 10.0,
        }
    }
}

impl AnalysisThresholds {
    /// Reject negative or non-finite limits.
    pub fn validate(&self) -> Result<(), PerfgradeError> {
        let fields = [
            ("rds_cpu_percent", self.rds_cpu_percent),
            ("rds_max_connections", self.rds_max_connections),
            ("ecs_cpu_percent", self.ecs_cpu_percent),
            ("slow_operation_ms", self.slow_operation_ms),
            ("read_latency_ms", self.read_latency_ms),
            ("write_latency_ms", self.write_latency_ms),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PerfgradeError::Validation(format!(
                    "threshold {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalysisResult {
    pub performance_grade: Grade,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl AnalysisResult {
    fn new() -> Self {
        Self {
            performance_grade: Grade::A,
            issues: Vec::new(),
            recommendations: Vec::new(),
            summary: String::new(),
        }
    }

    /// Lower the grade to `grade` unless it is already worse.
    fn downgrade(&mut self, grade: Grade) {
        self.performance_grade = self.performance_grade.max(grade);
    }

    fn finding(&mut self, issue: String, recommendation: impl Into<String>) {
        self.issues.push(issue);
        self.recommendations.push(recommendation.into());
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

struct RuleInput<'a> {
    statistics: &'a TestStatistics,
    metrics: &'a CloudWatchMetrics,
    thresholds: &'a AnalysisThresholds,
}

type Rule = fn(&RuleInput<'_>, &mut AnalysisResult);

/// Evaluation order matters: later rules observe the grade earlier ones set.
const RULES: &[Rule] = &[
    check_success_rate,
    check_rds_cpu,
    check_rds_connections,
    check_ecs_cpu,
    check_slow_operations,
    check_read_latency,
    check_write_latency,
];

fn check_success_rate(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if input.statistics.success_rate_percent() < 100.0 {
        out.issues.push(format!(
            "Test failures detected: {} operations failed",
            input.statistics.failed_operations
        ));
        out.downgrade(Grade::B);
    }
}

fn check_rds_cpu(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if let Some(cpu) = &input.metrics.rds.cpu {
        if cpu.avg > input.thresholds.rds_cpu_percent {
            out.finding(
                format!("High RDS CPU utilization: {}%", format_decimal(cpu.avg)),
                "Consider upgrading RDS instance class",
            );
            out.downgrade(Grade::B);
        }
    }
}

fn check_rds_connections(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if let Some(conn) = &input.metrics.rds.connections {
        if conn.max > input.thresholds.rds_max_connections {
            out.finding(
                format!("High database connection count: {}", format_decimal(conn.max)),
                "Review connection pooling settings",
            );
        }
    }
}

fn check_ecs_cpu(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if let Some(cpu) = &input.metrics.ecs.cpu {
        if cpu.avg > input.thresholds.ecs_cpu_percent {
            out.finding(
                format!("High ECS CPU utilization: {}%", format_decimal(cpu.avg)),
                "Consider scaling ECS tasks or increasing CPU allocation",
            );
            out.downgrade(Grade::C);
        }
    }
}

fn check_slow_operations(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    for (name, op) in &input.statistics.operations {
        if op.avg_ms() > input.thresholds.slow_operation_ms {
            // The harness's own number form: `1500` stays `1500`.
            out.finding(
                format!("Slow {name} operations: {}ms avg", op.avg_response_time),
                format!("Investigate {name} query performance"),
            );
            out.downgrade(Grade::B);
        }
    }
}

fn check_read_latency(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if let Some(lat) = &input.metrics.rds.read_latency {
        if lat.avg > input.thresholds.read_latency_ms {
            out.finding(
                format!("High database read latency: {}ms", format_decimal(lat.avg)),
                "Consider adding database indexes or caching",
            );
        }
    }
}

fn check_write_latency(input: &RuleInput<'_>, out: &mut AnalysisResult) {
    if let Some(lat) = &input.metrics.rds.write_latency {
        if lat.avg > input.thresholds.write_latency_ms {
            out.finding(
                format!("High database write latency: {}ms", format_decimal(lat.avg)),
                "Review database write operations and batch sizes",
            );
        }
    }
}

/// Run every rule in order and produce the graded analysis.
pub fn analyze(
    statistics: &TestStatistics,
    metrics: &CloudWatchMetrics,
    thresholds: &AnalysisThresholds,
) -> AnalysisResult {
    let input = RuleInput {
        statistics,
        metrics,
        thresholds,
    };
    let mut result = AnalysisResult::new();
    for rule in RULES {
        rule(&input, &mut result);
    }

    result.summary = if result.issues.is_empty() {
        EXCELLENT_SUMMARY.to_string()
    } else {
        format!("Found {} performance issues.", result.issues.len())
    };
    result
}

/// Shortest decimal form that keeps at least one fractional digit
/// (`85.0`, `85.25`).
fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
