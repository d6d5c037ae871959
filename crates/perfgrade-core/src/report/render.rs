//! Console rendering of a [`Report`].

use std::path::Path;

use super::Report;

const RULE_WIDTH: usize = 70;

/// Render the human-readable summary printed after a run.
///
/// Metric lines appear only for metrics that have a summary.
pub fn render_summary(report: &Report, output_path: &Path) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str("COMPREHENSIVE TEST REPORT\n");
    out.push_str(&format!("{heavy}\n"));

    // Test results.
    let stats = &report.test_results.statistics;
    out.push_str(&format!("\n📊 TEST RESULTS:\n{light}\n"));
    out.push_str(&format!("Total Operations:     {}\n", stats.total_operations));
    out.push_str(&format!("Successful:           {}\n", stats.successful_operations));
    out.push_str(&format!("Failed:               {}\n", stats.failed_operations));
    out.push_str(&format!("Success Rate:         {:.2}%\n", stats.success_rate_percent()));

    out.push_str(&format!("\n⏱️  RESPONSE TIMES:\n{light}\n"));
    for (name, op) in &stats.operations {
        out.push_str(&format!(
            "{:<20} avg: {:6.2}ms  (min: {:6.2}ms, max: {:6.2}ms)\n",
            name,
            op.avg_ms(),
            op.min_ms(),
            op.max_ms()
        ));
    }

    // RDS.
    let rds = &report.cloudwatch_metrics.rds;
    out.push_str(&format!("\n💾 RDS METRICS:\n{light}\n"));
    if let Some(cpu) = &rds.cpu {
        out.push_str(&format!(
            "CPU Utilization:      {:6.2}% (min: {:6.2}%, max: {:6.2}%)\n",
            cpu.avg, cpu.min, cpu.max
        ));
    }
    if let Some(conn) = &rds.connections {
        out.push_str(&format!(
            "Database Connections: {:6.2} (max: {:6.2})\n",
            conn.avg, conn.max
        ));
    }
    if let Some(iops) = &rds.read_iops {
        out.push_str(&format!("Read IOPS:           {:6.2} (max: {:6.2})\n", iops.avg, iops.max));
    }
    if let Some(iops) = &rds.write_iops {
        out.push_str(&format!("Write IOPS:          {:6.2} (max: {:6.2})\n", iops.avg, iops.max));
    }
    if let Some(lat) = &rds.read_latency {
        out.push_str(&format!("Read Latency:        {:6.2}ms (max: {:6.2}ms)\n", lat.avg, lat.max));
    }
    if let Some(lat) = &rds.write_latency {
        out.push_str(&format!("Write Latency:       {:6.2}ms (max: {:6.2}ms)\n", lat.avg, lat.max));
    }

    // ECS.
    let ecs = &report.cloudwatch_metrics.ecs;
    out.push_str(&format!("\n🚀 ECS METRICS:\n{light}\n"));
    if let Some(cpu) = &ecs.cpu {
        out.push_str(&format!("CPU Utilization:     {:6.2}% (max: {:6.2}%)\n", cpu.avg, cpu.max));
    }
    if let Some(mem) = &ecs.memory {
        out.push_str(&format!("Memory Utilization:  {:6.2}% (max: {:6.2}%)\n", mem.avg, mem.max));
    }

    // ALB.
    let alb = &report.cloudwatch_metrics.alb;
    out.push_str(&format!("\n⚖️  ALB METRICS:\n{light}\n"));
    if let Some(rt) = &alb.response_time {
        out.push_str(&format!("Response Time:       {:6.2}s (max: {:6.2}s)\n", rt.avg, rt.max));
    }
    if let Some(count) = &alb.request_count {
        out.push_str(&format!("Total Requests:      {}\n", count.max as i64));
    }
    if let Some(hosts) = &alb.healthy_hosts {
        out.push_str(&format!("Healthy Hosts (avg): {:6.2}\n", hosts.avg));
    }

    // Analysis.
    let analysis = &report.analysis;
    out.push_str(&format!("\n📈 PERFORMANCE ANALYSIS:\n{light}\n"));
    out.push_str(&format!("Grade: {}\n", analysis.performance_grade));
    out.push_str(&format!("\n{}\n", analysis.summary));

    if !analysis.issues.is_empty() {
        out.push_str("\n⚠️  Issues Found:\n");
        for (i, issue) in analysis.issues.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, issue));
        }
    }
    if !analysis.recommendations.is_empty() {
        out.push_str("\n💡 Recommendations:\n");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, rec));
        }
    }

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str(&format!("Report saved to: {}\n", output_path.display()));
    out.push_str(&format!("{heavy}\n"));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
