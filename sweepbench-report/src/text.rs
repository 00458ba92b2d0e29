//! Text Table Output
//!
//! Renders one row per size and one column per strategy, latencies in
//! milliseconds. Failed points are shown as the literal `ERR`.

use crate::report::{PointStatus, Report};

/// Marker printed for a failed point
pub const ERR_MARKER: &str = "ERR";

const MIN_SIZE_WIDTH: usize = 6;
const MIN_VALUE_WIDTH: usize = 21;

/// Render the results table.
///
/// ```text
/// === Capital letters ===
/// +--------+-----------------------+-----------------------+
/// | n      | recursive (ms)        | iterative (ms)        |
/// +--------+-----------------------+-----------------------+
/// |   3000 |                0.1200 |                0.0040 |
/// +--------+-----------------------+-----------------------+
/// ```
pub fn generate_text_table(report: &Report) -> String {
    let headers: Vec<String> = report
        .strategies
        .iter()
        .map(|s| format!("{} (ms)", s))
        .collect();

    let size_width = report
        .sizes
        .iter()
        .map(|s| s.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_SIZE_WIDTH);
    let value_widths: Vec<usize> = headers
        .iter()
        .map(|h| h.len().max(MIN_VALUE_WIDTH))
        .collect();

    let mut rule = format!("+{}", "-".repeat(size_width + 2));
    for w in &value_widths {
        rule.push('+');
        rule.push_str(&"-".repeat(w + 2));
    }
    rule.push_str("+\n");

    let mut output = format!("=== {} ===\n", report.meta.title);
    output.push_str(&rule);

    output.push_str(&format!("| {:<w$} ", "n", w = size_width));
    for (header, w) in headers.iter().zip(&value_widths) {
        output.push_str(&format!("| {:<w$} ", header, w = *w));
    }
    output.push_str("|\n");
    output.push_str(&rule);

    for (size, points) in report.rows() {
        output.push_str(&format!("| {:>w$} ", size, w = size_width));
        for (point, w) in points.iter().zip(&value_widths) {
            let cell = match (point.status, point.elapsed_ms()) {
                (PointStatus::Passed, Some(ms)) => format!("{:.4}", ms),
                _ => ERR_MARKER.to_string(),
            };
            output.push_str(&format!("| {:>w$} ", cell, w = *w));
        }
        output.push_str("|\n");
        output.push_str(&rule);
    }

    output.push_str(&format!(
        "\nNote: '{}' marks a run that failed inside its isolated context (e.g. stack exhaustion).\n",
        ERR_MARKER
    ));
    output
}

/// Format a report for terminal display: table, failure details, summary
pub fn generate_human_report(report: &Report) -> String {
    let mut output = String::from("\n");
    output.push_str(&generate_text_table(report));

    let failures: Vec<_> = report
        .points
        .iter()
        .filter_map(|p| p.failure.as_ref().map(|f| (p, f)))
        .collect();
    if !failures.is_empty() {
        output.push_str("\nFailures\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (point, failure) in failures {
            output.push_str(&format!(
                "  ✗ n={} {} [{}]: {}\n",
                point.size, point.strategy, failure.kind, failure.message
            ));
        }
    }

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Points: {}  Passed: {}  Failed: {}\n",
        report.summary.total_points, report.summary.passed, report.summary.failed
    ));
    if let Some(seed) = report.meta.seed {
        output.push_str(&format!("  Seed: {}\n", seed));
    }
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));
    output
}
