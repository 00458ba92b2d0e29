//! CSV Output
//!
//! One line per point: `size,strategy,status,elapsed_ns,elapsed_ms,failure_kind,failure_message`.
//! Failed points leave the elapsed columns empty.

use crate::report::Report;

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output =
        String::from("size,strategy,status,elapsed_ns,elapsed_ms,failure_kind,failure_message\n");

    for point in &report.points {
        let status = match point.status {
            crate::report::PointStatus::Passed => "passed",
            crate::report::PointStatus::Failed => "failed",
        };
        let elapsed_ns = point.elapsed_ns.map(|ns| ns.to_string()).unwrap_or_default();
        let elapsed_ms = point
            .elapsed_ms()
            .map(|ms| format!("{:.6}", ms))
            .unwrap_or_default();
        let (kind, message) = point
            .failure
            .as_ref()
            .map(|f| (f.kind.as_str(), f.message.as_str()))
            .unwrap_or(("", ""));

        output.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            point.size,
            escape(&point.strategy),
            status,
            elapsed_ns,
            elapsed_ms,
            kind,
            escape(message)
        ));
    }

    output
}

/// Quote a field if it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
