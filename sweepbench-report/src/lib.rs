#![warn(missing_docs)]
//! SweepBench Report - Reporting and Visualization
//!
//! Turns a completed `ResultTable` into a `Report` and renders it as:
//! - Text table (failed points marked `ERR`)
//! - CSV (spreadsheet-compatible)
//! - JSON (machine-readable)
//! - SVG line chart (latency vs size, failed points omitted)

mod chart;
mod csv;
mod json;
mod report;
mod text;

pub use chart::{ChartOptions, generate_svg_chart, y_axis_max};
pub use csv::generate_csv_report;
pub use json::{generate_json_report, parse_json_report};
pub use report::{
    FailureInfo, PointRecord, PointStatus, Report, ReportConfig, ReportMeta, ReportSummary,
    SCHEMA_VERSION, SeriesPoint, SeriesRecord, SystemInfo,
};
pub use text::{ERR_MARKER, generate_human_report, generate_text_table};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// CSV for spreadsheets
    Csv,
    /// JSON with full schema
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
