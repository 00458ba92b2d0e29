//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sweepbench_core::{ExecutionOutcome, ResultTable, nanos_to_millis};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete sweep report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    /// Sizes in sweep order
    pub sizes: Vec<usize>,
    /// Strategy names in declared order
    pub strategies: Vec<String>,
    /// Every point, size-major and strategy-minor
    pub points: Vec<PointRecord>,
    /// Plot series per strategy, failed points omitted
    pub series: Vec<SeriesRecord>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    /// Seed of the input generator, if inputs were random
    pub seed: Option<u64>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Executor configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub stack_size: usize,
    pub red_zone: usize,
    pub timeout_ns: Option<u64>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// Status of a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    Passed,
    Failed,
}

/// Failure information for a failed point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Stable reason token (e.g. `stack-exhausted`)
    pub kind: String,
    pub message: String,
}

/// One measured point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    pub size: usize,
    pub strategy: String,
    pub status: PointStatus,
    pub elapsed_ns: Option<u64>,
    pub failure: Option<FailureInfo>,
}

impl PointRecord {
    /// Elapsed time in milliseconds, if the point passed
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed_ns.map(nanos_to_millis)
    }
}

/// A plotted point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub size: usize,
    pub elapsed_ms: f64,
}

/// Numeric series for one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub strategy: String,
    pub points: Vec<SeriesPoint>,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_points: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_duration_ms: f64,
}

impl Report {
    /// Build a report from a completed result table
    pub fn from_table(table: &ResultTable, meta: ReportMeta, total_duration_ms: f64) -> Self {
        let points: Vec<PointRecord> = table
            .points()
            .iter()
            .map(|p| match &p.outcome {
                ExecutionOutcome::Completed { elapsed_nanos } => PointRecord {
                    size: p.size,
                    strategy: p.strategy.clone(),
                    status: PointStatus::Passed,
                    elapsed_ns: Some(*elapsed_nanos),
                    failure: None,
                },
                ExecutionOutcome::Failed { reason } => PointRecord {
                    size: p.size,
                    strategy: p.strategy.clone(),
                    status: PointStatus::Failed,
                    elapsed_ns: None,
                    failure: Some(FailureInfo {
                        kind: reason.token().to_string(),
                        message: reason.to_string(),
                    }),
                },
            })
            .collect();

        let series = table
            .plot_series()
            .into_iter()
            .map(|s| SeriesRecord {
                strategy: s.strategy.to_string(),
                points: s
                    .points
                    .into_iter()
                    .map(|(size, ns)| SeriesPoint {
                        size,
                        elapsed_ms: nanos_to_millis(ns),
                    })
                    .collect(),
            })
            .collect();

        let failed = points
            .iter()
            .filter(|p| p.status == PointStatus::Failed)
            .count();
        let summary = ReportSummary {
            total_points: points.len(),
            passed: points.len() - failed,
            failed,
            total_duration_ms,
        };

        Self {
            meta,
            sizes: table.sizes().to_vec(),
            strategies: table.strategies().to_vec(),
            points,
            series,
            summary,
        }
    }

    /// Points grouped by size, strategies in declared order
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[PointRecord])> {
        let width = self.strategies.len().max(1);
        self.sizes.iter().copied().zip(self.points.chunks(width))
    }

    /// Largest plotted latency in milliseconds (0.0 when nothing passed)
    pub fn max_elapsed_ms(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.elapsed_ms))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use sweepbench_core::{FailureReason, SweepPoint};

    pub(crate) fn meta() -> ReportMeta {
        ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: "test".to_string(),
            title: "Capital letters".to_string(),
            timestamp: Utc::now(),
            seed: Some(42),
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Test CPU".to_string(),
                cpu_cores: 4,
            },
            config: ReportConfig {
                stack_size: 8 * 1024 * 1024,
                red_zone: 64 * 1024,
                timeout_ns: None,
            },
        }
    }

    /// recursive fails at the largest size; iterative always passes
    pub(crate) fn report() -> Report {
        let point = |size, strategy: &str, outcome| SweepPoint {
            size,
            strategy: strategy.to_string(),
            outcome,
        };
        let table = ResultTable::from_points(
            vec![3000, 8000, 131000],
            vec!["recursive".to_string(), "iterative".to_string()],
            vec![
                point(3000, "recursive", ExecutionOutcome::completed(120_000)),
                point(3000, "iterative", ExecutionOutcome::completed(4_000)),
                point(8000, "recursive", ExecutionOutcome::completed(310_000)),
                point(8000, "iterative", ExecutionOutcome::completed(9_500)),
                point(
                    131000,
                    "recursive",
                    ExecutionOutcome::failed(FailureReason::StackExhausted {
                        depth_bytes: 8_323_072,
                        limit_bytes: 8_323_072,
                    }),
                ),
                point(131000, "iterative", ExecutionOutcome::completed(150_000)),
            ],
        )
        .unwrap();
        Report::from_table(&table, meta(), 12.5)
    }
}
