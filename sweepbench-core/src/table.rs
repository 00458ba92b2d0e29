//! Result Table and Derived Views
//!
//! The table is filled by the sweep runner in evaluation order (size-major,
//! strategy-minor) and is read-only afterwards. Two views feed the reporting
//! boundary: a per-strategy table view that keeps failed points as explicit
//! markers, and per-strategy plot series that drop them.

use crate::outcome::ExecutionOutcome;
use crate::sweep::SweepError;
use serde::{Deserialize, Serialize};

/// One measurement: a (size, strategy) pair and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Input size
    pub size: usize,
    /// Strategy name
    pub strategy: String,
    /// Execution outcome
    pub outcome: ExecutionOutcome,
}

/// Ordered sequence of sweep points, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    sizes: Vec<usize>,
    strategies: Vec<String>,
    points: Vec<SweepPoint>,
}

/// A cell of the tabular view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCell {
    /// Measured latency in nanoseconds
    Elapsed(u64),
    /// Failure marker carrying the reason token
    Failed(&'static str),
}

/// Per-strategy row of the tabular view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRow<'a> {
    /// Strategy name
    pub strategy: &'a str,
    /// `(size, cell)` pairs in size order
    pub cells: Vec<(usize, TableCell)>,
}

/// Per-strategy numeric series, failed points omitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotSeries<'a> {
    /// Strategy name
    pub strategy: &'a str,
    /// `(size, elapsed_nanos)` pairs for completed points only
    pub points: Vec<(usize, u64)>,
}

impl ResultTable {
    pub(crate) fn with_capacity(sizes: Vec<usize>, strategies: Vec<String>) -> Self {
        let capacity = sizes.len() * strategies.len();
        Self {
            sizes,
            strategies,
            points: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, point: SweepPoint) {
        self.points.push(point);
    }

    /// Rebuild a table from stored points, checking that they follow
    /// size-major, strategy-minor order for the given sizes and strategies.
    pub fn from_points(
        sizes: Vec<usize>,
        strategies: Vec<String>,
        points: Vec<SweepPoint>,
    ) -> Result<Self, SweepError> {
        let expected = sizes.len() * strategies.len();
        if points.len() != expected {
            return Err(SweepError::ShapeMismatch {
                expected,
                got: points.len(),
            });
        }

        let in_order = sizes
            .iter()
            .flat_map(|size| strategies.iter().map(move |name| (*size, name)))
            .zip(&points)
            .all(|((size, name), point)| point.size == size && &point.strategy == name);
        if !in_order {
            return Err(SweepError::OutOfOrder);
        }

        Ok(Self {
            sizes,
            strategies,
            points,
        })
    }

    /// Sizes in sweep order
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Strategy names in declared order
    pub fn strategies(&self) -> &[String] {
        &self.strategies
    }

    /// All points in evaluation order
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the table holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of one strategy, in size order
    pub fn points_for<'a>(&'a self, strategy: &'a str) -> impl Iterator<Item = &'a SweepPoint> {
        self.points.iter().filter(move |p| p.strategy == strategy)
    }

    /// Number of failed points of one strategy
    pub fn failure_count(&self, strategy: &str) -> usize {
        self.points_for(strategy)
            .filter(|p| p.outcome.is_failed())
            .count()
    }

    /// Points grouped by size: one slice per size, strategies in declared order
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[SweepPoint])> {
        let width = self.strategies.len().max(1);
        self.sizes.iter().copied().zip(self.points.chunks(width))
    }

    /// Tabular view: every point, failures kept as explicit markers
    pub fn table_view(&self) -> Vec<StrategyRow<'_>> {
        self.strategies
            .iter()
            .map(|name| StrategyRow {
                strategy: name,
                cells: self
                    .points_for(name)
                    .map(|p| {
                        let cell = match &p.outcome {
                            ExecutionOutcome::Completed { elapsed_nanos } => {
                                TableCell::Elapsed(*elapsed_nanos)
                            }
                            ExecutionOutcome::Failed { reason } => TableCell::Failed(reason.token()),
                        };
                        (p.size, cell)
                    })
                    .collect(),
            })
            .collect()
    }

    /// Plot view: completed points only, never coerced to a sentinel value
    pub fn plot_series(&self) -> Vec<PlotSeries<'_>> {
        self.strategies
            .iter()
            .map(|name| PlotSeries {
                strategy: name,
                points: self
                    .points_for(name)
                    .filter_map(|p| p.outcome.elapsed_nanos().map(|ns| (p.size, ns)))
                    .collect(),
            })
            .collect()
    }
}
