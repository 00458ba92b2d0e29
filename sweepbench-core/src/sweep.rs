//! Sweep Runner
//!
//! Drives an ordered sequence of input sizes through an ordered list of
//! strategies. For each size the input hook is called once and the result is
//! shared read-only (`Arc`) by every strategy measured at that size.
//!
//! Measurements are strictly sequential: one point completes before the next
//! begins, so wall-clock timings are uncontended. A contained fault degrades a
//! single point; it never aborts the sweep. A panic from a non-isolated
//! strategy is not contained and unwinds out of [`SweepRunner::run_sweep`].

use crate::executor::IsolatedExecutor;
use crate::table::{ResultTable, SweepPoint};
use crate::unit::WorkUnit;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors detected before or while assembling a sweep
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SweepError {
    /// No sizes were given
    #[error("sweep needs at least one input size")]
    NoSizes,

    /// A size of zero was given
    #[error("input sizes must be positive (size #{index} is 0)")]
    ZeroSize {
        /// Position of the offending size
        index: usize,
    },

    /// No strategies were given
    #[error("sweep needs at least one strategy")]
    NoStrategies,

    /// Two strategies share a name
    #[error("duplicate strategy name: {0}")]
    DuplicateStrategy(String),

    /// A stored table does not have `|sizes| × |strategies|` points
    #[error("expected {expected} sweep points, got {got}")]
    ShapeMismatch {
        /// Expected number of points
        expected: usize,
        /// Actual number of points
        got: usize,
    },

    /// A stored table is not in size-major, strategy-minor order
    #[error("sweep points are not in size-major, strategy-minor order")]
    OutOfOrder,
}

/// Builds a fresh work unit for a size, given the input shared at that size
pub type UnitFactory<I> = Box<dyn Fn(usize, &Arc<I>) -> WorkUnit>;

/// A named candidate: isolation policy plus a unit factory
pub struct Strategy<I> {
    name: String,
    isolate: bool,
    factory: UnitFactory<I>,
}

impl<I> Strategy<I> {
    /// Create a strategy whose units are built from the shared per-size input
    pub fn new<F>(name: impl Into<String>, isolate: bool, factory: F) -> Self
    where
        F: Fn(usize, &Arc<I>) -> WorkUnit + 'static,
    {
        Self {
            name: name.into(),
            isolate,
            factory: Box::new(factory),
        }
    }

    /// Strategy name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether units run in an isolated context
    pub fn isolate(&self) -> bool {
        self.isolate
    }

    fn make_unit(&self, size: usize, input: &Arc<I>) -> WorkUnit {
        (self.factory)(size, input)
    }
}

impl Strategy<()> {
    /// Create a strategy whose factory only needs the size
    pub fn sized<F>(name: impl Into<String>, isolate: bool, factory: F) -> Self
    where
        F: Fn(usize) -> WorkUnit + 'static,
    {
        Self::new(name, isolate, move |size, _: &Arc<()>| factory(size))
    }
}

impl<I> fmt::Debug for Strategy<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("isolate", &self.isolate)
            .finish_non_exhaustive()
    }
}

/// Hook for observing sweep progress
pub trait SweepObserver {
    /// Called before a point is measured
    fn on_point_start(&mut self, _size: usize, _strategy: &str) {}

    /// Called after a point has been recorded
    fn on_point_finished(&mut self, _point: &SweepPoint) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}

/// Runs size sweeps through an [`IsolatedExecutor`]
#[derive(Debug, Clone, Default)]
pub struct SweepRunner {
    executor: IsolatedExecutor,
}

impl SweepRunner {
    /// Create a runner around an executor
    pub fn new(executor: IsolatedExecutor) -> Self {
        Self { executor }
    }

    /// Run every strategy once per size.
    ///
    /// `input` is called once per size; its result is shared by all strategies
    /// at that size. The returned table has exactly `sizes.len() * strategies.len()`
    /// points in size-major, strategy-minor order.
    pub fn run_sweep<I, G>(
        &self,
        sizes: &[usize],
        strategies: &[Strategy<I>],
        input: G,
    ) -> Result<ResultTable, SweepError>
    where
        G: FnMut(usize) -> I,
    {
        self.run_sweep_observed(sizes, strategies, input, &mut NoopObserver)
    }

    /// Run a sweep whose strategies need only the size
    pub fn run_sweep_sized(
        &self,
        sizes: &[usize],
        strategies: &[Strategy<()>],
    ) -> Result<ResultTable, SweepError> {
        self.run_sweep(sizes, strategies, |_| ())
    }

    /// Run a sweep, reporting each point to `observer`
    pub fn run_sweep_observed<I, G, O>(
        &self,
        sizes: &[usize],
        strategies: &[Strategy<I>],
        mut input: G,
        observer: &mut O,
    ) -> Result<ResultTable, SweepError>
    where
        G: FnMut(usize) -> I,
        O: SweepObserver + ?Sized,
    {
        validate(sizes, strategies)?;

        let names = strategies.iter().map(|s| s.name.clone()).collect();
        let mut table = ResultTable::with_capacity(sizes.to_vec(), names);

        for &size in sizes {
            let shared = Arc::new(input(size));

            for strategy in strategies {
                observer.on_point_start(size, &strategy.name);

                let unit = strategy.make_unit(size, &shared);
                let outcome = self.executor.run(unit, strategy.isolate);

                match outcome.failure_reason() {
                    Some(reason) => tracing::warn!(
                        size,
                        strategy = %strategy.name,
                        reason = reason.token(),
                        "contained fault: {}",
                        reason
                    ),
                    None => tracing::debug!(
                        size,
                        strategy = %strategy.name,
                        elapsed_ns = outcome.elapsed_nanos(),
                        "point measured"
                    ),
                }

                let point = SweepPoint {
                    size,
                    strategy: strategy.name.clone(),
                    outcome,
                };
                observer.on_point_finished(&point);
                table.push(point);
            }
        }

        Ok(table)
    }
}

fn validate<I>(sizes: &[usize], strategies: &[Strategy<I>]) -> Result<(), SweepError> {
    if sizes.is_empty() {
        return Err(SweepError::NoSizes);
    }
    if let Some(index) = sizes.iter().position(|&s| s == 0) {
        return Err(SweepError::ZeroSize { index });
    }
    if strategies.is_empty() {
        return Err(SweepError::NoStrategies);
    }

    let mut seen = HashSet::with_capacity(strategies.len());
    for strategy in strategies {
        if !seen.insert(strategy.name.as_str()) {
            return Err(SweepError::DuplicateStrategy(strategy.name.clone()));
        }
    }
    Ok(())
}
