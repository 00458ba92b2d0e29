#![warn(missing_docs)]
//! SweepBench Core - Isolation & Timing Harness
//!
//! This crate provides the measurement primitive behind SweepBench:
//! - `WorkUnit`: a named, run-once computation
//! - `IsolatedExecutor`: runs a unit directly or on a dedicated thread that
//!   converts panics and stack exhaustion into ordinary outcomes
//! - `stack::probe`: cooperative stack guard for recursive candidates
//! - `SweepRunner`: drives sizes × strategies into an ordered `ResultTable`
//! - `StrategyDef`: registry entry for strategies discovered by the CLI

mod executor;
mod measure;
mod outcome;
pub mod stack;
mod sweep;
mod table;
mod unit;

pub use executor::{DEFAULT_STACK_SIZE, ExecutorConfig, ISOLATE_THREAD_NAME, IsolatedExecutor};
pub use measure::{Stopwatch, duration_to_nanos, nanos_to_millis};
pub use outcome::{ExecutionOutcome, FailureReason};
pub use stack::{DEFAULT_RED_ZONE, StackExhausted};
pub use sweep::{NoopObserver, Strategy, SweepError, SweepObserver, SweepRunner, UnitFactory};
pub use table::{PlotSeries, ResultTable, StrategyRow, SweepPoint, TableCell};
pub use unit::WorkUnit;

/// Strategy registered with `inventory::submit!` for discovery by the CLI.
///
/// Registered strategies operate on generated text: `run` receives the input
/// shared at the current size and returns a count that is black-boxed.
#[derive(Debug, Clone)]
pub struct StrategyDef {
    /// Unique identifier, also the strategy name in reports
    pub id: &'static str,
    /// Group this strategy is compared within
    pub group: &'static str,
    /// Position within the group (lower runs first)
    pub order: u32,
    /// Run units in an isolated context
    pub isolate: bool,
    /// One-line description for listings
    pub description: &'static str,
    /// The candidate computation
    pub run: fn(&str) -> usize,
}

inventory::collect!(StrategyDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<StrategyDef> {}
};
