#![warn(missing_docs)]
//! # SweepBench
//!
//! Size-sweep micro-benchmarks for Rust where a crashing candidate is a result,
//! not the end of the run.
//!
//! SweepBench measures how long competing strategies take as the input grows:
//! - **Isolated Execution**: each run of an isolated strategy gets its own thread;
//!   panics and stack exhaustion come back as failed outcomes
//! - **Stack Guard**: recursive candidates call `stack::probe()` so running out
//!   of stack unwinds cleanly instead of aborting the process
//! - **Ordered Results**: every size × strategy point lands in a `ResultTable`,
//!   size-major, in declared strategy order
//! - **Reports**: text table with `ERR` markers, CSV, JSON, and an SVG chart
//! - **Registry**: strategies register with `inventory` and are picked up by the CLI
//!
//! ## Quick Start
//!
//! ```ignore
//! use sweepbench::prelude::*;
//!
//! let runner = SweepRunner::default();
//! let strategies = vec![
//!     Strategy::sized("sum", false, |n| WorkUnit::new("sum", move || (0..n).sum::<usize>())),
//! ];
//! let table = runner.run_sweep_sized(&[1000, 10_000], &strategies)?;
//! ```
//!
//! ## Registering a Strategy
//!
//! ```ignore
//! fn count_digits(text: &str) -> usize {
//!     text.bytes().filter(u8::is_ascii_digit).count()
//! }
//!
//! sweepbench::internal::inventory::submit! {
//!     sweepbench::StrategyDef {
//!         id: "digits",
//!         group: "digits",
//!         order: 0,
//!         isolate: false,
//!         description: "Count ASCII digits",
//!         run: count_digits,
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     sweepbench::run()
//! }
//! ```

// Re-export core types
pub use sweepbench_core::{
    DEFAULT_RED_ZONE, DEFAULT_STACK_SIZE, ExecutionOutcome, ExecutorConfig, FailureReason,
    IsolatedExecutor, NoopObserver, PlotSeries, ResultTable, StackExhausted, Stopwatch, Strategy,
    StrategyDef, StrategyRow, SweepError, SweepObserver, SweepPoint, SweepRunner, TableCell,
    WorkUnit, stack,
};

// Re-export reporting
pub use sweepbench_report::{
    ChartOptions, ERR_MARKER, OutputFormat, Report, ReportMeta, generate_csv_report,
    generate_human_report, generate_json_report, generate_svg_chart, generate_text_table,
    parse_json_report, y_axis_max,
};

// Re-export CLI building blocks
pub use sweepbench_cli::{
    Cli, Commands, SweepConfig, SweepExecution, SweepSettings, TextGenerator, build_report_meta,
    count_capitals_iterative, count_capitals_recursive, execute_sweep, run_with_cli,
};

/// Internal re-exports for registration
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ExecutionOutcome, ExecutorConfig, FailureReason, IsolatedExecutor, ResultTable, Strategy,
        StrategyDef, SweepRunner, WorkUnit, stack,
    };
}

/// Run the SweepBench CLI harness.
///
/// Call this from your binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     sweepbench::run()
/// }
/// ```
pub use sweepbench_cli::run;
