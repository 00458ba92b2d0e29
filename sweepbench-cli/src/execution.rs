//! Sweep Execution
//!
//! Turns the planned `StrategyDef`s into core `Strategy`s over generated text
//! and drives them through a `SweepRunner`.
//!
//! ```text
//! StrategyDef (from inventory)
//!        │
//!        ▼
//!   SweepSettings ──▶ TextGenerator (one input per size)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │   SweepRunner    │  sizes × strategies, isolated where declared
//! └────────┬─────────┘
//!          │
//!          ▼
//!   ResultTable (+ wall-clock duration)
//! ```

use crate::input::TextGenerator;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use sweepbench_core::{
    ExecutorConfig, IsolatedExecutor, ResultTable, Strategy, StrategyDef, SweepError,
    SweepObserver, SweepPoint, SweepRunner, WorkUnit,
};

/// Settings for one sweep
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Input sizes in sweep order
    pub sizes: Vec<usize>,
    /// Seed of the text generator
    pub seed: u64,
    /// Isolated executor configuration
    pub executor: ExecutorConfig,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

/// Completed sweep
#[derive(Debug)]
pub struct SweepExecution {
    /// Every measured point
    pub table: ResultTable,
    /// Wall-clock time of the whole sweep, including input generation
    pub total_duration_ms: f64,
}

/// Wrap registered strategies as sweep strategies over shared text input
pub fn strategies_from_defs(defs: &[&'static StrategyDef]) -> Vec<Strategy<String>> {
    defs.iter()
        .map(|&def| {
            Strategy::new(def.id, def.isolate, move |size, input: &Arc<String>| {
                let input = Arc::clone(input);
                let run = def.run;
                WorkUnit::new(format!("{}/{}", def.id, size), move || run(&input))
            })
        })
        .collect()
}

/// Run the planned strategies over every size
pub fn execute_sweep(
    defs: &[&'static StrategyDef],
    settings: &SweepSettings,
) -> Result<SweepExecution, SweepError> {
    let strategies = strategies_from_defs(defs);
    let runner = SweepRunner::new(IsolatedExecutor::new(settings.executor.clone()));
    let mut generator = TextGenerator::new(settings.seed);

    let total = (settings.sizes.len() * strategies.len()) as u64;
    let mut observer = ProgressObserver::new(total, settings.show_progress);

    let start = Instant::now();
    let result = runner.run_sweep_observed(
        &settings.sizes,
        &strategies,
        |size| generator.generate(size),
        &mut observer,
    );
    observer.finish();
    let table = result?;

    Ok(SweepExecution {
        table,
        total_duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

/// Progress bar over sweep points
pub struct ProgressObserver {
    pb: Option<ProgressBar>,
    failed: usize,
}

impl ProgressObserver {
    /// Create an observer for `total` points; hidden when `visible` is false
    pub fn new(total: u64, visible: bool) -> Self {
        let pb = visible.then(|| {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        });
        Self { pb, failed: 0 }
    }

    /// Number of failed points seen so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    fn finish(&self) {
        if let Some(pb) = &self.pb {
            if self.failed > 0 {
                pb.finish_with_message(format!("Complete ({} ERR)", self.failed));
            } else {
                pb.finish_with_message("Complete");
            }
        }
    }
}

impl SweepObserver for ProgressObserver {
    fn on_point_start(&mut self, size: usize, strategy: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(format!("n={} {}", size, strategy));
        }
    }

    fn on_point_finished(&mut self, point: &SweepPoint) {
        if let Some(reason) = point.outcome.failure_reason() {
            self.failed += 1;
            if let Some(pb) = &self.pb {
                pb.println(format!("  ✗ n={} {}: {}", point.size, point.strategy, reason));
            }
        }
        if let Some(pb) = &self.pb {
            pb.inc(1);
        }
    }
}
