//! Isolated Executor
//!
//! Runs one `WorkUnit` and reports exactly one `ExecutionOutcome`.
//!
//! ## Execution Modes
//!
//! - **Direct** (`isolate = false`): runs on the caller's thread. A panic
//!   propagates to the caller and aborts the sweep. Reserve this for
//!   strategies known to be bounded.
//!
//! - **Isolated** (`isolate = true`): runs on a dedicated thread with an armed
//!   stack guard and a `catch_unwind` at its entry. The caller blocks on a
//!   single-slot handoff until the thread reports completion or a trapped
//!   fault.
//!
//! ```text
//!  caller                         isolated thread
//!  ──────                         ───────────────
//!  Stopwatch::start()
//!  spawn ───────────────────────▶ arm stack guard
//!                                 catch_unwind(unit)
//!                                 elapsed = stopwatch
//!  recv() ◀──── sync_channel(1) ─ send(outcome)
//!  join()
//! ```
//!
//! Without a timeout, a unit that neither completes nor faults blocks the
//! caller forever.
//!
//! With a timeout, an expired unit is reported as `TimedOut` and its thread is
//! detached, not stopped. It keeps running and competes for CPU with every
//! point measured after it, so timings taken later in the same sweep are no
//! longer uncontended.

use crate::measure::{Stopwatch, duration_to_nanos};
use crate::outcome::{ExecutionOutcome, FailureReason};
use crate::stack::{ArmedGuard, DEFAULT_RED_ZONE, StackExhausted};
use crate::unit::WorkUnit;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Default stack size of an isolated thread (8 MiB)
pub const DEFAULT_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Name given to isolated threads
pub const ISOLATE_THREAD_NAME: &str = "sweepbench-isolate";

/// Configuration for isolated execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Stack size of each isolated thread in bytes
    pub stack_size: usize,
    /// Bytes reserved at the bottom of the stack; entering them trips the guard
    pub red_zone: usize,
    /// Optional upper bound on how long the caller waits for an isolated unit
    pub timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            red_zone: DEFAULT_RED_ZONE,
            timeout: None,
        }
    }
}

/// Executes work units directly or inside an isolated thread
#[derive(Debug, Clone, Default)]
pub struct IsolatedExecutor {
    config: ExecutorConfig,
}

impl IsolatedExecutor {
    /// Create an executor with the given configuration
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run a unit and report its outcome.
    ///
    /// With `isolate = false` a panicking unit unwinds into the caller.
    pub fn run(&self, unit: WorkUnit, isolate: bool) -> ExecutionOutcome {
        if isolate {
            self.run_isolated(unit)
        } else {
            run_direct(unit)
        }
    }

    fn run_isolated(&self, unit: WorkUnit) -> ExecutionOutcome {
        let (tx, rx) = mpsc::sync_channel::<ExecutionOutcome>(1);
        let stack_size = self.config.stack_size;
        let red_zone = self.config.red_zone;

        let watch = Stopwatch::start();
        let spawned = thread::Builder::new()
            .name(ISOLATE_THREAD_NAME.to_string())
            .stack_size(stack_size)
            .spawn(move || {
                let _guard = ArmedGuard::arm(stack_size, red_zone);
                let result = panic::catch_unwind(AssertUnwindSafe(|| unit.invoke()));
                let elapsed_nanos = watch.elapsed_nanos();

                let outcome = match result {
                    Ok(()) => ExecutionOutcome::completed(elapsed_nanos),
                    Err(payload) => ExecutionOutcome::failed(classify_fault(payload)),
                };
                // The receiver is gone only if the caller timed out
                let _ = tx.send(outcome);
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                return ExecutionOutcome::failed(FailureReason::SpawnFailed {
                    message: e.to_string(),
                });
            }
        };

        match self.config.timeout {
            None => {
                let outcome = rx
                    .recv()
                    .unwrap_or(ExecutionOutcome::failed(FailureReason::ExecutionFault));
                let _ = handle.join();
                outcome
            }
            Some(limit) => match rx.recv_timeout(limit) {
                Ok(outcome) => {
                    let _ = handle.join();
                    outcome
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let _ = handle.join();
                    ExecutionOutcome::failed(FailureReason::ExecutionFault)
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Threads cannot be killed; the runaway unit is detached.
                    tracing::warn!(
                        timeout_ms = limit.as_millis() as u64,
                        "isolated unit exceeded timeout, detaching its thread"
                    );
                    drop(handle);
                    ExecutionOutcome::failed(FailureReason::TimedOut {
                        after_nanos: duration_to_nanos(limit),
                    })
                }
            },
        }
    }
}

fn run_direct(unit: WorkUnit) -> ExecutionOutcome {
    let watch = Stopwatch::start();
    unit.invoke();
    ExecutionOutcome::completed(watch.elapsed_nanos())
}

/// Map an unwind payload caught at the isolated thread's entry to a reason
fn classify_fault(payload: Box<dyn Any + Send>) -> FailureReason {
    if let Some(exhausted) = payload.downcast_ref::<StackExhausted>() {
        return FailureReason::StackExhausted {
            depth_bytes: exhausted.depth_bytes,
            limit_bytes: exhausted.limit_bytes,
        };
    }

    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    FailureReason::Panicked { message }
}
