//! Execution Outcomes
//!
//! An outcome is either a measured duration or a failure reason, never both.

use serde::{Deserialize, Serialize};

/// Why an isolated unit did not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FailureReason {
    /// The stack guard tripped inside the isolated context
    #[error("stack exhausted at {depth_bytes} bytes (limit {limit_bytes} bytes)")]
    StackExhausted {
        /// Depth reached when the guard tripped
        depth_bytes: usize,
        /// Usable stack depth of the isolated context
        limit_bytes: usize,
    },
    /// The unit panicked
    #[error("panicked: {message}")]
    Panicked {
        /// Panic message, or "Unknown panic" for non-string payloads
        message: String,
    },
    /// The isolated context ended without reporting an outcome
    #[error("isolated context terminated without reporting")]
    ExecutionFault,
    /// The unit exceeded the configured timeout
    #[error("timed out after {after_nanos} ns")]
    TimedOut {
        /// Configured limit in nanoseconds
        after_nanos: u64,
    },
    /// The isolated context could not be started
    #[error("failed to spawn isolated context: {message}")]
    SpawnFailed {
        /// OS error message
        message: String,
    },
}

impl FailureReason {
    /// Stable token identifying the fault class
    pub fn token(&self) -> &'static str {
        match self {
            FailureReason::StackExhausted { .. } => "stack-exhausted",
            FailureReason::Panicked { .. } => "panic",
            FailureReason::ExecutionFault => "execution-fault",
            FailureReason::TimedOut { .. } => "timed-out",
            FailureReason::SpawnFailed { .. } => "spawn-failed",
        }
    }
}

/// Result of one executor invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    /// The unit ran to completion
    Completed {
        /// Wall-clock latency from dispatch to completion
        elapsed_nanos: u64,
    },
    /// The unit terminated abnormally inside an isolated context
    Failed {
        /// The trapped condition
        reason: FailureReason,
    },
}

impl ExecutionOutcome {
    /// Outcome for a completed unit
    pub fn completed(elapsed_nanos: u64) -> Self {
        ExecutionOutcome::Completed { elapsed_nanos }
    }

    /// Outcome for a failed unit
    pub fn failed(reason: FailureReason) -> Self {
        ExecutionOutcome::Failed { reason }
    }

    /// Whether the unit failed
    pub fn is_failed(&self) -> bool {
        matches!(self, ExecutionOutcome::Failed { .. })
    }

    /// Elapsed nanoseconds, present only for completed units
    pub fn elapsed_nanos(&self) -> Option<u64> {
        match self {
            ExecutionOutcome::Completed { elapsed_nanos } => Some(*elapsed_nanos),
            ExecutionOutcome::Failed { .. } => None,
        }
    }

    /// Failure reason, present only for failed units
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            ExecutionOutcome::Completed { .. } => None,
            ExecutionOutcome::Failed { reason } => Some(reason),
        }
    }
}
