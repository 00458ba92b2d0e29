//! Wall-Clock Timing
//!
//! A `Stopwatch` is started on the calling thread and may be moved into the
//! isolated thread, so the completion timestamp is taken where the unit
//! actually finishes.

use std::time::{Duration, Instant};

/// Monotonic stopwatch measuring start-to-completion latency
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start a new stopwatch
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed nanoseconds since start, saturating at `u64::MAX` (~584 years)
    #[inline(always)]
    pub fn elapsed_nanos(&self) -> u64 {
        duration_to_nanos(self.elapsed())
    }
}

/// Convert a duration to whole nanoseconds, saturating on overflow
#[inline]
pub fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Convert nanoseconds to fractional milliseconds
#[inline]
pub fn nanos_to_millis(nanos: u64) -> f64 {
    nanos as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_elapsed() {
        let watch = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(10));
        let nanos = watch.elapsed_nanos();

        // Should be at least 5ms (accounting for coarse sleep clocks)
        assert!(nanos >= 5_000_000);
        // Should be less than 1s
        assert!(nanos < 1_000_000_000);
    }

    #[test]
    fn test_stopwatch_moves_across_threads() {
        let watch = Stopwatch::start();
        let nanos = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(5));
            watch.elapsed_nanos()
        })
        .join()
        .unwrap();
        assert!(nanos >= 1_000_000);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(duration_to_nanos(Duration::from_millis(3)), 3_000_000);
        assert_eq!(duration_to_nanos(Duration::MAX), u64::MAX);
        assert!((nanos_to_millis(1_500_000) - 1.5).abs() < f64::EPSILON);
    }
}
