//! Stack Guard for Isolated Execution
//!
//! A hard stack overflow in Rust aborts the whole process, so it can never be
//! caught at the thread boundary. Instead each isolated thread records where
//! its stack starts and how deep it may grow before reaching a reserved red
//! zone. Recursive candidates call [`probe`] once per frame; when the current
//! depth crosses the limit the probe unwinds with a [`StackExhausted`] payload,
//! which the executor turns into an ordinary failed outcome.
//!
//! Outside an isolated thread the guard is disarmed and [`probe`] does nothing.
//! Stacks are assumed to grow downward, which holds on every supported target.

use std::cell::Cell;

/// Default red zone reserved at the bottom of an isolated thread's stack (64 KiB)
pub const DEFAULT_RED_ZONE: usize = 64 * 1024;

/// Unwind payload raised by [`probe`] when the red zone is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackExhausted {
    /// Stack depth in bytes at the point the probe tripped
    pub depth_bytes: usize,
    /// Usable depth in bytes (stack size minus red zone)
    pub limit_bytes: usize,
}

#[derive(Debug, Clone, Copy)]
struct GuardFrame {
    origin: usize,
    limit: usize,
}

thread_local! {
    static GUARD: Cell<Option<GuardFrame>> = const { Cell::new(None) };
}

/// Approximate current stack pointer: the address of a local in this frame.
#[inline(always)]
fn stack_address() -> usize {
    let marker = 0u8;
    std::hint::black_box(&marker) as *const u8 as usize
}

/// Check the remaining stack of the current isolated thread.
///
/// Unwinds with [`StackExhausted`] once the depth reaches the red zone. The
/// unwind is raised with `resume_unwind`, so no panic hook output is printed.
#[inline]
pub fn probe() {
    if let Some(frame) = GUARD.get() {
        let depth = frame.origin.saturating_sub(stack_address());
        if depth >= frame.limit {
            std::panic::resume_unwind(Box::new(StackExhausted {
                depth_bytes: depth,
                limit_bytes: frame.limit,
            }));
        }
    }
}

/// Bytes left before the red zone, or `None` when the guard is not armed.
pub fn remaining() -> Option<usize> {
    GUARD.get().map(|frame| {
        let depth = frame.origin.saturating_sub(stack_address());
        frame.limit.saturating_sub(depth)
    })
}

/// Whether the current thread has an armed stack guard
pub fn is_armed() -> bool {
    GUARD.get().is_some()
}

/// Arms the guard for the current thread until dropped.
///
/// Must be created at the entry of the thread whose stack size is known, so the
/// recorded origin sits near the top of that stack.
pub(crate) struct ArmedGuard {
    previous: Option<GuardFrame>,
}

impl ArmedGuard {
    pub(crate) fn arm(stack_size: usize, red_zone: usize) -> Self {
        let frame = GuardFrame {
            origin: stack_address(),
            limit: stack_size.saturating_sub(red_zone),
        };
        let previous = GUARD.replace(Some(frame));
        Self { previous }
    }
}

impl Drop for ArmedGuard {
    fn drop(&mut self) {
        GUARD.set(self.previous);
    }
}
