//! Work Units
//!
//! A `WorkUnit` is a named, run-once computation. Its return value is passed
//! through `black_box` and dropped, so the harness only observes whether the
//! unit completed.

use std::fmt;

/// A named, zero-argument unit of computation to be timed
pub struct WorkUnit {
    name: String,
    body: Box<dyn FnOnce() + Send + 'static>,
}

impl WorkUnit {
    /// Wrap a computation. The result is black-boxed so the work is not optimized away.
    pub fn new<T, F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(move || {
                std::hint::black_box(f());
            }),
        }
    }

    /// Name of the unit (usually the strategy name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the unit on the current thread, consuming it
    #[inline]
    pub fn invoke(self) {
        (self.body)()
    }
}

impl fmt::Debug for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkUnit")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
