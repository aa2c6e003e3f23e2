//! Environment readiness flag.
//!
//! Whether the host environment is ready (documents loaded, inputs attached)
//! is decided outside the engine. The host flips a shared [`Readiness`] with
//! [`mark_ready`](Readiness::mark_ready); the engine only reports it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared, monotonic "ready" flag.
///
/// Clones observe the same flag.
#[derive(Clone, Default)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Readiness {
    /// A flag that starts out not ready.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// A flag that is already ready.
    #[must_use]
    pub fn ready() -> Self {
        let readiness = Self::default();
        readiness.mark_ready();
        readiness
    }

    /// Marks the environment ready. Idempotent.
    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::AcqRel) {
            tracing::debug!("environment ready");
        }
    }

    /// Returns `true` once [`mark_ready`](Self::mark_ready) has been called
    /// on this flag or any clone of it.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Readiness")
            .field("ready", &self.is_ready())
            .finish()
    }
}
