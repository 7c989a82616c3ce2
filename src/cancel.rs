//! Cooperative cancellation for loader runs.
//!
//! The pipeline checks a [`CancellationToken`] between top-level items
//! (regions, vectors, registers). A token trips either when another holder
//! calls [`CancellationToken::cancel`] or when its optional deadline passes.
//! Checks happen only between items, so a cancelled run never leaves a
//! half-created region or label behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Shared cancellation flag with an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that only trips when cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also trips once `budget` has elapsed from now.
    pub fn with_deadline(budget: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + budget),
        }
    }

    /// Request cancellation; every clone of this token observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::SeqCst) {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                warn!("load deadline exceeded, cancelling");
                self.flag.store(true, Ordering::SeqCst);
                true
            }
            _ => false,
        }
    }
}
