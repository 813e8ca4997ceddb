//! Handle for observing and cancelling a running colony.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle shared with a [`ColonyEngine`](crate::ColonyEngine).
///
/// Cancellation is cooperative: the engine checks the flag before each
/// iteration, so the current iteration completes and is published first.
///
/// # Example
///
/// ```
/// use antforge_solver::realtime::ColonyHandle;
///
/// let (handle, cancel) = ColonyHandle::detached();
/// assert!(!handle.is_terminate_early_requested());
///
/// cancel.terminate_early();
/// assert!(handle.is_terminate_early_requested());
/// ```
#[derive(Clone)]
pub struct ColonyHandle {
    solving: Arc<AtomicBool>,
    terminate_early: Arc<AtomicBool>,
}

impl ColonyHandle {
    pub(crate) fn new(solving: Arc<AtomicBool>, terminate_early: Arc<AtomicBool>) -> Self {
        Self {
            solving,
            terminate_early,
        }
    }

    /// Creates a pair of handles sharing fresh flags, not bound to any engine.
    pub fn detached() -> (Self, Self) {
        let handle = Self::new(
            Arc::new(AtomicBool::new(false)),
            Arc::new(AtomicBool::new(false)),
        );
        (handle.clone(), handle)
    }

    /// Returns true while the engine is inside `solve`.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Requests cancellation at the next iteration boundary.
    pub fn terminate_early(&self) {
        self.terminate_early.store(true, Ordering::SeqCst);
    }

    pub fn is_terminate_early_requested(&self) -> bool {
        self.terminate_early.load(Ordering::SeqCst)
    }
}

impl Debug for ColonyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColonyHandle")
            .field("solving", &self.solving.load(Ordering::SeqCst))
            .field("terminate_early", &self.terminate_early.load(Ordering::SeqCst))
            .finish()
    }
}
