//! External termination via a shared flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Terminates when an external flag is set.
///
/// The engine polls the flag once per iteration boundary, so an iteration
/// already in progress always completes.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use antforge_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(Arc::clone(&flag));
/// assert!(!term.is_terminated());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_terminated());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn is_terminated(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears the flag so the next run starts uncancelled.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub(crate) fn flag(&self) -> &Arc<AtomicBool> {
        &self.flag
    }
}
