use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared by the units of one fan-out.
///
/// Units check the flag before starting their simulated work; a unit that is
/// already sleeping finishes normally.
///
/// ```
/// use recordscout::search::CancellationToken;
///
/// let token = CancellationToken::new();
/// let unit = token.clone();
/// assert!(!unit.is_cancelled());
///
/// token.cancel();
/// assert!(unit.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
