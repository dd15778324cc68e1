//! SelectionTracker - detects stale in-flight grid builds.
//!
//! The portal has no explicit fetch cancellation: when the user switches
//! customer or cycle mid-fetch, the old request still completes. Each
//! build captures a token at start; a result whose token is no longer
//! current is discarded on arrival instead of being applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one customer/cycle selection generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken(u64);

/// Monotonic generation counter for grid selections.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    generation: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection, invalidating all earlier tokens.
    pub fn begin_selection(&self) -> SelectionToken {
        SelectionToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if `token` belongs to the latest selection.
    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}
