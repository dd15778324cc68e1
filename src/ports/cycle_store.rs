//! Cycle store port.

use async_trait::async_trait;

use crate::domain::cycle::{Cycle, CycleStatus};
use crate::domain::foundation::{CycleId, DomainError};

/// Access to planning cycles and their lifecycle.
#[async_trait]
pub trait CycleStore: Send + Sync {
    /// Returns the currently active cycle, if any.
    async fn active_cycle(&self) -> Result<Option<Cycle>, DomainError>;

    /// Returns a cycle by ID, or None if unknown.
    async fn get(&self, id: CycleId) -> Result<Option<Cycle>, DomainError>;

    /// Applies a status change on the backend, returning the updated cycle.
    ///
    /// Callers validate the transition locally first; the backend may
    /// still reject it.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the identifier is unknown
    /// - `PersistenceFailure` if the backend rejects the change
    async fn change_status(
        &self,
        id: CycleId,
        status: CycleStatus,
    ) -> Result<Cycle, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CycleStore) {}
    }
}
