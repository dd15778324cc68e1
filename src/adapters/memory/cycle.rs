//! In-memory cycle store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::cycle::{Cycle, CycleStatus};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode};
use crate::ports::CycleStore;

/// In-memory implementation of [`CycleStore`].
///
/// The active cycle is the first inserted cycle whose status is Open,
/// matching the backend's single-active-cycle convention.
#[derive(Debug, Default)]
pub struct InMemoryCycleStore {
    cycles: RwLock<Vec<Cycle>>,
}

impl InMemoryCycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, cycle: Cycle) {
        self.cycles.write().expect("lock poisoned").push(cycle);
    }
}

#[async_trait]
impl CycleStore for InMemoryCycleStore {
    async fn active_cycle(&self) -> Result<Option<Cycle>, DomainError> {
        let cycles = self.cycles.read().expect("lock poisoned");
        Ok(cycles.iter().find(|c| c.status().is_open()).cloned())
    }

    async fn get(&self, id: CycleId) -> Result<Option<Cycle>, DomainError> {
        let cycles = self.cycles.read().expect("lock poisoned");
        Ok(cycles.iter().find(|c| c.id() == id).cloned())
    }

    async fn change_status(
        &self,
        id: CycleId,
        status: CycleStatus,
    ) -> Result<Cycle, DomainError> {
        let mut cycles = self.cycles.write().expect("lock poisoned");
        let cycle = cycles.iter_mut().find(|c| c.id() == id).ok_or_else(|| {
            DomainError::new(ErrorCode::CycleNotFound, "No cycle with this identifier")
                .with_detail("cycle_id", id.to_string())
        })?;

        *cycle = Cycle::reconstitute(
            cycle.id(),
            cycle.name().to_string(),
            cycle.year(),
            cycle.month(),
            status,
            cycle.start_date().map(str::to_string),
            cycle.close_date().map(str::to_string),
            cycle.planning_start_month(),
        );
        Ok(cycle.clone())
    }
}
