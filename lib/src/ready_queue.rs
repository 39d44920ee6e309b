//! Shared ready queue ordered by shortest burst
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard};

use crate::error::SimulationError;
use crate::process::{BurstOrdered, ProcessRecord};

/// Admitted processes waiting for a core.
///
/// Ordering is burst_time, then arrival_time, then index, so the pop order never depends on
/// which core pushed first.
#[derive(Default)]
pub struct ReadyQueue {
    heap: Mutex<BinaryHeap<BurstOrdered>>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BinaryHeap<BurstOrdered>>, SimulationError> {
        self.heap
            .lock()
            .map_err(|_| SimulationError::LockPoisoned("ready queue"))
    }

    pub fn push(&self, process: ProcessRecord) -> Result<(), SimulationError> {
        self.lock()?.push(BurstOrdered(process));
        Ok(())
    }

    /// Never blocks. `None` means empty right now, which may or may not be final.
    pub fn pop_min(&self) -> Result<Option<ProcessRecord>, SimulationError> {
        Ok(self.lock()?.pop().map(|entry| entry.0))
    }

    pub fn len(&self) -> Result<usize, SimulationError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SimulationError> {
        Ok(self.lock()?.is_empty())
    }
}
