//! Processes that have not been admitted to the ready queue yet
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard};

use crate::error::SimulationError;
use crate::process::{ArrivalOrdered, ProcessRecord};

/// Pending processes keyed by arrival time.
///
/// Every scan and removal happens under one lock, so two cores can never claim the same record.
pub struct MasterRegistry {
    pending: Mutex<BinaryHeap<ArrivalOrdered>>,
}

impl MasterRegistry {
    pub fn new(processes: impl IntoIterator<Item = ProcessRecord>) -> Self {
        Self {
            pending: Mutex::new(processes.into_iter().map(ArrivalOrdered).collect()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BinaryHeap<ArrivalOrdered>>, SimulationError> {
        self.pending
            .lock()
            .map_err(|_| SimulationError::LockPoisoned("master registry"))
    }

    /// Removes and returns every process with `arrival_time <= time`, earliest arrival first.
    pub fn admit_up_to(&self, time: i32) -> Result<Vec<ProcessRecord>, SimulationError> {
        let mut pending = self.lock()?;
        let mut admitted = Vec::new();
        while let Some(next_arrival) = pending.peek().map(|entry| entry.0.arrival_time()) {
            if next_arrival > time {
                break;
            }
            if let Some(ArrivalOrdered(process)) = pending.pop() {
                admitted.push(process);
            }
        }
        Ok(admitted)
    }

    pub fn remaining(&self) -> Result<usize, SimulationError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SimulationError> {
        Ok(self.lock()?.is_empty())
    }

    /// Arrival time of the next pending process, used as the idle-advance target.
    pub fn earliest_arrival(&self) -> Result<Option<i32>, SimulationError> {
        Ok(self.lock()?.peek().map(|entry| entry.0.arrival_time()))
    }
}
