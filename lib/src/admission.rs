//! Moves arrived processes from the master registry into the ready queue
use std::sync::Mutex;

use log::debug;

use crate::error::SimulationError;
use crate::master_registry::MasterRegistry;
use crate::ready_queue::ReadyQueue;

pub struct AdmissionController<'a> {
    registry: &'a MasterRegistry,
    ready_queue: &'a ReadyQueue,
    // Held for a whole batch so no record is ever between the registry and the queue while
    // another core looks at both. The registry and queue locks are taken one after the other
    // inside it, never together.
    batch: Mutex<()>,
}

impl<'a> AdmissionController<'a> {
    pub fn new(registry: &'a MasterRegistry, ready_queue: &'a ReadyQueue) -> Self {
        Self {
            registry,
            ready_queue,
            batch: Mutex::new(()),
        }
    }

    /// Admits every pending process with `arrival_time <= time` and returns how many moved.
    pub fn admit(&self, time: i32) -> Result<usize, SimulationError> {
        let _batch = self
            .batch
            .lock()
            .map_err(|_| SimulationError::LockPoisoned("admission"))?;
        let admitted = self.registry.admit_up_to(time)?;
        let count = admitted.len();
        for process in admitted {
            debug!(
                "admit {} (arrival {}, burst {}) at {}",
                process.name(),
                process.arrival_time(),
                process.burst_time(),
                time
            );
            self.ready_queue.push(process)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;

    fn create_registry() -> MasterRegistry {
        MasterRegistry::new(vec![
            ProcessRecord::new(0, "P1", 0, 10),
            ProcessRecord::new(1, "P2", 1, 5),
            ProcessRecord::new(2, "P3", 6, 8),
        ])
    }

    #[test]
    fn test_admission_controller_admit_normal() {
        let registry = create_registry();
        let ready_queue = ReadyQueue::new();
        let admission = AdmissionController::new(&registry, &ready_queue);

        assert_eq!(admission.admit(1).unwrap(), 2);
        assert_eq!(ready_queue.len().unwrap(), 2);
        assert_eq!(registry.remaining().unwrap(), 1);
        assert_eq!(ready_queue.pop_min().unwrap().unwrap().name(), "P2");
    }

    #[test]
    fn test_admission_controller_admit_is_idempotent_for_same_time() {
        let registry = create_registry();
        let ready_queue = ReadyQueue::new();
        let admission = AdmissionController::new(&registry, &ready_queue);

        assert_eq!(admission.admit(5).unwrap(), 2);
        assert_eq!(admission.admit(5).unwrap(), 0);
        assert_eq!(ready_queue.len().unwrap(), 2);
    }

    #[test]
    fn test_admission_controller_admit_before_first_arrival() {
        let registry = MasterRegistry::new(vec![ProcessRecord::new(0, "P1", 3, 1)]);
        let ready_queue = ReadyQueue::new();
        let admission = AdmissionController::new(&registry, &ready_queue);

        assert_eq!(admission.admit(2).unwrap(), 0);
        assert!(ready_queue.is_empty().unwrap());
        assert_eq!(admission.admit(3).unwrap(), 1);
    }
}
