use std::thread;

use log::info;

use crate::{
    core::CoreWorker, error::SimulationError, scheduler::SchedulingContext,
    scheduler_log::CoreLog,
};

/// A set of identical cores, each driven by its own thread.
pub struct HomogeneousProcessor {
    num_cores: usize,
}

impl HomogeneousProcessor {
    pub fn new(num_cores: usize) -> Self {
        Self { num_cores }
    }

    pub fn get_number_of_cores(&self) -> usize {
        self.num_cores
    }

    /// Runs one `CoreWorker` per core concurrently and waits for all of them.
    ///
    /// Returns the core logs ordered by core id, or the first error in core id order.
    pub fn run(&self, context: &SchedulingContext<'_>) -> Result<Vec<CoreLog>, SimulationError> {
        let results: Vec<Result<CoreLog, SimulationError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.num_cores)
                .map(|core_id| {
                    let worker = CoreWorker::new(core_id, context);
                    let handle = thread::Builder::new()
                        .name(format!("core-{}", core_id))
                        .spawn_scoped(scope, move || worker.run());
                    if handle.is_err() {
                        context.clock.terminate(core_id);
                    }
                    handle
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(core_id, handle)| match handle {
                    Ok(handle) => handle
                        .join()
                        .unwrap_or(Err(SimulationError::WorkerPanicked(core_id))),
                    Err(_) => Err(SimulationError::WorkerSpawnFailed(core_id)),
                })
                .collect()
        });

        let core_logs = results.into_iter().collect::<Result<Vec<CoreLog>, _>>()?;
        for core_log in &core_logs {
            info!(
                "core {} busy for {} units, clock ended at {}",
                core_log.core_id, core_log.total_proc_time, core_log.final_time
            );
        }
        Ok(core_logs)
    }
}
