use log::info;

use crate::{
    admission::AdmissionController,
    error::{InputValidationError, SimulationError},
    homogeneous::HomogeneousProcessor,
    master_registry::MasterRegistry,
    process::ProcessRecord,
    process_creator::validate_process_table,
    ready_queue::ReadyQueue,
    scheduler::{SchedulerConfig, SchedulingContext},
    scheduler_log::{ProcessLogCollector, SchedulerLog},
    virtual_clock::VirtualClock,
};

#[derive(Clone, Debug)]
pub struct ShortestJobFirstScheduler {
    pub processes: Vec<ProcessRecord>,
    pub config: SchedulerConfig,
}

impl ShortestJobFirstScheduler {
    pub fn new(processes: &[ProcessRecord], config: SchedulerConfig) -> Self {
        Self {
            processes: processes.to_vec(),
            config,
        }
    }

    /// Simulates non-preemptive shortest-job-first scheduling on a homogeneous processor.
    ///
    /// # Returns
    ///
    /// * A `SchedulerLog` holding one `ProcessLog` per process (in input order), one `CoreLog`
    ///   per core, and the average waiting and turnaround times.
    ///
    /// # Description
    ///
    /// Every core owns a logical clock and runs the same loop on its own thread:
    ///
    /// 1. Wait until its clock is the earliest among running cores (core id breaks ties).
    /// 2. Admit every process that has arrived by its clock and pop the shortest ready burst.
    /// 3. If nothing is ready but processes are still to arrive, move its own clock to the next
    ///    arrival and go back to 1. If nothing is left at all, stop.
    /// 4. Run the process one time unit at a time, admitting arrivals after each unit so the
    ///    other cores see them, then record waiting and turnaround time.
    ///
    /// Because selections happen in clock order the result never depends on thread timing.
    ///
    /// # Example
    ///
    /// Refer to the examples in the tests code.
    ///
    pub fn schedule(&self) -> Result<SchedulerLog, SimulationError> {
        if self.config.number_of_cores == 0 {
            return Err(InputValidationError::NoCores.into());
        }
        validate_process_table(&self.processes)?;

        let registry = MasterRegistry::new(self.processes.iter().cloned());
        let ready_queue = ReadyQueue::new();
        let first_arrival = registry
            .earliest_arrival()?
            .ok_or(InputValidationError::EmptyProcessTable)?;
        let clock = VirtualClock::new(self.config.number_of_cores, first_arrival);
        let admission = AdmissionController::new(&registry, &ready_queue);
        admission.admit(first_arrival)?;
        let results = ProcessLogCollector::new(self.processes.len());

        info!(
            "scheduling {} processes on {} cores from time {}",
            self.processes.len(),
            self.config.number_of_cores,
            first_arrival
        );

        let context = SchedulingContext {
            registry: &registry,
            ready_queue: &ready_queue,
            clock: &clock,
            admission: &admission,
            results: &results,
            iteration_limit: self.config.iteration_limit(self.processes.len()),
        };
        let core_logs = HomogeneousProcessor::new(self.config.number_of_cores).run(&context)?;

        let scheduler_log = SchedulerLog::new(results.into_process_logs()?, core_logs);
        info!(
            "schedule length {}, average waiting time {:.2}, average turnaround time {:.2}",
            scheduler_log.schedule_length,
            scheduler_log.average_waiting_time,
            scheduler_log.average_turnaround_time
        );
        Ok(scheduler_log)
    }
}
