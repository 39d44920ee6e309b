use crate::{
    admission::AdmissionController, master_registry::MasterRegistry, ready_queue::ReadyQueue,
    scheduler_log::ProcessLogCollector, virtual_clock::VirtualClock,
};

pub const DEFAULT_NUMBER_OF_CORES: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub number_of_cores: usize,
    /// Selection attempts allowed per core. `None` derives a bound from the number of processes.
    pub max_iterations: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            number_of_cores: DEFAULT_NUMBER_OF_CORES,
            max_iterations: None,
        }
    }
}

impl SchedulerConfig {
    /// Each core pops at most every process once and idle-advances at most once per arrival.
    pub fn iteration_limit(&self, number_of_processes: usize) -> usize {
        self.max_iterations.unwrap_or(2 * number_of_processes + 2)
    }
}

/// Shared state every core worker borrows for one run.
pub struct SchedulingContext<'a> {
    pub registry: &'a MasterRegistry,
    pub ready_queue: &'a ReadyQueue,
    pub clock: &'a VirtualClock,
    pub admission: &'a AdmissionController<'a>,
    pub results: &'a ProcessLogCollector,
    pub iteration_limit: usize,
}
