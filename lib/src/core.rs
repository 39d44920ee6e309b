//! This module contains the core worker and the states it moves through
use std::thread;

use log::debug;

use crate::{
    error::SimulationError,
    process::ProcessRecord,
    scheduler::SchedulingContext,
    scheduler_log::{CoreLog, ProcessLog},
    virtual_clock::VirtualClock,
};

///Selecting -> Executing -> Completing -> Selecting ... -> Terminated
#[derive(Debug, PartialEq, Clone)]
pub enum CoreState {
    Selecting,
    Executing(ProcessRecord),
    Completing(ProcessLog),
    Terminated,
}

// Releases the selection turn however the worker exits, so a sibling never waits on a dead core.
struct TerminateOnDrop<'a> {
    clock: &'a VirtualClock,
    core_id: usize,
}

impl Drop for TerminateOnDrop<'_> {
    fn drop(&mut self) {
        self.clock.terminate(self.core_id);
    }
}

/// Scheduling loop of one core. Every core runs the same code; only `core_id` differs.
pub struct CoreWorker<'a> {
    core_id: usize,
    context: &'a SchedulingContext<'a>,
    core_log: CoreLog,
    iterations: usize,
}

impl<'a> CoreWorker<'a> {
    pub fn new(core_id: usize, context: &'a SchedulingContext<'a>) -> Self {
        Self {
            core_id,
            context,
            core_log: CoreLog::new(core_id),
            iterations: 0,
        }
    }

    pub fn core_id(&self) -> usize {
        self.core_id
    }

    /// Runs the state machine until the registry and the ready queue are both empty.
    pub fn run(mut self) -> Result<CoreLog, SimulationError> {
        let _terminate_on_exit = TerminateOnDrop {
            clock: self.context.clock,
            core_id: self.core_id,
        };
        let mut state = CoreState::Selecting;
        while state != CoreState::Terminated {
            state = self.step(state)?;
        }
        self.core_log.final_time = self.context.clock.now(self.core_id)?;
        Ok(self.core_log)
    }

    pub fn step(&mut self, state: CoreState) -> Result<CoreState, SimulationError> {
        match state {
            CoreState::Selecting => self.select(),
            CoreState::Executing(process) => self.execute(process),
            CoreState::Completing(process_log) => self.complete(process_log),
            CoreState::Terminated => Ok(CoreState::Terminated),
        }
    }

    fn select(&mut self) -> Result<CoreState, SimulationError> {
        self.iterations += 1;
        if self.iterations > self.context.iteration_limit {
            return Err(SimulationError::IterationLimitExceeded {
                core_id: self.core_id,
                limit: self.context.iteration_limit,
            });
        }

        let now = self.context.clock.wait_for_turn(self.core_id)?;
        self.context.admission.admit(now)?;
        if let Some(process) = self.context.ready_queue.pop_min()? {
            return Ok(CoreState::Executing(process));
        }

        match self.context.registry.earliest_arrival()? {
            Some(next_arrival) => {
                // Everything up to `now` was just admitted, so the next arrival lies ahead.
                if !self.context.clock.advance_to(self.core_id, next_arrival)? {
                    return Err(SimulationError::StalledClock {
                        core_id: self.core_id,
                        time: now,
                    });
                }
                debug!(
                    "core {} idle from {} to {}",
                    self.core_id, now, next_arrival
                );
                Ok(CoreState::Selecting)
            }
            None => {
                self.context.clock.terminate(self.core_id);
                Ok(CoreState::Terminated)
            }
        }
    }

    fn execute(&mut self, process: ProcessRecord) -> Result<CoreState, SimulationError> {
        let clock = self.context.clock;
        let start_time = clock.now(self.core_id)?.max(process.arrival_time());
        clock.advance_to(self.core_id, start_time)?;
        debug!(
            "core {} starts {} at {} (burst {})",
            self.core_id,
            process.name(),
            start_time,
            process.burst_time()
        );

        // Run in slices that end at the next pending arrival so siblings still see it admitted
        // as soon as every live clock has reached it.
        let finish_time = start_time + process.burst_time();
        let mut now = start_time;
        while now < finish_time {
            let slice_end = match self.context.registry.earliest_arrival()? {
                Some(next_arrival) if next_arrival > now && next_arrival < finish_time => {
                    next_arrival
                }
                _ => finish_time,
            };
            clock.advance_to(self.core_id, slice_end)?;
            now = slice_end;
            self.context.admission.admit(clock.global_now()?)?;
            thread::yield_now();
        }

        self.core_log.total_proc_time += process.burst_time();
        Ok(CoreState::Completing(ProcessLog::new(
            &process,
            self.core_id,
            start_time,
            finish_time,
        )))
    }

    fn complete(&mut self, process_log: ProcessLog) -> Result<CoreState, SimulationError> {
        debug!(
            "core {} finished {} at {}",
            self.core_id, process_log.name, process_log.finish_time
        );
        self.context.results.publish(process_log)?;
        Ok(CoreState::Selecting)
    }
}
