//! Per-core logical clocks and the selection turn between cores
use std::sync::{Condvar, Mutex, MutexGuard};

use log::debug;

use crate::error::SimulationError;

struct ClockState {
    now: Vec<i32>,
    terminated: Vec<bool>,
}

impl ClockState {
    /// A core holds the selection turn while its (now, core_id) is the smallest among live cores.
    fn is_turn_of(&self, core_id: usize) -> bool {
        (0..self.now.len())
            .filter(|&other| other != core_id && !self.terminated[other])
            .all(|other| (self.now[core_id], core_id) < (self.now[other], other))
    }

    fn global_now(&self) -> i32 {
        let live_min = (0..self.now.len())
            .filter(|&core_id| !self.terminated[core_id])
            .map(|core_id| self.now[core_id])
            .min();
        live_min.unwrap_or_else(|| self.now.iter().copied().max().unwrap_or_default())
    }
}

/// One monotonic counter per core.
///
/// A core only ever moves its own counter. Every change wakes the cores waiting for their
/// selection turn.
pub struct VirtualClock {
    state: Mutex<ClockState>,
    turn_changed: Condvar,
}

impl VirtualClock {
    pub fn new(num_cores: usize, start_time: i32) -> Self {
        Self {
            state: Mutex::new(ClockState {
                now: vec![start_time; num_cores],
                terminated: vec![false; num_cores],
            }),
            turn_changed: Condvar::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClockState>, SimulationError> {
        self.state
            .lock()
            .map_err(|_| SimulationError::LockPoisoned("virtual clock"))
    }

    pub fn get_number_of_cores(&self) -> Result<usize, SimulationError> {
        Ok(self.lock()?.now.len())
    }

    pub fn now(&self, core_id: usize) -> Result<i32, SimulationError> {
        Ok(self.lock()?.now[core_id])
    }

    /// Minimum clock over the cores that have not terminated.
    pub fn global_now(&self) -> Result<i32, SimulationError> {
        Ok(self.lock()?.global_now())
    }

    /// Moves the clock of `core_id` forward to `time`. Returns false if it was already there or later.
    pub fn advance_to(&self, core_id: usize, time: i32) -> Result<bool, SimulationError> {
        let mut state = self.lock()?;
        if state.now[core_id] >= time {
            return Ok(false);
        }
        state.now[core_id] = time;
        drop(state);
        self.turn_changed.notify_all();
        Ok(true)
    }

    /// Blocks until `core_id` holds the selection turn and returns its clock.
    pub fn wait_for_turn(&self, core_id: usize) -> Result<i32, SimulationError> {
        let state = self.lock()?;
        let state = self
            .turn_changed
            .wait_while(state, |state| !state.is_turn_of(core_id))
            .map_err(|_| SimulationError::LockPoisoned("virtual clock"))?;
        Ok(state.now[core_id])
    }

    /// Removes `core_id` from turn arbitration. Idempotent.
    pub fn terminate(&self, core_id: usize) {
        // Also called while unwinding, so a poisoned lock is still taken.
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !state.terminated[core_id] {
            state.terminated[core_id] = true;
            debug!("core {} terminated at {}", core_id, state.now[core_id]);
        }
        drop(state);
        self.turn_changed.notify_all();
    }

    pub fn is_terminated(&self, core_id: usize) -> Result<bool, SimulationError> {
        Ok(self.lock()?.terminated[core_id])
    }

    pub fn snapshot(&self) -> Result<Vec<i32>, SimulationError> {
        Ok(self.lock()?.now.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_virtual_clock_new() {
        let clock = VirtualClock::new(2, 3);
        assert_eq!(clock.get_number_of_cores().unwrap(), 2);
        assert_eq!(clock.snapshot().unwrap(), vec![3, 3]);
        assert_eq!(clock.global_now().unwrap(), 3);
    }

    #[test]
    fn test_virtual_clock_advance_to_is_monotonic() {
        let clock = VirtualClock::new(2, 0);
        assert!(clock.advance_to(1, 5).unwrap());
        assert!(!clock.advance_to(1, 5).unwrap());
        assert!(!clock.advance_to(1, 2).unwrap());
        assert_eq!(clock.now(1).unwrap(), 5);
        assert_eq!(clock.now(0).unwrap(), 0);
    }

    #[test]
    fn test_virtual_clock_global_now_ignores_terminated_cores() {
        let clock = VirtualClock::new(2, 0);
        clock.advance_to(0, 7).unwrap();
        assert_eq!(clock.global_now().unwrap(), 0);
        clock.terminate(1);
        assert!(clock.is_terminated(1).unwrap());
        assert_eq!(clock.global_now().unwrap(), 7);
        clock.terminate(0);
        assert_eq!(clock.global_now().unwrap(), 7);
    }

    #[test]
    fn test_virtual_clock_turn_goes_to_earliest_core_then_lowest_id() {
        let clock = VirtualClock::new(2, 0);
        assert_eq!(clock.wait_for_turn(0).unwrap(), 0);
        clock.advance_to(0, 3).unwrap();
        assert_eq!(clock.wait_for_turn(1).unwrap(), 0);
        clock.advance_to(1, 3).unwrap();
        assert_eq!(clock.wait_for_turn(0).unwrap(), 3);
    }

    #[test]
    fn test_virtual_clock_wait_for_turn_blocks_until_sibling_moves() {
        let clock = Arc::new(VirtualClock::new(2, 0));
        clock.advance_to(1, 4).unwrap();

        let waiter = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || clock.wait_for_turn(1).unwrap())
        };

        thread::sleep(Duration::from_millis(20));
        clock.advance_to(0, 2).unwrap();
        clock.advance_to(0, 5).unwrap();
        assert_eq!(waiter.join().unwrap(), 4);
    }

    #[test]
    fn test_virtual_clock_terminate_releases_waiting_sibling() {
        let clock = Arc::new(VirtualClock::new(2, 0));
        clock.advance_to(1, 100).unwrap();

        let waiter = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || clock.wait_for_turn(1).unwrap())
        };

        clock.terminate(0);
        assert_eq!(waiter.join().unwrap(), 100);
    }
}
