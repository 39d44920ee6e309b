//! Builders shared by the unit tests of this crate and of the binaries
use crate::process::ProcessRecord;

/// Processes named `P1..Pn` from parallel arrival and burst lists.
pub fn create_processes(arrivals: &[i32], bursts: &[i32]) -> Vec<ProcessRecord> {
    assert_eq!(arrivals.len(), bursts.len());
    arrivals
        .iter()
        .zip(bursts)
        .enumerate()
        .map(|(i, (&arrival, &burst))| ProcessRecord::new(i, format!("P{}", i + 1), arrival, burst))
        .collect()
}
