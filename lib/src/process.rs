//! This module contains the definition of the process record and the heap orderings built on it
use getset::{CopyGetters, Getters};
use std::cmp::Ordering;

/// Immutable inputs of one process. Outputs are written into a `ProcessLog` by the core that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ProcessRecord {
    #[getset(get_copy = "pub")]
    index: usize,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    arrival_time: i32,
    #[getset(get_copy = "pub")]
    burst_time: i32,
}

impl ProcessRecord {
    pub fn new(index: usize, name: impl Into<String>, arrival_time: i32, burst_time: i32) -> Self {
        Self {
            index,
            name: name.into(),
            arrival_time,
            burst_time,
        }
    }
}

/// Heap entry popping the earliest arrival first (index breaks ties).
///
/// `BinaryHeap` is a max-heap, so the comparison is reversed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ArrivalOrdered(pub ProcessRecord);

impl Ord for ArrivalOrdered {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .arrival_time
            .cmp(&self.0.arrival_time)
            .then_with(|| other.0.index.cmp(&self.0.index))
    }
}

impl PartialOrd for ArrivalOrdered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Heap entry popping the shortest burst first, then the earliest arrival, then the lowest index.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BurstOrdered(pub ProcessRecord);

impl Ord for BurstOrdered {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .burst_time
            .cmp(&self.0.burst_time)
            .then_with(|| other.0.arrival_time.cmp(&self.0.arrival_time))
            .then_with(|| other.0.index.cmp(&self.0.index))
    }
}

impl PartialOrd for BurstOrdered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
