//! Error types shared by the process loader and the scheduling engine
use thiserror::Error;

/// Rejected input, detected before any core starts.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InputValidationError {
    #[error("The process table is empty")]
    EmptyProcessTable,

    #[error("Process {name} has a negative arrival_time: {arrival_time}")]
    NegativeArrivalTime { name: String, arrival_time: i32 },

    #[error("Process {name} has a non-positive burst_time: {burst_time}")]
    NonPositiveBurstTime { name: String, burst_time: i32 },

    #[error("The number of cores must be at least 1")]
    NoCores,

    #[error("Process {name} is at position {position} but carries index {index}")]
    IndexOutOfOrder {
        name: String,
        position: usize,
        index: usize,
    },

    #[error("The schedule could run past the largest representable time ({bound} units needed)")]
    ScheduleLengthOverflow { bound: i64 },

    #[error("Malformed process file {file_path}: {reason}")]
    MalformedProcessFile { file_path: String, reason: String },
}

/// Failures of a scheduling run.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InputValidation(#[from] InputValidationError),

    #[error("The {0} lock was poisoned")]
    LockPoisoned(&'static str),

    #[error("Process {process_id} completed twice (core {first_core_id} and core {second_core_id})")]
    DuplicateCompletion {
        process_id: usize,
        first_core_id: usize,
        second_core_id: usize,
    },

    #[error("Process {0} never completed")]
    MissingCompletion(usize),

    #[error("Core {core_id} could not advance its clock beyond {time}")]
    StalledClock { core_id: usize, time: i32 },

    #[error("Core {core_id} exceeded the iteration limit of {limit}")]
    IterationLimitExceeded { core_id: usize, limit: usize },

    #[error("The worker thread of core {0} could not be spawned")]
    WorkerSpawnFailed(usize),

    #[error("The worker thread of core {0} panicked")]
    WorkerPanicked(usize),
}
