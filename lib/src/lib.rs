pub mod admission;
pub mod core;
pub mod error;
pub mod homogeneous;
pub mod master_registry;
pub mod output_log;
pub mod process;
pub mod process_creator;
pub mod ready_queue;
pub mod scheduler;
pub mod scheduler_log;
pub mod sjf_scheduler;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod util;
pub mod virtual_clock;
