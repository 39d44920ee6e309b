use serde_derive::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::{error::SimulationError, output_log::append_info_to_yaml, process::ProcessRecord};
use log::warn;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessorInfo {
    pub number_of_cores: usize,
}

/// Outcome of one process, written once by the core that executed it.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessLog {
    pub process_id: usize,
    pub name: String,
    pub arrival_time: i32,
    pub burst_time: i32,
    pub core_id: usize,
    pub start_time: i32,
    pub finish_time: i32,
    pub waiting_time: i32,
    pub turnaround_time: i32,
}

impl ProcessLog {
    pub fn new(process: &ProcessRecord, core_id: usize, start_time: i32, finish_time: i32) -> Self {
        Self {
            process_id: process.index(),
            name: process.name().clone(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            core_id,
            start_time,
            finish_time,
            waiting_time: start_time - process.arrival_time(),
            turnaround_time: finish_time - process.arrival_time(),
        }
    }
}

/// One write-once slot per process index.
///
/// Cores never share a slot, so publishing needs no lock; a second write to the same slot means
/// a process ran twice.
pub struct ProcessLogCollector {
    slots: Vec<OnceLock<ProcessLog>>,
}

impl ProcessLogCollector {
    pub fn new(number_of_processes: usize) -> Self {
        Self {
            slots: (0..number_of_processes).map(|_| OnceLock::new()).collect(),
        }
    }

    pub fn publish(&self, process_log: ProcessLog) -> Result<(), SimulationError> {
        let process_id = process_log.process_id;
        let second_core_id = process_log.core_id;
        self.slots[process_id].set(process_log).map_err(|_| {
            let first_core_id = self.slots[process_id]
                .get()
                .map(|existing| existing.core_id)
                .unwrap_or(second_core_id);
            SimulationError::DuplicateCompletion {
                process_id,
                first_core_id,
                second_core_id,
            }
        })
    }

    pub fn into_process_logs(self) -> Result<Vec<ProcessLog>, SimulationError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(process_id, slot)| {
                slot.into_inner()
                    .ok_or(SimulationError::MissingCompletion(process_id))
            })
            .collect()
    }
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreLog {
    pub core_id: usize,
    pub total_proc_time: i32,
    pub final_time: i32,
    pub utilization: f32,
}

impl CoreLog {
    pub fn new(core_id: usize) -> Self {
        Self {
            core_id,
            total_proc_time: Default::default(),
            final_time: Default::default(),
            utilization: Default::default(),
        }
    }

    pub fn calculate_utilization(&mut self, schedule_length: i32) {
        self.utilization = if schedule_length > 0 {
            self.total_proc_time as f32 / schedule_length as f32
        } else {
            0.0
        };
    }
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessorLog {
    pub average_utilization: f32,
    pub variance_utilization: f32,
    pub core_logs: Vec<CoreLog>,
}

impl ProcessorLog {
    pub fn calculate_average_utilization(&mut self) {
        self.average_utilization = self
            .core_logs
            .iter()
            .map(|core_log| core_log.utilization)
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_variance_utilization(&mut self) {
        self.variance_utilization = self
            .core_logs
            .iter()
            .map(|core_log| (core_log.utilization - self.average_utilization).powi(2))
            .sum::<f32>()
            / self.core_logs.len() as f32;
    }

    pub fn calculate_cores_utilization(&mut self, schedule_length: i32) {
        for core_log in self.core_logs.iter_mut() {
            core_log.calculate_utilization(schedule_length);
        }
    }
}

/// Everything one scheduling run reports.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerLog {
    pub processor_info: ProcessorInfo,
    pub process_logs: Vec<ProcessLog>,
    pub processor_log: ProcessorLog,
    pub schedule_length: i32,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl SchedulerLog {
    pub fn new(process_logs: Vec<ProcessLog>, core_logs: Vec<CoreLog>) -> Self {
        let number_of_cores = core_logs.len();
        let schedule_length = process_logs
            .iter()
            .map(|process_log| process_log.finish_time)
            .max()
            .unwrap_or_default();

        let mut processor_log = ProcessorLog {
            core_logs,
            ..Default::default()
        };
        processor_log.calculate_cores_utilization(schedule_length);
        processor_log.calculate_average_utilization();
        processor_log.calculate_variance_utilization();

        let average_waiting_time = average(process_logs.iter().map(|log| log.waiting_time));
        let average_turnaround_time = average(process_logs.iter().map(|log| log.turnaround_time));

        Self {
            processor_info: ProcessorInfo { number_of_cores },
            process_logs,
            processor_log,
            schedule_length,
            average_waiting_time,
            average_turnaround_time,
        }
    }

    pub fn dump_log_to_yaml(&self, file_path: &str) {
        match serde_yaml::to_string(self) {
            Ok(yaml) => append_info_to_yaml(file_path, &yaml),
            Err(err) => warn!("Failed to serialize SchedulerLog to YAML: {}", err),
        }
    }
}

fn average(values: impl Iterator<Item = i32>) -> f64 {
    let (sum, count) = values.fold((0i64, 0usize), |(sum, count), value| {
        (sum + value as i64, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_log::create_yaml_file;
    use std::fs::remove_file;

    fn create_process_log(process_id: usize, core_id: usize, start: i32, finish: i32) -> ProcessLog {
        let process = ProcessRecord::new(process_id, format!("P{}", process_id + 1), 0, finish - start);
        ProcessLog::new(&process, core_id, start, finish)
    }

    #[test]
    fn test_process_log_new_computes_times() {
        let process = ProcessRecord::new(2, "P3", 2, 8);
        let process_log = ProcessLog::new(&process, 0, 10, 18);
        assert_eq!(process_log.waiting_time, 8);
        assert_eq!(process_log.turnaround_time, 16);
        assert_eq!(process_log.turnaround_time, process_log.waiting_time + process_log.burst_time);
    }

    #[test]
    fn test_process_log_collector_publish_normal() {
        let collector = ProcessLogCollector::new(2);
        collector.publish(create_process_log(1, 1, 0, 5)).unwrap();
        collector.publish(create_process_log(0, 0, 0, 3)).unwrap();

        let process_logs = collector.into_process_logs().unwrap();
        assert_eq!(process_logs[0].process_id, 0);
        assert_eq!(process_logs[1].core_id, 1);
    }

    #[test]
    fn test_process_log_collector_publish_twice() {
        let collector = ProcessLogCollector::new(1);
        collector.publish(create_process_log(0, 0, 0, 3)).unwrap();
        assert_eq!(
            collector.publish(create_process_log(0, 1, 0, 3)),
            Err(SimulationError::DuplicateCompletion {
                process_id: 0,
                first_core_id: 0,
                second_core_id: 1,
            })
        );
    }

    #[test]
    fn test_process_log_collector_missing_completion() {
        let collector = ProcessLogCollector::new(2);
        collector.publish(create_process_log(0, 0, 0, 3)).unwrap();
        assert_eq!(
            collector.into_process_logs(),
            Err(SimulationError::MissingCompletion(1))
        );
    }

    #[test]
    fn test_scheduler_log_new_averages_and_utilization() {
        let process_logs = vec![create_process_log(0, 0, 0, 4), create_process_log(1, 1, 0, 2)];
        let mut core_logs = vec![CoreLog::new(0), CoreLog::new(1)];
        core_logs[0].total_proc_time = 4;
        core_logs[1].total_proc_time = 2;

        let scheduler_log = SchedulerLog::new(process_logs, core_logs);
        assert_eq!(scheduler_log.processor_info.number_of_cores, 2);
        assert_eq!(scheduler_log.schedule_length, 4);
        assert_eq!(scheduler_log.average_waiting_time, 0.0);
        assert_eq!(scheduler_log.average_turnaround_time, 3.0);
        assert_eq!(scheduler_log.processor_log.core_logs[0].utilization, 1.0);
        assert_eq!(scheduler_log.processor_log.core_logs[1].utilization, 0.5);
        assert_eq!(scheduler_log.processor_log.average_utilization, 0.75);
        assert_eq!(scheduler_log.processor_log.variance_utilization, 0.0625);
    }

    #[test]
    fn test_scheduler_log_new_averages_keep_precision_for_long_runs() {
        let process_logs = vec![
            create_process_log(0, 0, 0, 123_456_789),
            create_process_log(1, 1, 0, 123_456_790),
            create_process_log(2, 1, 0, 123_456_790),
        ];
        let scheduler_log = SchedulerLog::new(process_logs, vec![CoreLog::new(0), CoreLog::new(1)]);
        assert_eq!(
            format!("{:.2}", scheduler_log.average_turnaround_time),
            "123456789.67"
        );
    }

    #[test]
    fn test_dump_log_to_yaml_normal() {
        let process_logs = vec![create_process_log(0, 0, 0, 4)];
        let scheduler_log = SchedulerLog::new(process_logs, vec![CoreLog::new(0)]);

        let file_path = create_yaml_file("../outputs", "test_dump_log_to_yaml_normal");
        scheduler_log.dump_log_to_yaml(&file_path);

        let file_contents = std::fs::read_to_string(&file_path).unwrap();
        let loaded: SchedulerLog = serde_yaml::from_str(&file_contents).unwrap();
        assert_eq!(loaded.process_logs, scheduler_log.process_logs);
        assert_eq!(loaded.schedule_length, 4);
        remove_file(file_path).unwrap();
    }
}
