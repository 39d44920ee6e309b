use lib::output_log::append_info_to_yaml;
use lib::scheduler_log::SchedulerLog;
use log::warn;
use serde_derive::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Serialize, Deserialize)]
struct ResultInfo {
    algorithm: String,
    number_of_processes: usize,
    result: bool,
}

/// `result` holds when every process ran exactly once and its times add up.
pub fn dump_sjf_result_to_file(file_path: &str, scheduler_log: &SchedulerLog) {
    let result = scheduler_log
        .process_logs
        .iter()
        .enumerate()
        .all(|(process_id, log)| {
            log.process_id == process_id
                && log.waiting_time >= 0
                && log.turnaround_time == log.waiting_time + log.burst_time
        });
    let result_info = ResultInfo {
        algorithm: "non_preemptive_sjf".to_owned(),
        number_of_processes: scheduler_log.process_logs.len(),
        result,
    };
    match serde_yaml::to_string(&result_info) {
        Ok(yaml) => append_info_to_yaml(file_path, &yaml),
        Err(err) => warn!("Failed to serialize sjf result to YAML: {}", err),
    }
}

/// One line per process in input order, then the two averages.
pub fn format_schedule_report(scheduler_log: &SchedulerLog) -> String {
    let mut report = String::new();
    for log in &scheduler_log.process_logs {
        let _ = writeln!(
            report,
            "Process: {} Arrival: {} Burst: {} CPU: {} Waiting Time: {} Turnaround Time: {}",
            log.name,
            log.arrival_time,
            log.burst_time,
            log.core_id,
            log.waiting_time,
            log.turnaround_time
        );
    }
    let _ = writeln!(
        report,
        "Average waiting time = {:.2}",
        scheduler_log.average_waiting_time
    );
    let _ = writeln!(
        report,
        "Average turnaround time = {:.2}",
        scheduler_log.average_turnaround_time
    );
    report
}
