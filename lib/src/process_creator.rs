//! Build a validated process table from tuples or a yaml file
use crate::error::InputValidationError;
use crate::process::ProcessRecord;
use crate::util::load_yaml;

use yaml_rust::Yaml;

const DEFAULT_PROCESS_TABLE: [(&str, i32, i32); 5] = [
    ("P1", 0, 10),
    ("P2", 1, 5),
    ("P3", 2, 8),
    ("P4", 3, 6),
    ("P5", 4, 3),
];

/// Checks the table before any core starts.
///
/// Indices must equal table positions, and the latest arrival plus every burst must still fit
/// in an `i32` clock.
pub fn validate_process_table(processes: &[ProcessRecord]) -> Result<(), InputValidationError> {
    if processes.is_empty() {
        return Err(InputValidationError::EmptyProcessTable);
    }
    for (position, process) in processes.iter().enumerate() {
        if process.index() != position {
            return Err(InputValidationError::IndexOutOfOrder {
                name: process.name().clone(),
                position,
                index: process.index(),
            });
        }
        if process.arrival_time() < 0 {
            return Err(InputValidationError::NegativeArrivalTime {
                name: process.name().clone(),
                arrival_time: process.arrival_time(),
            });
        }
        if process.burst_time() <= 0 {
            return Err(InputValidationError::NonPositiveBurstTime {
                name: process.name().clone(),
                burst_time: process.burst_time(),
            });
        }
    }

    let latest_arrival = processes
        .iter()
        .map(|process| i64::from(process.arrival_time()))
        .max()
        .unwrap_or_default();
    let bound = processes
        .iter()
        .fold(latest_arrival, |bound, process| bound + i64::from(process.burst_time()));
    if bound > i64::from(i32::MAX) {
        return Err(InputValidationError::ScheduleLengthOverflow { bound });
    }
    Ok(())
}

/// Indexes `(name, arrival_time, burst_time)` entries in input order and validates them.
///
/// # Example
///
/// ```
/// use lib::process_creator::create_process_table;
///
/// let processes = create_process_table(vec![("P1", 0, 10), ("P2", 1, 5)]).unwrap();
/// assert_eq!(processes[1].index(), 1);
/// assert_eq!(processes[1].burst_time(), 5);
/// ```
pub fn create_process_table<S: Into<String>>(
    entries: impl IntoIterator<Item = (S, i32, i32)>,
) -> Result<Vec<ProcessRecord>, InputValidationError> {
    let processes: Vec<ProcessRecord> = entries
        .into_iter()
        .enumerate()
        .map(|(index, (name, arrival_time, burst_time))| {
            ProcessRecord::new(index, name, arrival_time, burst_time)
        })
        .collect();
    validate_process_table(&processes)?;
    Ok(processes)
}

/// The five-process table used when no process file is given.
pub fn create_default_process_table() -> Result<Vec<ProcessRecord>, InputValidationError> {
    create_process_table(DEFAULT_PROCESS_TABLE)
}

fn get_integer(entry: &Yaml, key: &str) -> Option<i32> {
    entry[key].as_i64().and_then(|value| i32::try_from(value).ok())
}

/// load yaml file and return a validated process table
///
/// # Arguments
///
/// *  `file_path` - yaml file path
///
/// # Returns
///
/// *  `processes` - process records in file order
///
/// # Example
///
/// ```
/// use lib::process_creator::create_process_table_from_yaml;
///
/// let processes = create_process_table_from_yaml("tests/sample_processes/assignment.yaml").unwrap();
/// let first_name = processes[0].name();
/// let first_burst = processes[0].burst_time();
/// ```
pub fn create_process_table_from_yaml(
    file_path: &str,
) -> Result<Vec<ProcessRecord>, InputValidationError> {
    let malformed = |reason: String| InputValidationError::MalformedProcessFile {
        file_path: file_path.to_owned(),
        reason,
    };
    let yaml_docs = load_yaml(file_path)?;
    let yaml_doc = yaml_docs
        .first()
        .ok_or_else(|| malformed("empty document".to_owned()))?;
    let entries = yaml_doc["processes"]
        .as_vec()
        .ok_or_else(|| malformed("missing `processes` list".to_owned()))?;

    let mut table = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let name = match &entry["name"] {
            Yaml::String(name) => name.clone(),
            Yaml::Integer(name) => name.to_string(),
            Yaml::BadValue => format!("P{}", i + 1),
            _ => return Err(malformed(format!("entry {} has an invalid name", i))),
        };
        let arrival_time = get_integer(entry, "arrival_time")
            .ok_or_else(|| malformed(format!("entry {} needs an integer arrival_time", i)))?;
        let burst_time = get_integer(entry, "burst_time")
            .ok_or_else(|| malformed(format!("entry {} needs an integer burst_time", i)))?;
        table.push((name, arrival_time, burst_time));
    }
    create_process_table(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_process_table() {
        let processes = create_default_process_table().unwrap();
        assert_eq!(processes.len(), 5);
        assert_eq!(processes[0].name(), "P1");
        assert_eq!(processes[4].arrival_time(), 4);
        assert_eq!(processes[4].burst_time(), 3);
    }

    #[test]
    fn test_create_process_table_empty() {
        let entries: Vec<(&str, i32, i32)> = Vec::new();
        assert_eq!(
            create_process_table(entries),
            Err(InputValidationError::EmptyProcessTable)
        );
    }

    #[test]
    fn test_create_process_table_zero_burst() {
        assert_eq!(
            create_process_table(vec![("P1", 0, 3), ("P2", 1, 0)]),
            Err(InputValidationError::NonPositiveBurstTime {
                name: "P2".to_owned(),
                burst_time: 0
            })
        );
    }

    #[test]
    fn test_create_process_table_negative_burst() {
        assert!(matches!(
            create_process_table(vec![("P1", 0, -4)]),
            Err(InputValidationError::NonPositiveBurstTime { .. })
        ));
    }

    #[test]
    fn test_create_process_table_negative_arrival() {
        assert_eq!(
            create_process_table(vec![("P1", -1, 3)]),
            Err(InputValidationError::NegativeArrivalTime {
                name: "P1".to_owned(),
                arrival_time: -1
            })
        );
    }

    #[test]
    fn test_validate_process_table_index_past_end() {
        let processes = vec![
            ProcessRecord::new(0, "P1", 0, 2),
            ProcessRecord::new(5, "P2", 0, 3),
        ];
        assert_eq!(
            validate_process_table(&processes),
            Err(InputValidationError::IndexOutOfOrder {
                name: "P2".to_owned(),
                position: 1,
                index: 5
            })
        );
    }

    #[test]
    fn test_validate_process_table_repeated_index() {
        let processes = vec![
            ProcessRecord::new(0, "P1", 0, 2),
            ProcessRecord::new(0, "P2", 0, 3),
        ];
        assert_eq!(
            validate_process_table(&processes),
            Err(InputValidationError::IndexOutOfOrder {
                name: "P2".to_owned(),
                position: 1,
                index: 0
            })
        );
    }

    #[test]
    fn test_validate_process_table_schedule_length_overflow() {
        assert_eq!(
            create_process_table(vec![("P1", i32::MAX - 1, 5)]),
            Err(InputValidationError::ScheduleLengthOverflow {
                bound: i64::from(i32::MAX) + 4
            })
        );
        assert_eq!(
            create_process_table(vec![("P1", 0, i32::MAX), ("P2", 0, 1)]),
            Err(InputValidationError::ScheduleLengthOverflow {
                bound: i64::from(i32::MAX) + 1
            })
        );
        assert!(create_process_table(vec![("P1", 1, i32::MAX - 1)]).is_ok());
    }

    #[test]
    fn test_create_process_table_from_yaml_normal() {
        let processes =
            create_process_table_from_yaml("tests/sample_processes/assignment.yaml").unwrap();
        assert_eq!(processes, create_default_process_table().unwrap());
    }

    #[test]
    fn test_create_process_table_from_yaml_unnamed_entries() {
        let processes =
            create_process_table_from_yaml("tests/sample_processes/idle_gap.yaml").unwrap();
        assert_eq!(processes.len(), 3);
        assert_eq!(processes[2].name(), "P3");
        assert_eq!(processes[2].arrival_time(), 20);
    }

    #[test]
    fn test_create_process_table_from_yaml_invalid_burst() {
        assert!(matches!(
            create_process_table_from_yaml("tests/sample_processes/invalid_burst.yaml"),
            Err(InputValidationError::NonPositiveBurstTime { .. })
        ));
    }

    #[test]
    fn test_create_process_table_from_yaml_empty_list() {
        assert_eq!(
            create_process_table_from_yaml("tests/sample_processes/empty.yaml"),
            Err(InputValidationError::EmptyProcessTable)
        );
    }

    #[test]
    fn test_create_process_table_from_yaml_float_time() {
        assert!(matches!(
            create_process_table_from_yaml("tests/sample_processes/float_time.yaml"),
            Err(InputValidationError::MalformedProcessFile { .. })
        ));
    }

    #[test]
    fn test_create_process_table_from_yaml_not_a_process_file() {
        assert!(matches!(
            create_process_table_from_yaml("tests/sample_processes/not_processes.yaml"),
            Err(InputValidationError::MalformedProcessFile { .. })
        ));
    }
}
