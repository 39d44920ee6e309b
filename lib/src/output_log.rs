use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Truncates (or creates) `<folder_path>/<file_name>.yaml`, making the folder when needed.
///
/// Failures are only logged; the path is returned either way.
pub fn create_yaml_file(folder_path: &str, file_name: &str) -> String {
    if let Err(err) = fs::create_dir_all(folder_path) {
        warn!("Cannot create output folder {}: {}", folder_path, err);
    }
    let file_path = Path::new(folder_path).join(format!("{}.yaml", file_name));
    match fs::File::create(&file_path) {
        Ok(_) => debug!("log file ready: {}", file_path.display()),
        Err(err) => warn!("Cannot create {}: {}", file_path.display(), err),
    }
    file_path.to_string_lossy().into_owned()
}

/// Creates `<dir_path>/<date>-<alg_name>-log.yaml` and returns its path.
pub fn create_scheduler_log_yaml_file(dir_path: &str, alg_name: &str) -> String {
    let now: DateTime<Utc> = Utc::now();
    let file_name = format!("{}-{}-log", now.format("%Y-%m-%d-%H-%M-%S"), alg_name);
    create_yaml_file(dir_path, &file_name)
}

/// Appends one serialized YAML section to the log file.
pub fn append_info_to_yaml(file_path: &str, info: &str) {
    let appended = OpenOptions::new()
        .append(true)
        .create(true)
        .open(file_path)
        .and_then(|mut file| file.write_all(info.as_bytes()));
    if let Err(err) = appended {
        warn!("Cannot append to {}: {}", file_path, err);
    }
}
