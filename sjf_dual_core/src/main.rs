mod outputs_result;

use clap::Parser;
use lib::error::SimulationError;
use lib::output_log::create_scheduler_log_yaml_file;
use lib::process_creator::{create_default_process_table, create_process_table_from_yaml};
use lib::scheduler::{SchedulerConfig, DEFAULT_NUMBER_OF_CORES};
use lib::sjf_scheduler::ShortestJobFirstScheduler;
use log::{error, info};
use outputs_result::{dump_sjf_result_to_file, format_schedule_report};

#[derive(Parser)]
#[clap(
    name = "SJF_Dual_Core",
    version = "1.0",
    about = "About:
    Non-preemptive shortest-job-first scheduling on a homogeneous multi-core processor.
    Each core keeps its own logical clock; the core whose clock is earliest picks the
    ready process with the shortest burst time.
    Without a process file the built-in five-process table is used."
)]
struct ArgParser {
    ///Path to the process table (YAML).
    #[clap(short = 'f', long = "process_file_path")]
    process_file_path: Option<String>,
    ///Number of processing cores.
    #[clap(short = 'c', long = "number_of_cores", default_value_t = DEFAULT_NUMBER_OF_CORES)]
    number_of_cores: usize,
    ///Path to output directory.
    #[clap(short = 'o', long = "output_dir_path", default_value = "../outputs")]
    output_dir_path: String,
    ///Selection attempts allowed per core before the run is aborted.
    #[clap(short = 'm', long = "max_iterations")]
    max_iterations: Option<usize>,
    ///Do not write the YAML scheduler log.
    #[clap(long = "no_yaml")]
    no_yaml: bool,
}

fn run(arg: &ArgParser) -> Result<(), SimulationError> {
    let processes = match &arg.process_file_path {
        Some(file_path) => create_process_table_from_yaml(file_path)?,
        None => create_default_process_table()?,
    };
    info!("loaded {} processes", processes.len());

    let config = SchedulerConfig {
        number_of_cores: arg.number_of_cores,
        max_iterations: arg.max_iterations,
    };
    let scheduler_log = ShortestJobFirstScheduler::new(&processes, config).schedule()?;

    print!("{}", format_schedule_report(&scheduler_log));

    if !arg.no_yaml {
        let file_path = create_scheduler_log_yaml_file(&arg.output_dir_path, "sjf");
        dump_sjf_result_to_file(&file_path, &scheduler_log);
        scheduler_log.dump_log_to_yaml(&file_path);
        info!("scheduler log written to {}", file_path);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let arg: ArgParser = ArgParser::parse();
    if let Err(err) = run(&arg) {
        error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
