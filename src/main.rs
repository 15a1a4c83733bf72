use PyroKin::Utils::logger::init_logging;
use PyroKin::Utils::task_config::PyrolysisTask;
use PyroKin::cli::cli_main::run_interactive_menu;
use PyroKin::cli::cli_pyrolysis::run_task;
use PyroKin::error::PyrolysisError;
use std::process::ExitCode;

/// `PyroKin [task.json] [log level]`: runs the task file, or opens the menu without arguments
fn run() -> Result<(), PyrolysisError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    init_logging(args.get(1).map(String::as_str));
    match args.first() {
        Some(path) => {
            run_task(PyrolysisTask::from_file(path)?)?;
            Ok(())
        }
        None => run_interactive_menu(),
    }
}

pub fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
