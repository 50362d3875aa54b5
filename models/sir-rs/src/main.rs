use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use runner::Environment;

use sir::{OutbreakError, logging::init_logging, parameters::ScenarioInput, run::run_scenario};

/// Simulates an SIR outbreak and forecasts infections with a linear trend.
///
/// The run document is read as JSON from stdin unless `--config` names a
/// TOML file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// TOML run document with `[input]` and `[output]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn run(args: &Args) -> Result<(), OutbreakError> {
    let env = match &args.config {
        Some(path) => Environment::from_toml_file(path)?.with_input_type::<ScenarioInput>()?,
        None => Environment::<ScenarioInput>::load()?,
    };
    run_scenario(&env, Local::now().date_naive())?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_level) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
