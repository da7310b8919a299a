use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::error;
use mandelbaker::{CliArgs, RunCliCommand};

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    match RunCliCommand::new(CliArgs::parse()).execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
