mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::explain_cmd::explain_command;
use crate::commands::forecast_cmd::forecast_command;
use crate::services::tracing_setup::init_tracing;
use clap::Parser;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);
    match args.command {
        Commands::Forecast(forecast) => forecast_command(forecast),
        Commands::Explain => explain_command(),
        Commands::Completions { shell } => completions_command(shell),
    }
}
