#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! spacequota — resolve and display a space quota for the targeted organization.

mod actor;
mod cli;
mod commands;
mod logging;
mod quota;
mod session;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.debug) {
        eprintln!("{err:#}");
    }

    let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);

    match commands::dispatch(&cli.command, cli.config.as_deref(), &ctx) {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let error_output = ErrorOutput::from_command_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
