//! diamond-abi CLI: the `diamond-abi` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_tracing(cli.verbose);

    match cli.command {
        Commands::Merge {
            input,
            output,
            json,
        } => commands::merge::run(input, output, json),

        Commands::Signatures { input, json } => commands::signatures::run(input, json),

        Commands::Init { path, json } => commands::init::run(path, json),
    }
}
