use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::{check::CheckCommand, generate::GenerateCommand, run::RunCommand, Command};

pub mod cli;
pub mod commands;
pub mod coverage;
pub mod generator;
pub mod group_id;
pub mod plan;
pub mod progress;

fn main() -> Result<ExitCode> {
    let cli_args = Cli::parse();

    match &cli_args.cmd {
        Commands::Generate(args) => GenerateCommand::new(args).execute(),
        Commands::Run(args) => RunCommand::new(args).execute(),
        Commands::CheckCoverage(args) => CheckCommand::new(args).execute(),
    }
}
