use clap::{Parser, Subcommand};

mod check;
mod generate;
mod run;

pub use check::CheckArgs;
pub use generate::GenerateArgs;
pub use run::RunArgs;

/// Command-line interface for the batch test-generation driver
#[derive(Parser, Debug, Clone)]
#[command(name = "Batch Test-Generation Driver")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate tests for every group of the plan
    Generate(GenerateArgs),
    /// Run the generated tests under a coverage profile
    Run(RunArgs),
    /// Compare per-group coverage reports against the plan's targets
    #[command(name = "check_coverage")]
    CheckCoverage(CheckArgs),
}
