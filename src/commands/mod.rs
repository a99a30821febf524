pub mod check;
pub mod generate;
pub mod run;

use std::process::ExitCode;

use anyhow::Result;

pub trait Command {
    /// Execute the command, yielding the process exit code
    ///
    /// # Errors
    /// * If the command could not be executed
    fn execute(&self) -> Result<ExitCode>;
}
