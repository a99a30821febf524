use std::process::{Command as SysCommand, ExitCode, ExitStatus};

use anyhow::{Context, Result};

use crate::{cli::RunArgs, commands::Command, group_id::TESTS_PATTERN};

pub struct RunCommand<'a> {
    args: &'a RunArgs,
}

impl<'a> RunCommand<'a> {
    pub fn new(args: &'a RunArgs) -> Self {
        Self { args }
    }

    /// Assemble the coverage-wrapped unittest discovery invocation
    fn build_command(&self) -> SysCommand {
        let mut cmd = SysCommand::new(&self.args.python);
        cmd.arg("-m")
            .arg("coverage")
            .arg("run")
            .arg(format!("--source={}", self.args.code_dir.display()))
            .arg("-m")
            .arg("unittest")
            .arg("discover")
            .arg("-p")
            .arg(TESTS_PATTERN)
            .arg(&self.args.test_dir);
        cmd
    }
}

/// The runner's exit code is the verdict and is passed through as is;
/// termination by signal maps to 1
fn passthrough_code(status: ExitStatus) -> u8 {
    let code = status.code().unwrap_or(1);
    u8::try_from(code).unwrap_or(1)
}

impl Command for RunCommand<'_> {
    fn execute(&self) -> Result<ExitCode> {
        let mut cmd = self.build_command();

        let rendered = std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<String>>()
            .join(" ");
        println!("{rendered}");

        let status = cmd
            .status()
            .with_context(|| format!("Failed to run test suite: {rendered}"))?;

        Ok(ExitCode::from(passthrough_code(status)))
    }
}
