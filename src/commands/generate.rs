use std::process::ExitCode;

use anyhow::Result;

use crate::{
    cli::GenerateArgs, commands::Command, generator::TestGenerator, plan::TestPlan,
    progress::ConsoleProgress,
};

pub struct GenerateCommand<'a> {
    args: &'a GenerateArgs,
}

impl<'a> GenerateCommand<'a> {
    pub fn new(args: &'a GenerateArgs) -> Self {
        Self { args }
    }
}

impl Command for GenerateCommand<'_> {
    fn execute(&self) -> Result<ExitCode> {
        let plan = TestPlan::load(&self.args.config)?;
        let generator = TestGenerator::new(
            &self.args.runtime,
            &self.args.jar,
            &self.args.test_dir,
            &self.args.python,
            &self.args.output_dir,
            &self.args.coverage_dir,
        );

        generator.prepare_dirs()?;

        let mut progress = ConsoleProgress::stdout();
        generator.generate_all(&plan, &mut progress)?;

        println!("\n[*] Finished {} generation group(s)", plan.groups().count());
        Ok(ExitCode::SUCCESS)
    }
}
