use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    cli::CheckArgs,
    commands::Command,
    coverage::{all_passed, check_plan, GroupOutcome},
    plan::TestPlan,
};

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Actual %")]
    actual: u32,
    #[tabled(rename = "Expected %")]
    expected: u32,
}

pub struct CheckCommand<'a> {
    args: &'a CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(args: &'a CheckArgs) -> Self {
        Self { args }
    }

    fn render_failures(failing: &[&GroupOutcome]) -> String {
        let rows = failing
            .iter()
            .map(|outcome| FailureRow {
                group: outcome.id.to_string(),
                actual: outcome.actual,
                expected: outcome.expected,
            })
            .collect::<Vec<FailureRow>>();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.to_string()
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self) -> Result<ExitCode> {
        let plan = TestPlan::load(&self.args.config)?;
        let outcomes = check_plan(&plan, &self.args.coverage_dir)?;

        if all_passed(&outcomes) {
            println!(
                "{}",
                format!(
                    "[+] All {} group(s) meet their coverage targets",
                    outcomes.len()
                )
                .green()
            );
            return Ok(ExitCode::SUCCESS);
        }

        let failing = outcomes
            .iter()
            .filter(|outcome| !outcome.passed())
            .collect::<Vec<&GroupOutcome>>();

        println!("{}", "[-] Bad coverage:".red());
        println!("{}", Self::render_failures(&failing));
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group_id::GroupId;

    #[test]
    fn test_render_failures_lists_group_and_percentages() {
        let outcomes = vec![
            GroupOutcome {
                id: GroupId::new("a", "f", 0),
                actual: 30,
                expected: 50,
            },
            GroupOutcome {
                id: GroupId::new("pkg/sub", "mod", 2),
                actual: 0,
                expected: 80,
            },
        ];
        let failing = outcomes.iter().collect::<Vec<&GroupOutcome>>();

        let table = CheckCommand::render_failures(&failing);
        assert!(table.contains("Group"));
        assert!(table.contains("Actual %"));
        assert!(table.contains("Expected %"));
        assert!(table.contains("a_f"));
        assert!(table.contains("pkg_sub_mod_2"));
        assert!(table.contains("30"));
        assert!(table.contains("80"));
    }
}
