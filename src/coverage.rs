use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::group_id::GroupId;
use crate::plan::TestPlan;

/// Inclusive line range within one source file
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    fn len(&self) -> u64 {
        u64::from(self.end.saturating_sub(self.start)) + 1
    }
}

/// Per-group coverage report emitted by the generator.
///
/// The report file holds one JSON object per line; only the first line is
/// meaningful, later lines are instrumentation noise.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GroupReport {
    /// Line ranges executed by the generated tests
    pub covered: Vec<LineRange>,
    /// Line ranges never executed
    #[serde(rename = "notCovered")]
    pub not_covered: Vec<LineRange>,
}

impl GroupReport {
    /// Parse the first line of a report file
    ///
    /// # Errors
    /// * If the file cannot be read
    /// * If the first line is not a valid report object
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read coverage report: {}", path.display()))?;
        let first_line = content.lines().next().unwrap_or("");
        serde_json::from_str(first_line)
            .with_context(|| format!("Failed to parse coverage report: {}", path.display()))
    }

    pub fn covered_lines(&self) -> u64 {
        self.covered.iter().map(LineRange::len).sum()
    }

    pub fn uncovered_lines(&self) -> u64 {
        self.not_covered.iter().map(LineRange::len).sum()
    }

    /// Covered percentage rounded to the nearest integer; 0 when the report
    /// mentions no lines at all
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        let covered = self.covered_lines();
        let total = covered + self.uncovered_lines();
        if total == 0 {
            return 0;
        }
        ((covered as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Result of checking one group against its coverage target
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub id: GroupId,
    pub actual: u32,
    pub expected: u32,
}

impl GroupOutcome {
    pub fn passed(&self) -> bool {
        self.actual >= self.expected
    }
}

/// True iff every group meets its coverage target
pub fn all_passed(outcomes: &[GroupOutcome]) -> bool {
    outcomes.iter().all(GroupOutcome::passed)
}

/// Evaluate every group of the plan against the reports in `coverage_dir`.
///
/// A missing report counts as 0% coverage; an unreadable or malformed one
/// is a hard error.
///
/// # Errors
/// * If an existing report cannot be read or parsed
pub fn check_plan(plan: &TestPlan, coverage_dir: &Path) -> Result<Vec<GroupOutcome>> {
    let mut outcomes = Vec::new();
    for (id, group) in plan.groups() {
        let report_path = coverage_dir.join(id.coverage_file_name());
        let actual = if report_path.exists() {
            GroupReport::from_file(&report_path)?.percent()
        } else {
            0
        };
        outcomes.push(GroupOutcome {
            id,
            actual,
            expected: group.coverage,
        });
    }
    Ok(outcomes)
}
