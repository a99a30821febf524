use std::fmt;
use std::path::{Path, PathBuf};

/// File-name prefix of generated test modules
pub const TESTS_PREFIX: &str = "tests_";
/// Discovery pattern handed to the test runner; must match `TESTS_PREFIX`
pub const TESTS_PATTERN: &str = "tests_*";
/// File-name prefix of per-group coverage reports
pub const COVERAGE_PREFIX: &str = "coverage_";

/// Identifies one generation group: a (part, file, group-index) triple from
/// the test plan.
///
/// Every file name that ties the generation phase to the coverage-check
/// phase is derived here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId {
    part_path: String,
    file_name: String,
    index: usize,
}

impl GroupId {
    pub fn new(part_path: &str, file_name: &str, index: usize) -> Self {
        Self {
            part_path: part_path.to_string(),
            file_name: file_name.to_string(),
            index,
        }
    }

    /// Flat identifier used in file names: the part path with slashes
    /// flattened to underscores, then the file name, then a `_<index>`
    /// suffix for every group after the first.
    pub fn slug(&self) -> String {
        let suffix = if self.index > 0 {
            format!("_{}", self.index)
        } else {
            String::new()
        };
        format!(
            "{}_{}{}",
            self.part_path.replace('/', "_"),
            self.file_name,
            suffix
        )
    }

    /// Name of the test module the generator writes for this group
    pub fn tests_file_name(&self) -> String {
        format!("{}{}.py", TESTS_PREFIX, self.slug())
    }

    /// Name of the coverage report the generator writes for this group
    pub fn coverage_file_name(&self) -> String {
        format!("{}{}.json", COVERAGE_PREFIX, self.slug())
    }

    /// Path of the source file under test, rooted at the sample tree
    pub fn source_file(&self, test_root: &Path) -> PathBuf {
        test_root
            .join(&self.part_path)
            .join(format!("{}.py", self.file_name))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
