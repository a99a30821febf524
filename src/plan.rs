use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::group_id::GroupId;

/// Test plan: which source files get tests generated, in which groups, and
/// against which coverage targets
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TestPlan {
    /// Parts of the sample tree, each a directory of source files
    pub parts: Vec<Part>,
}

/// A directory of source files, given relative to the sample root
#[derive(Deserialize, Debug, Clone)]
pub struct Part {
    /// Relative path of the directory, `/`-separated
    pub path: String,
    /// Source files inside the directory
    pub files: Vec<TestFile>,
}

/// One source file and its generation groups
#[derive(Deserialize, Debug, Clone)]
pub struct TestFile {
    /// File name without the `.py` extension
    pub name: String,
    /// Generation groups, ordered; ordinals feed into [`GroupId`]
    pub groups: Vec<Group>,
}

/// One generation job for a file, scoped to specific classes and methods
#[derive(Deserialize, Debug, Clone)]
pub struct Group {
    /// Generation timeout in seconds, passed through to the external tool
    pub timeout: u64,
    /// Class-name filters; `null` generates for every class
    pub classes: Option<Vec<String>>,
    /// Method-name filters; `null` generates for every method
    pub methods: Option<Vec<String>>,
    /// Expected coverage percentage; absent means no requirement
    #[serde(default)]
    pub coverage: u32,
}

impl TestPlan {
    /// Load a test plan from a JSON file
    ///
    /// # Errors
    /// * If the file cannot be read or does not parse as a plan
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read test plan: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse test plan: {}", path.display()))
    }

    /// All groups in plan order, each paired with its identifier
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.parts.iter().flat_map(|part| {
            part.files.iter().flat_map(move |file| {
                file.groups
                    .iter()
                    .enumerate()
                    .map(move |(index, group)| (GroupId::new(&part.path, &file.name, index), group))
            })
        })
    }
}
