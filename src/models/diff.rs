use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A contiguous change region of a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    /// Added lines without the leading `+`.
    #[serde(default)]
    pub added_lines: Vec<String>,
    /// Removed lines without the leading `-`.
    #[serde(default)]
    pub removed_lines: Vec<String>,
    /// Every other line seen while the hunk was open, verbatim.
    #[serde(default)]
    pub context_lines: Vec<String>,
}

/// One file's change, keyed by its new path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub filename: String,
    pub hunks: Vec<DiffHunk>,
    pub additions: usize,
    pub deletions: usize,
}

impl FileDiff {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Added plus removed lines.
    pub fn churn(&self) -> usize {
        self.additions + self.deletions
    }
}

/// Parse result: filename to file diff, in the order files first appear.
pub type ParsedDiff = IndexMap<String, FileDiff>;

/// Coarse label for a set of changed paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    #[serde(rename = "Chore")]
    Chore,
    #[serde(rename = "Test update")]
    TestUpdate,
    #[serde(rename = "Documentation update")]
    DocumentationUpdate,
    #[serde(rename = "Code change")]
    CodeChange,
}
