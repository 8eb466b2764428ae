use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred purpose of an issue description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Bug,
    Feature,
    Refactor,
    Update,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Refactor => "refactor",
            Self::Update => "update",
        };
        write!(f, "{s}")
    }
}

/// Intent, summary and constraints extracted from issue text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueIntent {
    pub raw_text: String,
    pub summary: String,
    pub intent: Intent,
    pub constraints: Vec<String>,
}
