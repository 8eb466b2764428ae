use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    #[serde(rename = "refactor")]
    Refactor,
    #[serde(rename = "bug fix")]
    BugFix,
    #[serde(rename = "feature")]
    Feature,
    #[serde(rename = "update")]
    Update,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refactor => "refactor",
            Self::BugFix => "bug fix",
            Self::Feature => "feature",
            Self::Update => "update",
        }
    }

    /// Title-cased label used as the PR title prefix ("Bug Fix", "Feature", ...).
    pub fn title(&self) -> &'static str {
        match self {
            Self::Refactor => "Refactor",
            Self::BugFix => "Bug Fix",
            Self::Feature => "Feature",
            Self::Update => "Update",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        write!(f, "{s}")
    }
}

/// Final classification of a change set. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeClassification {
    pub change_type: ChangeType,
    pub breaking: bool,
    pub confidence: Confidence,
    pub rationale: String,
}
