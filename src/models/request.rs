use serde::{Deserialize, Serialize};

/// A request to the pr-scribe pipeline (session and batch modes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrRequest {
    pub command: Command,
    /// Unified diff text
    #[serde(default)]
    pub diff: String,
    /// Issue / ticket / PR body text
    #[serde(default)]
    pub issue: String,
    /// Changed file paths; defaults to the files found in the diff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Inline markdown template overriding the service template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Generate,
    Analyze,
    Issue,
}
