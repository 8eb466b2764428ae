use serde::{Deserialize, Serialize};

use super::classification::ChangeClassification;
use super::diff::{FileCategory, ParsedDiff};
use super::impact::ImpactReport;
use super::issue::IssueIntent;
use super::semantics::SemanticsMap;

/// The rendered pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrDocument {
    pub title: String,
    pub markdown: String,
}

/// Every intermediate product of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub title: String,
    pub files: ParsedDiff,
    pub semantics: SemanticsMap,
    pub issue: IssueIntent,
    pub classification: ChangeClassification,
    pub impact: ImpactReport,
    pub file_category: FileCategory,
    pub diff_summary: String,
}
