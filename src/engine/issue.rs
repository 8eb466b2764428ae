use std::sync::LazyLock;

use regex::Regex;

use crate::models::issue::{Intent, IssueIntent};

const BUG_KEYWORDS: &[&str] = &[
    "bug",
    "error",
    "incorrect",
    "fails",
    "failure",
    "broken",
    "unexpected",
    "crash",
];

const FEATURE_KEYWORDS: &[&str] = &["add", "implement", "support", "introduce", "enable"];

const REFACTOR_KEYWORDS: &[&str] = &["refactor", "cleanup", "optimize", "restructure", "simplify"];

/// Segments at or below this many characters are not used as the summary.
const MIN_SUMMARY_CHARS: usize = 10;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\n]").expect("sentence pattern is valid"));

/// Negation / requirement phrasing, matched against lowercased text in this order.
static CONSTRAINT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"must\s+not\s+[\w\s]+",
        r"should\s+not\s+[\w\s]+",
        r"without\s+[\w\s]+",
        r"ensure\s+that\s+[\w\s]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("constraint pattern is valid"))
    .collect()
});

/// Parse issue / ticket text into an [`IssueIntent`]. Never fails: text with
/// no recognised keyword is an `update`.
pub fn parse_issue(text: &str) -> IssueIntent {
    let text = text.trim();
    let lowered = text.to_lowercase();

    IssueIntent {
        raw_text: text.to_string(),
        summary: extract_summary(text),
        intent: detect_intent(&lowered),
        constraints: extract_constraints(&lowered),
    }
}

/// First keyword list with a substring hit wins: bug, feature, refactor.
fn detect_intent(lowered: &str) -> Intent {
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if contains_any(BUG_KEYWORDS) {
        Intent::Bug
    } else if contains_any(FEATURE_KEYWORDS) {
        Intent::Feature
    } else if contains_any(REFACTOR_KEYWORDS) {
        Intent::Refactor
    } else {
        Intent::Update
    }
}

/// First sentence longer than [`MIN_SUMMARY_CHARS`], else the whole text.
fn extract_summary(text: &str) -> String {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .find(|s| s.chars().count() > MIN_SUMMARY_CHARS)
        .unwrap_or(text)
        .to_string()
}

fn extract_constraints(lowered: &str) -> Vec<String> {
    CONSTRAINT_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(lowered).map(|m| m.as_str().to_string()))
        .collect()
}
