use tracing::debug;

use crate::models::classification::{ChangeClassification, ChangeType, Confidence};
use crate::models::issue::{Intent, IssueIntent};
use crate::models::semantics::SemanticsMap;

/// Combine issue intent and diff semantics into a single classification.
///
/// Branches, first match wins:
/// 1. every file formatting-only (vacuously true for no files) → `refactor`
/// 2. behavior changed and intent is `bug` → `bug fix`; intent `feature` → `feature`
/// 3. otherwise → `update`
///
/// Behavior changes under a `refactor` or `update` intent land in branch 3.
pub fn classify(issue: &IssueIntent, semantics: &SemanticsMap) -> ChangeClassification {
    let breaking = detect_breaking(semantics);
    let behavior_changed = semantics.values().any(|f| f.behavior_changed);
    let only_formatting = semantics.values().all(|f| f.only_formatting);

    let classification = if only_formatting {
        ChangeClassification {
            change_type: ChangeType::Refactor,
            breaking: false,
            confidence: Confidence::High,
            rationale: "Only formatting or non-functional changes detected.".to_string(),
        }
    } else if behavior_changed && issue.intent == Intent::Bug {
        ChangeClassification {
            change_type: ChangeType::BugFix,
            breaking,
            confidence: Confidence::High,
            rationale: "Behavioral changes align with bug-related issue.".to_string(),
        }
    } else if behavior_changed && issue.intent == Intent::Feature {
        ChangeClassification {
            change_type: ChangeType::Feature,
            breaking,
            confidence: Confidence::Medium,
            rationale: "Behavioral changes introduce or extend functionality.".to_string(),
        }
    } else {
        ChangeClassification {
            change_type: ChangeType::Update,
            breaking,
            confidence: Confidence::Low,
            rationale: "Unable to confidently classify; treated as general update.".to_string(),
        }
    };

    debug!(
        change_type = %classification.change_type,
        breaking = classification.breaking,
        confidence = %classification.confidence,
        intent = %issue.intent,
        "change classified"
    );
    classification
}

/// Any function in any file with a `signature` tag.
fn detect_breaking(semantics: &SemanticsMap) -> bool {
    semantics.values().any(|f| f.has_signature_change())
}
