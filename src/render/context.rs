use crate::models::classification::{ChangeClassification, ChangeType};
use crate::models::issue::IssueIntent;

/// "Context": the problem statement, motivation and constraints.
pub fn write_context(issue: &IssueIntent, classification: &ChangeClassification) -> String {
    let mut lines = vec![
        format!(
            "This pull request addresses the following problem:\n\n> {}",
            issue.summary
        ),
        String::new(),
        motivation(classification.change_type).to_string(),
    ];

    if classification.change_type == ChangeType::Refactor {
        lines.push(String::new());
        lines.push("No functional behavior is changed as part of this update.".to_string());
    }

    if !issue.constraints.is_empty() {
        lines.push(String::new());
        lines.push("**Constraints considered:**".to_string());
        lines.extend(issue.constraints.iter().map(|c| format!("- {c}")));
    }

    lines.join("\n")
}

fn motivation(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::BugFix => {
            "The existing behavior did not fully align with the expected functionality, \
             leading to incorrect outcomes. This change corrects that behavior while \
             preserving the original design intent."
        }
        ChangeType::Feature => {
            "The current implementation lacked support for the described use case. \
             This update extends existing behavior in a backward-compatible manner."
        }
        ChangeType::Refactor => {
            "This change improves internal structure and readability to make the code \
             easier to understand and maintain."
        }
        ChangeType::Update => {
            "This update aligns the implementation more closely with the intended \
             behavior and project standards."
        }
    }
}
