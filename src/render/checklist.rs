use crate::models::classification::{ChangeClassification, ChangeType};

const UNIVERSAL_ITEMS: [&str; 3] = [
    "Changes are scoped to the stated problem",
    "No unrelated modifications included",
    "Code follows project conventions",
];

/// Reviewer checklist as pre-checked markdown task items.
pub fn build_checklist(classification: &ChangeClassification) -> String {
    let mut items = UNIVERSAL_ITEMS.to_vec();

    if classification.breaking {
        items.push("Breaking changes are documented and justified");
    }
    match classification.change_type {
        ChangeType::BugFix => items.push("Fix covers the reported failure mode"),
        ChangeType::Feature => items.push("New behavior is backward-compatible"),
        ChangeType::Refactor | ChangeType::Update => {}
    }

    items
        .iter()
        .map(|item| format!("- [x] {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
