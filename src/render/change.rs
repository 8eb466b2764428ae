use crate::models::semantics::{ChangeTag, FunctionChange, SemanticsMap};

/// "What changed": one subsection per file.
pub fn write_changes(semantics: &SemanticsMap) -> String {
    let mut lines = Vec::new();

    for (filename, file) in semantics {
        lines.push(format!("### `{filename}`"));

        if file.only_formatting {
            lines.push(
                "- Formatting-only adjustments to improve readability and consistency; \
                 no logic changes."
                    .to_string(),
            );
        } else if file.functions_changed.is_empty() {
            lines.push(
                "- Internal cleanup and small structural improvements without functional changes."
                    .to_string(),
            );
        } else {
            for (name, change) in &file.functions_changed {
                lines.push(format!("- **{name}**: {}", describe_function(change)));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

fn describe_function(change: &FunctionChange) -> String {
    let mut parts = Vec::new();
    if change.has(ChangeTag::Signature) {
        parts.push("function signature updated");
    }
    if change.has(ChangeTag::Logic) {
        parts.push("conditional or control flow logic adjusted");
    }
    if change.has(ChangeTag::Return) {
        parts.push("return behavior modified");
    }
    if parts.is_empty() {
        parts.push("internal implementation refined");
    }

    format!(
        "{} (+{}/-{} lines)",
        parts.join(", "),
        change.added_lines,
        change.removed_lines
    )
}
