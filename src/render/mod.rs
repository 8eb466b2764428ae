//! Markdown fragments rendered from pipeline output.

pub mod change;
pub mod checklist;
pub mod context;
pub mod impact;
pub mod markdown;

use crate::models::classification::ChangeClassification;
use crate::models::diff::ParsedDiff;

/// Title used when the diff names no file.
const FALLBACK_TITLE_SUBJECT: &str = "core logic";

/// `"Bug Fix: update src/cart.py"`
pub fn title(classification: &ChangeClassification, parsed: &ParsedDiff) -> String {
    let subject = parsed
        .keys()
        .next()
        .map(String::as_str)
        .unwrap_or(FALLBACK_TITLE_SUBJECT);
    format!("{}: update {subject}", classification.change_type.title())
}
