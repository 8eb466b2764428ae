use crate::models::diff::FileCategory;

/// Label a set of changed paths. Tests take precedence over docs.
pub fn categorize_files<S: AsRef<str>>(files: &[S]) -> FileCategory {
    if files.is_empty() {
        return FileCategory::Chore;
    }
    if files
        .iter()
        .any(|f| f.as_ref().to_lowercase().contains("test"))
    {
        return FileCategory::TestUpdate;
    }
    if files.iter().any(|f| f.as_ref().ends_with(".md")) {
        return FileCategory::DocumentationUpdate;
    }
    FileCategory::CodeChange
}

/// `"N lines added, M lines removed"` over raw diff lines, ignoring file markers.
pub fn diff_summary(diff: &str) -> String {
    let (added, removed) = diff.lines().fold((0usize, 0usize), |(added, removed), line| {
        if line.starts_with('+') && !line.starts_with("+++") {
            (added + 1, removed)
        } else if line.starts_with('-') && !line.starts_with("---") {
            (added, removed + 1)
        } else {
            (added, removed)
        }
    });
    format!("{added} lines added, {removed} lines removed")
}
