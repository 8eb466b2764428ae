use tracing::debug;

use crate::engine::line_classifier::{KeywordClassifier, LineClassifier};
use crate::models::diff::{DiffHunk, FileDiff, ParsedDiff};
use crate::models::semantics::{ChangeTag, FileSemantics, FunctionChange, SemanticsMap};

/// Interpret parsed diffs with the default [`KeywordClassifier`].
pub fn analyze(parsed: &ParsedDiff) -> SemanticsMap {
    analyze_with(parsed, &KeywordClassifier)
}

/// Interpret parsed diffs: which functions and classes changed, and whether
/// behavior or only formatting changed.
pub fn analyze_with(parsed: &ParsedDiff, classifier: &dyn LineClassifier) -> SemanticsMap {
    parsed
        .iter()
        .map(|(name, file_diff)| {
            let semantics = analyze_file(name, file_diff, classifier);
            debug!(
                file = %name,
                functions = semantics.functions_changed.len(),
                classes = semantics.classes_changed.len(),
                behavior_changed = semantics.behavior_changed,
                only_formatting = semantics.only_formatting,
                "semantics analyzed"
            );
            (name.clone(), semantics)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Added,
    Removed,
}

/// Enclosing function/class, carried forward across the hunks of one file.
#[derive(Debug, Clone, Copy, Default)]
struct ScanState<'a> {
    function: Option<&'a str>,
    class: Option<&'a str>,
}

/// Contribution of a single added or removed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEffect {
    /// Blank, comment or no-op: touches no flag.
    Skip,
    Code {
        logic_hits: usize,
        signature: bool,
        returns: bool,
    },
}

fn analyze_file(
    name: &str,
    file_diff: &FileDiff,
    classifier: &dyn LineClassifier,
) -> FileSemantics {
    let mut semantics = FileSemantics::new(name);

    file_diff
        .hunks
        .iter()
        .fold(ScanState::default(), |state, hunk| {
            scan_hunk(state, hunk, &mut semantics, classifier)
        });

    semantics
}

fn scan_hunk<'a>(
    state: ScanState<'a>,
    hunk: &'a DiffHunk,
    semantics: &mut FileSemantics,
    classifier: &dyn LineClassifier,
) -> ScanState<'a> {
    // Context first, so edits below an unchanged `def` line are attributed to it.
    let state = hunk.context_lines.iter().fold(state, |state, line| {
        enter_context(state, line, semantics, classifier)
    });

    let added = hunk.added_lines.iter().map(|l| (l, Side::Added));
    let removed = hunk.removed_lines.iter().map(|l| (l, Side::Removed));
    for (line, side) in added.chain(removed) {
        let effect = classify_line(line, classifier);
        apply_effect(semantics, state.function, side, effect);
    }

    state
}

fn enter_context<'a>(
    state: ScanState<'a>,
    line: &'a str,
    semantics: &mut FileSemantics,
    classifier: &dyn LineClassifier,
) -> ScanState<'a> {
    let function = classifier.function_definition(line).or(state.function);
    let class = match classifier.class_definition(line) {
        Some(class) => {
            semantics.classes_changed.insert(class.to_string());
            Some(class)
        }
        None => state.class,
    };
    ScanState { function, class }
}

fn classify_line(line: &str, classifier: &dyn LineClassifier) -> LineEffect {
    let trimmed = line.trim();
    if trimmed.is_empty() || classifier.is_ignorable(trimmed) {
        return LineEffect::Skip;
    }
    LineEffect::Code {
        logic_hits: classifier.logic_hits(trimmed),
        signature: classifier.is_signature(trimmed),
        returns: classifier.is_return(trimmed),
    }
}

fn apply_effect(
    semantics: &mut FileSemantics,
    function: Option<&str>,
    side: Side,
    effect: LineEffect,
) {
    let LineEffect::Code {
        logic_hits,
        signature,
        returns,
    } = effect
    else {
        return;
    };

    // Sticky: once real code is seen the file is no longer formatting-only.
    semantics.only_formatting = false;

    let Some(name) = function else {
        return;
    };

    let change = semantics
        .functions_changed
        .entry(name.to_string())
        .or_insert_with(|| FunctionChange::new(name));

    match side {
        Side::Added => change.added_lines += 1,
        Side::Removed => change.removed_lines += 1,
    }

    if logic_hits > 0 {
        change.change_types.insert(ChangeTag::Logic);
        semantics.total_logic_changes += logic_hits;
        semantics.behavior_changed = true;
    }
    if signature {
        change.change_types.insert(ChangeTag::Signature);
        semantics.behavior_changed = true;
    }
    if returns {
        change.change_types.insert(ChangeTag::Return);
        semantics.behavior_changed = true;
    }
}
