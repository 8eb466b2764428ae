use std::collections::BTreeSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Kind of edit observed inside a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTag {
    Logic,
    Signature,
    Return,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Logic => "logic",
            Self::Signature => "signature",
            Self::Return => "return",
        };
        write!(f, "{s}")
    }
}

/// Change footprint of a single function within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionChange {
    pub name: String,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub change_types: BTreeSet<ChangeTag>,
}

impl FunctionChange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            added_lines: 0,
            removed_lines: 0,
            change_types: BTreeSet::new(),
        }
    }

    pub fn has(&self, tag: ChangeTag) -> bool {
        self.change_types.contains(&tag)
    }
}

/// Derived per-file meaning of a diff.
///
/// `only_formatting` and `behavior_changed` are tracked independently: a file
/// with structural edits but no logic keywords has both set to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSemantics {
    pub filename: String,
    pub functions_changed: IndexMap<String, FunctionChange>,
    pub classes_changed: IndexSet<String>,
    pub behavior_changed: bool,
    pub only_formatting: bool,
    pub total_logic_changes: usize,
}

impl FileSemantics {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            functions_changed: IndexMap::new(),
            classes_changed: IndexSet::new(),
            behavior_changed: false,
            only_formatting: true,
            total_logic_changes: 0,
        }
    }

    /// True if any touched function carries a `signature` tag.
    pub fn has_signature_change(&self) -> bool {
        self.functions_changed
            .values()
            .any(|f| f.has(ChangeTag::Signature))
    }
}

pub type SemanticsMap = IndexMap<String, FileSemantics>;
