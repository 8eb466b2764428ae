//! Line-pattern heuristics used by the semantic analyzer.
//!
//! Function and class boundaries are approximated by matching single lines,
//! not by parsing. [`LineClassifier`] is the seam for swapping in a stricter
//! matcher per language; [`KeywordClassifier`] is the default.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

/// Classifies individual source lines.
pub trait LineClassifier: Send + Sync {
    /// Name of the function defined (or referenced as enclosing) on `line`.
    fn function_definition<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Name of the class defined on `line`.
    fn class_definition<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// `trimmed` is a comment or a no-op statement.
    fn is_ignorable(&self, trimmed: &str) -> bool;

    /// Number of distinct logic keywords occurring in `trimmed`.
    fn logic_hits(&self, trimmed: &str) -> usize;

    /// `trimmed` starts a function definition.
    fn is_signature(&self, trimmed: &str) -> bool;

    /// `trimmed` is a return statement.
    fn is_return(&self, trimmed: &str) -> bool;
}

const LOGIC_KEYWORDS: [&str; 11] = [
    "if ", "elif ", "else:", "return ", "raise ", "for ", "while ", "try:", "except ", "and ",
    "or ",
];

static FUNC_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdef\s+([a-zA-Z_][a-zA-Z0-9_]*)").expect("function pattern is valid")
});

static CLASS_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([a-zA-Z_][a-zA-Z0-9_]*)").expect("class pattern is valid")
});

static LOGIC_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(LOGIC_KEYWORDS).expect("logic keywords are valid"));

/// Keyword matcher for `def`/`class` style sources with `#` comments and
/// `pass` as the no-op statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl LineClassifier for KeywordClassifier {
    fn function_definition<'a>(&self, line: &'a str) -> Option<&'a str> {
        capture_name(&FUNC_DEF_RE, line)
    }

    fn class_definition<'a>(&self, line: &'a str) -> Option<&'a str> {
        capture_name(&CLASS_DEF_RE, line)
    }

    fn is_ignorable(&self, trimmed: &str) -> bool {
        trimmed.starts_with('#') || trimmed == "pass"
    }

    fn logic_hits(&self, trimmed: &str) -> usize {
        // Overlapping search: "for " also contains "or ".
        let mut seen = [false; LOGIC_KEYWORDS.len()];
        for m in LOGIC_MATCHER.find_overlapping_iter(trimmed) {
            seen[m.pattern().as_usize()] = true;
        }
        seen.iter().filter(|&&hit| hit).count()
    }

    fn is_signature(&self, trimmed: &str) -> bool {
        trimmed.starts_with("def ")
    }

    fn is_return(&self, trimmed: &str) -> bool {
        trimmed.starts_with("return")
    }
}

fn capture_name<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
