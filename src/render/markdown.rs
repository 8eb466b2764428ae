use indexmap::IndexMap;

/// Built-in pull request template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/pr.md");

/// Section name to rendered text, substituted in insertion order.
pub type Sections = IndexMap<String, String>;

/// Fills `{{name}}` placeholders in a template by literal replacement.
///
/// Unmatched placeholders stay verbatim, keys without a placeholder are ignored.
#[derive(Debug, Clone)]
pub struct MarkdownBuilder {
    template: String,
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl MarkdownBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute every section (trimmed) and trim the result.
    pub fn build(&self, sections: &Sections) -> String {
        let output = sections
            .iter()
            .fold(self.template.clone(), |output, (key, value)| {
                output.replace(&format!("{{{{{key}}}}}"), value.trim())
            });
        output.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(pairs: &[(&str, &str)]) -> Sections {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unmatched_placeholder_is_kept() {
        let builder = MarkdownBuilder::new("## Summary\n{{change}}\n## Missing\n{{notfound}}");
        let out = builder.build(&sections(&[("change", "x")]));
        assert_eq!(out, "## Summary\nx\n## Missing\n{{notfound}}");
    }

    #[test]
    fn unknown_keys_are_ignored_and_values_trimmed() {
        let builder = MarkdownBuilder::new("  {{a}} / {{a}}  \n");
        let out = builder.build(&sections(&[("a", "  one\n"), ("zzz", "unused")]));
        assert_eq!(out, "one / one");
    }

    #[test]
    fn substitution_is_sequential() {
        let builder = MarkdownBuilder::new("{{first}}");
        let out = builder.build(&sections(&[("first", "{{second}}"), ("second", "done")]));
        assert_eq!(out, "done");
    }

    #[test]
    fn default_template_has_all_sections() {
        let builder = MarkdownBuilder::default();
        for key in ["title", "change", "context", "impact", "checklist"] {
            assert!(
                builder.template().contains(&format!("{{{{{key}}}}}")),
                "missing {key}"
            );
        }
    }
}
