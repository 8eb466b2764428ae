use anyhow::{Result, bail};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{classifier, diff, files, impact, issue, semantics};
use crate::error::{ErrorCode, ScribeError};
use crate::models::impact::ImpactStats;
use crate::models::issue::IssueIntent;
use crate::models::response::{AnalysisReport, PrDocument};
use crate::render::markdown::{MarkdownBuilder, Sections};
use crate::render::{change, checklist, context, title};

// ---------------------------------------------------------------------------
// AppService: unified core logic for CLI / Session / MCP
// ---------------------------------------------------------------------------

pub struct AppService {
    max_input_size: usize,
    builder: MarkdownBuilder,
}

/// Raw inputs of one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrInput<'a> {
    pub diff: &'a str,
    pub issue: &'a str,
    /// Changed paths; the diff's own file list when `None`.
    pub files: Option<&'a [String]>,
}

impl Default for AppService {
    fn default() -> Self {
        Self::new()
    }
}

impl AppService {
    /// Create an unbounded service with the built-in template (CLI mode).
    pub fn new() -> Self {
        Self {
            max_input_size: 0,
            builder: MarkdownBuilder::default(),
        }
    }

    /// Create a service that rejects inputs over 100 MB (Session / MCP mode).
    pub fn bounded() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            ..Self::new()
        }
    }

    /// Replace the markdown template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.builder = MarkdownBuilder::new(template);
        self
    }

    /// Apply the template configured in `config`, or `template_override` if given.
    pub fn configured(self, config: &Config, template_override: Option<&Path>) -> Result<Self> {
        match template_override.or(config.template.as_deref()) {
            Some(path) => {
                let template = read_template(path)?;
                debug!(template = %path.display(), "using template file");
                Ok(self.with_template(template))
            }
            None => Ok(self),
        }
    }

    pub fn template(&self) -> &str {
        self.builder.template()
    }

    // -----------------------------------------------------------------------
    // Validation helpers
    // -----------------------------------------------------------------------

    fn validate_input_size(&self, field: &str, data: &str) -> Result<()> {
        if self.max_input_size > 0 && data.len() > self.max_input_size {
            warn!(field = field, size = data.len(), "input rejected: too large");
            bail!(ScribeError::new(
                ErrorCode::InvalidRequest,
                format!(
                    "{field} exceeds maximum size ({} bytes > {} bytes)",
                    data.len(),
                    self.max_input_size
                ),
            ));
        }
        Ok(())
    }

    fn validate(&self, input: &PrInput<'_>) -> Result<()> {
        self.validate_input_size("diff", input.diff)?;
        self.validate_input_size("issue", input.issue)
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    /// Run every analysis stage and return all intermediate products.
    pub fn analyze(&self, input: &PrInput<'_>) -> Result<AnalysisReport> {
        self.validate(input)?;
        Ok(run_analysis(input))
    }

    /// Produce the pull request title and markdown.
    pub fn generate(&self, input: &PrInput<'_>) -> Result<PrDocument> {
        self.generate_with_template(input, None)
    }

    /// Like [`generate`](Self::generate), optionally with a one-off template.
    pub fn generate_with_template(
        &self,
        input: &PrInput<'_>,
        template: Option<&str>,
    ) -> Result<PrDocument> {
        let report = self.analyze(input)?;
        let document = match template {
            Some(t) => render_document(&report, &MarkdownBuilder::new(t)),
            None => render_document(&report, &self.builder),
        };
        info!(
            title = %document.title,
            bytes = document.markdown.len(),
            "pull request generated"
        );
        Ok(document)
    }

    /// Parse issue text alone.
    pub fn parse_issue(&self, text: &str) -> Result<IssueIntent> {
        self.validate_input_size("issue", text)?;
        Ok(issue::parse_issue(text))
    }
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        warn!(template = %path.display(), error = %e, "template unreadable");
        match e.kind() {
            std::io::ErrorKind::NotFound => {
                ScribeError::file_not_found(&path.display().to_string()).into()
            }
            _ => anyhow::Error::new(e)
                .context(format!("Failed to read template: {}", path.display())),
        }
    })
}

/// The analysis pipeline. Pure: a fresh set of values per call.
fn run_analysis(input: &PrInput<'_>) -> AnalysisReport {
    let parsed = diff::parse_unified_diff(input.diff);
    let semantics = semantics::analyze(&parsed);
    let issue = issue::parse_issue(input.issue);
    let classification = classifier::classify(&issue, &semantics);
    let impact = impact::analyze_impact(ImpactStats::aggregate(&parsed));

    let file_category = match input.files {
        Some(paths) => files::categorize_files(paths),
        None => files::categorize_files(&parsed.keys().collect::<Vec<_>>()),
    };

    debug!(
        files = parsed.len(),
        intent = %issue.intent,
        risk = %impact.risk_level,
        "analysis complete"
    );

    AnalysisReport {
        title: title(&classification, &parsed),
        diff_summary: files::diff_summary(input.diff),
        files: parsed,
        semantics,
        issue,
        classification,
        impact,
        file_category,
    }
}

fn render_document(report: &AnalysisReport, builder: &MarkdownBuilder) -> PrDocument {
    let mut sections = Sections::new();
    sections.insert("title".into(), report.title.clone());
    sections.insert("change".into(), change::write_changes(&report.semantics));
    sections.insert(
        "context".into(),
        context::write_context(&report.issue, &report.classification),
    );
    sections.insert(
        "impact".into(),
        crate::render::impact::write_impact(&report.impact, &report.classification),
    );
    sections.insert(
        "checklist".into(),
        checklist::build_checklist(&report.classification),
    );

    PrDocument {
        title: report.title.clone(),
        markdown: builder.build(&sections),
    }
}
