use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pr-scribe",
    version,
    about = "Turns a unified diff and an issue description into a pull-request narrative"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output (default: compact)
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Where the diff and issue text come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Inline diff string (default: read from stdin)
    #[arg(long, allow_hyphen_values = true)]
    pub diff: Option<String>,

    /// Path to a diff file
    #[arg(long, conflicts_with = "diff")]
    pub diff_file: Option<Utf8PathBuf>,

    /// Inline issue / ticket text
    #[arg(long)]
    pub issue: Option<String>,

    /// Path to a file containing the issue text
    #[arg(long, conflicts_with = "issue")]
    pub issue_file: Option<Utf8PathBuf>,

    /// Comma-separated changed file paths (default: files named in the diff)
    #[arg(long)]
    pub files: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate pull request markdown
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Markdown template file (overrides config)
        #[arg(short, long)]
        template: Option<Utf8PathBuf>,

        /// Emit {"title", "markdown"} JSON instead of raw markdown
        #[arg(long)]
        json: bool,
    },

    /// Emit every analysis stage as JSON
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Extract intent, summary and constraints from issue text
    Issue {
        /// Inline issue text
        #[arg(long)]
        text: Option<String>,

        /// Path to a file containing the issue text (default: stdin)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<Utf8PathBuf>,
    },

    /// Process an NDJSON file of requests in parallel (NDJSON output)
    Batch {
        /// File with one JSON request per line
        #[arg(long)]
        requests_file: Utf8PathBuf,
    },

    /// NDJSON streaming session (stdin → stdout)
    Session,

    /// Start MCP (Model Context Protocol) server over stdio
    Mcp,

    /// Generate default configuration file
    Init {
        /// Path to write the configuration file (default: ~/.config/pr-scribe/config.toml)
        #[arg(short, long)]
        path: Option<std::path::PathBuf>,
    },
}
