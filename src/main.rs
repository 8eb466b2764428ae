use anyhow::Result;
use camino::Utf8Path;
use clap::Parser;
use rayon::prelude::*;

use pr_scribe::cli::{Cli, Commands, InputArgs};
use pr_scribe::config::ConfigService;
use pr_scribe::error::{ErrorCode, ScribeError};
use pr_scribe::models::request::{Command, PrRequest};
use pr_scribe::service::{AppService, PrInput};
use pr_scribe::session;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        println!("{}", session::error_from(&e));
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn serialize_output(value: &impl serde::Serialize, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn read_input_file(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScribeError::file_not_found(path.as_str()).into(),
        _ => ScribeError::new(ErrorCode::IoError, format!("Failed to read {path}: {e}")).into(),
    })
}

fn read_stdin() -> Result<String> {
    use std::io::Read;
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Diff and issue text plus the optional changed-file list.
struct ResolvedInput {
    diff: String,
    issue: String,
    files: Option<Vec<String>>,
}

impl ResolvedInput {
    fn as_input(&self) -> PrInput<'_> {
        PrInput {
            diff: &self.diff,
            issue: &self.issue,
            files: self.files.as_deref(),
        }
    }
}

fn resolve_input(args: &InputArgs) -> Result<ResolvedInput> {
    let diff = if let Some(d) = &args.diff {
        d.clone()
    } else if let Some(df) = &args.diff_file {
        read_input_file(df)?
    } else {
        read_stdin()?
    };

    let issue = if let Some(i) = &args.issue {
        i.clone()
    } else if let Some(f) = &args.issue_file {
        read_input_file(f)?
    } else {
        String::new()
    };

    let files = args.files.as_deref().map(|fs| {
        fs.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    Ok(ResolvedInput { diff, issue, files })
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<()> {
    let pretty = cli.pretty;

    // Load configuration
    let config = ConfigService::load(cli.config.as_deref())?;

    // Initialize logging if debug mode (CLI flag or config)
    if cli.debug || config.debug {
        pr_scribe::logger::init(&config)?;
    }

    // Handle early-exit commands before creating AppService
    if let Commands::Init { path } = &cli.command {
        let config_path = if let Some(p) = path {
            ConfigService::generate_at(p)?;
            p.clone()
        } else {
            ConfigService::generate_default()?;
            ConfigService::default_path()
        };
        eprintln!("Configuration file created at: {}", config_path.display());
        return Ok(());
    }

    match cli.command {
        Commands::Generate {
            input,
            template,
            json,
        } => {
            let service = AppService::new()
                .configured(&config, template.as_deref().map(Utf8Path::as_std_path))?;
            cmd_generate(&service, &input, json, pretty)
        }
        Commands::Analyze { input } => cmd_analyze(&AppService::new(), &input, pretty),
        Commands::Issue { text, file } => {
            let text = match (text, file) {
                (Some(t), _) => t,
                (None, Some(f)) => read_input_file(&f)?,
                (None, None) => read_stdin()?,
            };
            let intent = AppService::new().parse_issue(&text)?;
            println!("{}", serialize_output(&intent, pretty)?);
            Ok(())
        }
        Commands::Batch { requests_file } => {
            let service = AppService::new().configured(&config, None)?;
            cmd_batch(&service, &requests_file)
        }
        Commands::Session => {
            let service = AppService::bounded().configured(&config, None)?;
            session::run_session(|req| handle_request(&service, req))
        }
        Commands::Mcp => cmd_mcp(AppService::bounded().configured(&config, None)?),
        Commands::Init { .. } => unreachable!("handled above"),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_generate(service: &AppService, args: &InputArgs, json: bool, pretty: bool) -> Result<()> {
    let resolved = resolve_input(args)?;
    let document = service.generate(&resolved.as_input())?;
    if json {
        println!("{}", serialize_output(&document, pretty)?);
    } else {
        println!("{}", document.markdown);
    }
    Ok(())
}

fn cmd_analyze(service: &AppService, args: &InputArgs, pretty: bool) -> Result<()> {
    let resolved = resolve_input(args)?;
    let report = service.analyze(&resolved.as_input())?;
    println!("{}", serialize_output(&report, pretty)?);
    Ok(())
}

fn cmd_mcp(service: AppService) -> Result<()> {
    use rmcp::ServiceExt;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = pr_scribe::mcp::PrScribeServer::with_service(service);
        let transport = rmcp::transport::io::stdio();
        let service = server
            .serve(transport)
            .await
            .map_err(|e| anyhow::anyhow!("MCP server initialization failed: {e}"))?;
        service
            .waiting()
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))?;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Batch processing (NDJSON output, rayon parallel)
// ---------------------------------------------------------------------------

fn cmd_batch(service: &AppService, requests_file: &Utf8Path) -> Result<()> {
    let content = read_input_file(requests_file)?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let results: Vec<String> = lines
        .par_iter()
        .map(|line| {
            let value = match serde_json::from_str::<PrRequest>(line) {
                Ok(req) => handle_request(service, req).unwrap_or_else(|e| session::error_from(&e)),
                Err(e) => session::error_from(&anyhow::Error::from(
                    ScribeError::invalid_request(format!("Invalid JSON request: {e}")),
                )),
            };
            value.to_string()
        })
        .collect();

    for line in &results {
        println!("{line}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Request handler (session / batch)
// ---------------------------------------------------------------------------

fn handle_request(service: &AppService, req: PrRequest) -> Result<serde_json::Value> {
    let input = PrInput {
        diff: &req.diff,
        issue: &req.issue,
        files: req.files.as_deref(),
    };

    match req.command {
        Command::Generate => {
            let document = service.generate_with_template(&input, req.template.as_deref())?;
            Ok(serde_json::to_value(document)?)
        }
        Command::Analyze => {
            let report = service.analyze(&input)?;
            Ok(serde_json::to_value(report)?)
        }
        Command::Issue => {
            let intent = service.parse_issue(&req.issue)?;
            Ok(serde_json::to_value(intent)?)
        }
    }
}
