use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::error::{ErrorCode, ScribeError};
use crate::models::request::PrRequest;

/// Maximum line size for session input: 100 MB.
const MAX_LINE_SIZE: usize = 100 * 1024 * 1024;

/// Run an NDJSON streaming session: read requests from stdin, process, write responses to stdout.
pub fn run_session(handler: impl Fn(PrRequest) -> Result<serde_json::Value>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    serve(stdin.lock(), &mut out, handler)
}

/// Session loop over arbitrary reader / writer. One response line per non-blank request line.
pub fn serve<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    handler: impl Fn(PrRequest) -> Result<serde_json::Value>,
) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = if trimmed.len() > MAX_LINE_SIZE {
            error_value(
                ErrorCode::InvalidRequest,
                format!(
                    "Input line exceeds maximum size ({} bytes > {} bytes)",
                    trimmed.len(),
                    MAX_LINE_SIZE
                ),
            )
        } else {
            match serde_json::from_str::<PrRequest>(trimmed) {
                Ok(req) => handler(req).unwrap_or_else(|e| error_from(&e)),
                Err(e) => error_value(
                    ErrorCode::InvalidRequest,
                    format!("Invalid JSON request: {e}"),
                ),
            }
        };

        serde_json::to_writer(&mut *out, &response)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(())
}

/// `{"error": {"code": .., "message": ..}}` for an arbitrary failure.
pub fn error_from(e: &anyhow::Error) -> serde_json::Value {
    match e.downcast_ref::<ScribeError>() {
        Some(se) => error_value(se.code, se.message.clone()),
        None => error_value(ErrorCode::IoError, e.to_string()),
    }
}

fn error_value(code: ErrorCode, message: String) -> serde_json::Value {
    serde_json::json!({
        "error": { "code": code.to_string(), "message": message }
    })
}
