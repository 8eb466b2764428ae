//! File logging with daily rotation in the local timezone.

use anyhow::Result;
use logroller::{LogRollerBuilder, Rotation, RotationAge, TimeZone};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use time::macros::format_description;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;

use crate::config::Config;

/// Log file name prefix: `pr-scribe.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "pr-scribe";

/// Age limit for [`cleanup_old_logs`], matching the appender's three kept files.
const RETENTION_DAYS: u64 = 3;

/// Environment variable overriding [`DEFAULT_DIRECTIVES`].
const LOG_ENV_VAR: &str = "PR_SCRIBE_LOG";

/// Pipeline stages at debug; dependencies (rmcp, tokio) only when they warn.
const DEFAULT_DIRECTIVES: &str = "warn,pr_scribe=debug";

/// Initialize the logging system.
pub fn init(config: &Config) -> Result<()> {
    if !config.log_path.exists() {
        fs::create_dir_all(&config.log_path)?;
    }

    cleanup_old_logs(&config.log_path)?;

    let appender = LogRollerBuilder::new(config.log_path.as_path(), Path::new(LOG_FILE_PREFIX))
        .rotation(Rotation::AgeBased(RotationAge::Daily))
        .time_zone(TimeZone::Local)
        .max_keep_files(3)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create log roller: {}", e))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, time_format);

    let subscriber = tracing_subscriber::registry()
        .with(log_filter(std::env::var(LOG_ENV_VAR).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(timer),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    // The writer thread must outlive every log call
    std::mem::forget(guard);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_path = %config.log_path.display(),
        "logging initialized"
    );
    Ok(())
}

/// `directives` when they parse, else [`DEFAULT_DIRECTIVES`].
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Remove pr-scribe log files older than [`RETENTION_DAYS`].
pub fn cleanup_old_logs(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let cutoff = SystemTime::now() - Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60);

    for entry in fs::read_dir(log_path)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !is_own_log_file(&path) {
            continue;
        }

        if let Ok(metadata) = entry.metadata()
            && let Ok(modified) = metadata.modified()
            && modified < cutoff
        {
            let _ = fs::remove_file(&path);
        }
    }

    Ok(())
}

fn is_own_log_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn set_file_modified_time(path: &Path, time: SystemTime) -> std::io::Result<()> {
        let secs = time.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs();
        let stamp = libc::timespec {
            tv_sec: secs as libc::time_t,
            tv_nsec: 0,
        };
        let times = [stamp, stamp];
        let c_path = std::ffi::CString::new(path.to_str().unwrap()).unwrap();
        let ret = unsafe { libc::utimensat(libc::AT_FDCWD, c_path.as_ptr(), times.as_ptr(), 0) };
        if ret == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }

    fn age_file(path: &Path, days: u32) {
        set_file_modified_time(path, SystemTime::now() - DAY * days).unwrap();
    }

    #[test]
    fn test_cleanup_removes_old_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path();

        let old_file = log_path.join("pr-scribe.2020-01-01");
        fs::write(&old_file, "old log").unwrap();
        age_file(&old_file, 4);

        let recent_file = log_path.join("pr-scribe.2026-10-17");
        fs::write(&recent_file, "recent log").unwrap();

        cleanup_old_logs(log_path).unwrap();

        assert!(!old_file.exists(), "Old log file should be deleted");
        assert!(recent_file.exists(), "Recent log file should be kept");
    }

    #[test]
    fn test_cleanup_ignores_foreign_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path();

        let other_file = log_path.join("other-app.log");
        fs::write(&other_file, "other log").unwrap();
        age_file(&other_file, 4);

        cleanup_old_logs(log_path).unwrap();

        assert!(other_file.exists(), "Foreign file should be kept");
    }

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let result = cleanup_old_logs(Path::new("/tmp/nonexistent_pr_scribe_test_dir"));
        assert!(result.is_ok(), "Should return Ok for nonexistent directory");
    }

    #[test]
    fn test_cleanup_ignores_subdirectories() {
        let dir = tempfile::TempDir::new().unwrap();
        let subdir = dir.path().join("pr-scribe.subdir");
        fs::create_dir(&subdir).unwrap();

        cleanup_old_logs(dir.path()).unwrap();

        assert!(subdir.exists(), "Subdirectory should not be deleted");
    }

    #[test]
    fn test_log_filter_defaults_to_crate_debug() {
        let default = EnvFilter::new(DEFAULT_DIRECTIVES).to_string();
        assert_eq!(log_filter(None).to_string(), default);
        assert_eq!(log_filter(Some("pr_scribe=loud")).to_string(), default);
        assert_eq!(
            log_filter(Some("pr_scribe=info")).to_string(),
            EnvFilter::new("pr_scribe=info").to_string()
        );
    }

    #[test]
    fn test_own_log_file_prefix() {
        assert!(is_own_log_file(Path::new("/logs/pr-scribe.2026-10-18")));
        assert!(!is_own_log_file(Path::new("/logs/other-tool.log")));
    }
}
