//! Log directory management
//!
//! Logs go to the platform state directory, e.g.
//! `~/.local/state/tui-settings/logs/` on Linux. Each run writes a PID-named
//! file so concurrent runs never share one. Files older than a day are removed
//! on startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

const APP_DIR: &str = "tui-settings";

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// The log directory, created on first use.
///
/// Falls back to the system temp directory when the state directory is
/// unknown or cannot be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let fallback = std::env::temp_dir().join(format!("{APP_DIR}-logs"));
        let dir = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|base| base.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| fallback.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return fallback;
        }
        dir
    })
}

/// Path of this process's log file: `{log_dir}/tui-settings-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(log_file_name(std::process::id()))
}

fn log_file_name(pid: u32) -> String {
    format!("{APP_DIR}-{pid}.log")
}

/// Remove log files of earlier runs that are older than a day.
pub fn cleanup_stale_logs() {
    cleanup_stale_logs_in_dir(log_dir(), std::process::id(), CLEANUP_AGE);
}

fn cleanup_stale_logs_in_dir(dir: &Path, current_pid: u32, age: Duration) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };
        if pid == current_pid {
            continue;
        }

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && is_file_older_than(&entry.path(), age) {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// PID of a file named like `tui-settings-12345.log`
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    name.strip_suffix(".log")?
        .strip_prefix(APP_DIR)?
        .strip_prefix('-')?
        .parse()
        .ok()
}
