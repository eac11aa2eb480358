//! File logging for the console client.
//!
//! Logs go to a per-session file so stdout stays reserved for the game.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_NAME: &str = "kings-pk";
const LOG_FILE: &str = "client.log";

/// Installs the global subscriber writing to `<log dir>/<session>/client.log`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the lifetime of the process.
pub fn setup_logging(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id
        .map(str::to_owned)
        .unwrap_or_else(default_session_id);

    // Create session-specific log directory
    let session_log_dir = log_directory().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer only; stdout belongs to the console UI
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("Log file: {}/{}", session_log_dir.display(), LOG_FILE);

    Ok(guard)
}

/// `LOG_DIR` if set, otherwise the platform cache directory.
///
/// - macOS: `~/Library/Caches/kings-pk/logs`
/// - Linux: `~/.cache/kings-pk/logs` (or `$XDG_CACHE_HOME/kings-pk/logs`)
/// - Windows: `%LOCALAPPDATA%\kings-pk\cache\logs`
pub fn log_directory() -> PathBuf {
    if let Some(dir) = env::var_os("LOG_DIR").filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join(APP_NAME))
        .join("logs")
}

fn default_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}
