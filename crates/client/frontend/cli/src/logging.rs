//! File logging for the terminal client.
//!
//! The TUI owns stdout, so tracing output goes to a per-session log file only.
use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "client.log";

/// Installs the global subscriber writing to `<log_dir>/<session>/client.log`.
///
/// Returns the path of the log file.
pub fn setup_logging(log_dir: Option<&Path>, uid: &str) -> Result<PathBuf> {
    let session_dir = session_log_dir(log_dir.map(Path::to_path_buf), uid);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("failed to create log directory {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(true); // colorized `tail -f`

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    // The writer must outlive every span; the process exits right after the UI.
    std::mem::forget(guard);

    let log_file = session_dir.join(LOG_FILE);
    tracing::info!(uid, log_file = %log_file.display(), "logging initialized");
    Ok(log_file)
}

/// `<base>/session_<uid>_<unix secs>`, with `<base>` falling back to the
/// platform data directory and then the temp dir.
pub fn session_log_dir(base: Option<PathBuf>, uid: &str) -> PathBuf {
    let base = base.unwrap_or_else(default_log_dir);
    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    base.join(format!("session_{}_{started}", sanitize(uid)))
}

fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "lockdown")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("lockdown").join("logs"))
}

fn sanitize(uid: &str) -> String {
    uid.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_dir_lives_under_base() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = session_log_dir(Some(tmp.path().to_path_buf()), "user/42");

        assert!(dir.starts_with(tmp.path()));
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("session_user_42_"), "{name}");
    }
}
