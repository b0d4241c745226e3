//! Diagnostic logging setup.
//!
//! Everything in the crate reports through `tracing`; this module only decides
//! where those events go. The full-screen UI must never write to the terminal
//! it is drawing on, so it logs to a file instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::config::io::project_dirs;

pub const DEFAULT_DIRECTIVE: &str = "info";
const LOG_FILE_NAME: &str = "relaychat.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// File target for the interactive UI: the explicit path if given,
    /// otherwise `relaychat.log` in the platform data directory.
    pub fn for_tui(explicit: Option<PathBuf>) -> Option<Self> {
        explicit
            .or_else(default_log_path)
            .map(LogTarget::File)
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub(crate) fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Calling it twice is harmless; the second
/// call leaves the first subscriber in place.
pub fn init_tracing(target: &LogTarget) -> Result<(), Box<dyn std::error::Error>> {
    let filter = env_filter(DEFAULT_DIRECTIVE);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_log_file_creates_missing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("logs").join("relaychat.log");

        open_log_file(&path).expect("log file should open");
        assert!(path.exists());
    }

    #[test]
    fn explicit_tui_log_path_wins() {
        let path = PathBuf::from("/tmp/relaychat-test.log");
        assert_eq!(
            LogTarget::for_tui(Some(path.clone())),
            Some(LogTarget::File(path))
        );
    }
}
