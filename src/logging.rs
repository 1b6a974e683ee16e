use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::EnvFilter;

use crate::app_dirs::AppDirs;

/// Overrides where log lines are appended
pub const LOG_PATH_ENV: &str = "TOCK_LOG_PATH";

fn log_path() -> Option<PathBuf> {
    std::env::var_os(LOG_PATH_ENV)
        .map(PathBuf::from)
        .or_else(AppDirs::log_path)
}

/// Send tracing output to a file; the terminal belongs to the UI.
/// Logging is best effort: if no file can be opened, events are dropped.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
}
