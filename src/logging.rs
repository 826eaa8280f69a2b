use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_FILE_NAME: &str = "budgetflow.log";

/// Install the global subscriber when a log filter is configured.
///
/// The terminal UI owns stdout and stderr, so events are appended to a file.
pub(crate) fn init(config: &Config) -> Result<()> {
    let Some(filter) = config.log_filter.as_deref() else {
        return Ok(());
    };

    let path = match &config.log_file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };
    let file = open_log_file(&path)?;
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter: {filter}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

fn default_log_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetflow", "BudgetFlow")
        .context("Could not determine data directory")?;
    Ok(proj_dirs.data_dir().join(LOG_FILE_NAME))
}

pub(crate) fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))
}
