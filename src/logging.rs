//! File logging for the binary.
//!
//! The overlay owns the terminal, so log output goes to
//! `<cache dir>/frz-grid.log` instead of stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::app_dirs;

pub const LOG_FILE_NAME: &str = "frz-grid.log";
const DEFAULT_FILTER: &str = "frz_grid=info,frz_grid_core=info,frz_grid_tui=info";

/// Where the log file lives.
pub fn log_path() -> Result<PathBuf> {
	Ok(app_dirs::get_cache_dir()?.join(LOG_FILE_NAME))
}

/// Install the global subscriber. Logs are flushed when the guard drops.
pub fn initialize() -> Result<WorkerGuard> {
	let path = log_path()?;
	let log_file = open_log_file(&path)?;
	let (writer, guard) = non_blocking(log_file);

	// RUST_LOG wins over the default filter.
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(writer)
		.with_target(true)
		.with_ansi(false)
		.with_filter(env_filter);

	tracing_subscriber::registry()
		.with(file_layer)
		.try_init()
		.context("failed to install the log subscriber")?;
	tracing::debug!(path = %path.display(), "logging initialized");
	Ok(guard)
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
	if let Some(dir) = path.parent() {
		std::fs::create_dir_all(dir)
			.with_context(|| format!("failed to create log directory {}", dir.display()))?;
	}
	let mut options = OpenOptions::new();
	options.create(true).append(true);
	// Only the current user may read the log.
	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o600);
	}
	options
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))
}
