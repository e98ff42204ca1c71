//! Runtime configuration resolved from the process environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, PathContext};

/// Overrides the state file location.
pub const STATE_ENV: &str = "FSRES_STATE";
/// Log filter directives for the binary.
pub const LOG_ENV: &str = "FSRES_LOG";
pub const DEFAULT_STATE_FILE: &str = "fsres.state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    paths: PathContext,
    state_path: PathBuf,
}

impl Config {
    /// Read the working directory, `HOME` and `FSRES_STATE`.
    pub fn from_env() -> Result<Self, AppError> {
        let working_dir = env::current_dir().map_err(|e| {
            AppError::config_error(format!("cannot determine working directory: {e}"))
        })?;
        let home_dir = env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from);

        let config = Self::with_paths(PathContext::new(working_dir, home_dir));
        match env::var_os(STATE_ENV).filter(|s| !s.is_empty()) {
            Some(state) => Ok(config.with_state_path(state)),
            None => Ok(config),
        }
    }

    /// Configuration for explicit directories, with the default state file.
    pub fn with_paths(paths: PathContext) -> Self {
        let state_path = paths.working_dir().join(DEFAULT_STATE_FILE);
        Self { paths, state_path }
    }

    /// Use `path` for state; relative paths are taken from the working directory.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.state_path =
            if path.is_absolute() { path } else { self.paths.working_dir().join(path) };
        self
    }

    pub fn paths(&self) -> &PathContext {
        &self.paths
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}
