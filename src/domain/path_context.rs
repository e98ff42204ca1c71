use std::path::{Path, PathBuf};

/// Ambient directories used for path expansion, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Base for relative paths and the default root. Must be absolute.
    pub working_dir: PathBuf,
    /// Target of `~` expansion; `None` when it cannot be determined.
    pub home_dir: Option<PathBuf>,
}

impl PathContext {
    pub fn new(working_dir: impl Into<PathBuf>, home_dir: Option<PathBuf>) -> Self {
        Self { working_dir: working_dir.into(), home_dir }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }
}
