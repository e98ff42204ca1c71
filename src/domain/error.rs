use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Step of the staging phase of an atomic write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStep {
    CreateDir,
    CreateFile,
    Write,
    Sync,
}

impl fmt::Display for TempStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TempStep::CreateDir => "create temp dir",
            TempStep::CreateFile => "create temp file",
            TempStep::Write => "write",
            TempStep::Sync => "sync",
        };
        f.write_str(label)
    }
}

/// Library-wide error type for fsres operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure outside a named step.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// `~` could not be expanded.
    #[error("failed to expand homedir in '{path}': {reason}")]
    HomeDirExpansion { path: String, reason: String },

    /// Path could not be turned into an absolute, representable path.
    #[error("failed to expand path '{path}': {reason}")]
    PathExpansion { path: String, reason: String },

    /// No relative path exists between the root and the target.
    #[error("failed to get path '{}' relative to root '{}'", path.display(), root.display())]
    PathRelativization { path: PathBuf, root: PathBuf },

    /// File does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// File exists but could not be opened or stat'ed.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File was opened but reading it failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is a directory", path.display())]
    IsDirectory { path: PathBuf },

    #[error("{} is too large ({size} bytes > {limit} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Permission string is not an octal mode.
    #[error("failed to parse mode '{value}': {reason}")]
    InvalidMode { value: String, reason: String },

    #[error("no parent directory for {}", path.display())]
    NoParentDirectory { path: PathBuf },

    /// Staging file or directory failure.
    #[error("failed to {step} for {}: {source}", path.display())]
    TempIo {
        step: TempStep,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to make parent directory {}: {source}", path.display())]
    MkdirParent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Existing destination could not be stat'ed while inferring permissions.
    #[error("failed to stat file {}: {source}", path.display())]
    ModeLookup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to chmod {}: {source}", path.display())]
    Chmod {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Required attribute absent from the attribute bag.
    #[error("missing required attribute '{0}'")]
    MissingAttribute(String),

    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// Resource kind has no in-place update.
    #[error("resource '{kind}' does not support in-place update")]
    UpdateUnsupported { kind: String },

    /// Identity-affecting attribute changed; the resource must be recreated.
    #[error("attribute '{0}' cannot change in place; the resource must be replaced")]
    ReplacementRequired(String),

    /// Resource has no identity yet (never created, or already deleted).
    #[error("resource has no identity")]
    MissingIdentity,

    #[error("state file {}: {reason}", path.display())]
    StateFile { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn invalid_attribute<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        AppError::InvalidAttribute { name: name.into(), reason: reason.into() }
    }

    /// True when the managed file no longer exists, i.e. the resource is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}
