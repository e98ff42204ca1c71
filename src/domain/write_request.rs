use std::path::PathBuf;

use super::FileMode;

/// Input to an atomic write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub destination: PathBuf,
    pub contents: Vec<u8>,
    pub create_parent_dirs: bool,
    /// `None` or a zero mode lets the writer infer permissions.
    pub permissions: Option<FileMode>,
}

impl WriteRequest {
    pub fn new(destination: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            destination: destination.into(),
            contents: contents.into(),
            create_parent_dirs: true,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, mode: FileMode) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Explicit, non-zero permissions, if any.
    pub fn explicit_permissions(&self) -> Option<FileMode> {
        self.permissions.filter(|mode| !mode.is_unset())
    }
}

/// How the staged file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Single atomic rename.
    Renamed,
    /// Cross-device copy followed by removal of the staged file. Not atomic.
    Copied,
}

/// Result of a completed atomic write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub relocation: Relocation,
    /// Permissions applied to the destination.
    pub mode: FileMode,
}

impl WriteOutcome {
    pub fn is_atomic(&self) -> bool {
        self.relocation == Relocation::Renamed
    }
}
