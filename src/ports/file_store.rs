//! Filesystem operations the file resources are built on.

use std::path::Path;

use crate::domain::{AppError, FileMode, FileSnapshot, WriteOutcome, WriteRequest};

/// Port for single-file storage.
///
/// All paths are absolute; resolution against a resource root happens before
/// a store is called.
pub trait FileStore {
    /// Read a regular file and its metadata in full.
    fn inspect(&self, path: &Path) -> Result<FileSnapshot, AppError>;

    /// Replace the file at `request.destination` atomically.
    fn write(&self, request: &WriteRequest) -> Result<WriteOutcome, AppError>;

    /// Change permissions of an existing file without touching its contents.
    fn set_mode(&self, path: &Path, mode: FileMode) -> Result<(), AppError>;

    /// Remove a file. Returns `false` if it was already absent.
    fn remove(&self, path: &Path) -> Result<bool, AppError>;
}
