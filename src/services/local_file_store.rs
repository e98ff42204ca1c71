use std::fs::{self, Permissions};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::domain::{AppError, FileMode, FileSnapshot, WriteOutcome, WriteRequest};
use crate::ports::FileStore;

use super::{AtomicWriter, FileInspector};

/// File store backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalFileStore {
    inspector: FileInspector,
    writer: AtomicWriter,
}

impl LocalFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(inspector: FileInspector, writer: AtomicWriter) -> Self {
        Self { inspector, writer }
    }
}

impl FileStore for LocalFileStore {
    fn inspect(&self, path: &Path) -> Result<FileSnapshot, AppError> {
        self.inspector.inspect(path)
    }

    fn write(&self, request: &WriteRequest) -> Result<WriteOutcome, AppError> {
        self.writer.write(request)
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> Result<(), AppError> {
        fs::set_permissions(path, Permissions::from_mode(mode.bits())).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AppError::NotFound { path: path.to_path_buf() }
            } else {
                AppError::Chmod { path: path.to_path_buf(), source }
            }
        })
    }

    fn remove(&self, path: &Path) -> Result<bool, AppError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AppError::Delete { path: path.to_path_buf(), source }),
        }
    }
}
