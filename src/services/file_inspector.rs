use std::fs::{self, File};
use std::io::{self, Read};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, FileMode, FileSnapshot};

/// Largest file that will be read. Contents are always held fully in memory.
pub const FILE_SIZE_LIMIT: u64 = 1024 * 1024 * 1024;

/// Reads a regular file and its metadata.
#[derive(Debug, Clone, Copy)]
pub struct FileInspector {
    size_limit: u64,
}

impl Default for FileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector {
    pub fn new() -> Self {
        Self { size_limit: FILE_SIZE_LIMIT }
    }

    pub fn with_size_limit(size_limit: u64) -> Self {
        Self { size_limit }
    }

    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    pub fn inspect(&self, path: &Path) -> Result<FileSnapshot, AppError> {
        // Classify before opening: opening a FIFO for reading would block.
        let metadata = fs::metadata(path).map_err(|source| open_error(path, source))?;
        if metadata.is_dir() {
            return Err(AppError::IsDirectory { path: path.to_path_buf() });
        }
        if !metadata.is_file() {
            return Err(AppError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        let file = File::open(path).map_err(|source| open_error(path, source))?;
        let metadata = file.metadata().map_err(|source| open_error(path, source))?;
        if metadata.len() > self.size_limit {
            return Err(AppError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.size_limit,
            });
        }

        let mut contents = Vec::with_capacity(metadata.len() as usize);
        // The file may grow between stat and read; never read past the limit.
        file.take(self.size_limit + 1)
            .read_to_end(&mut contents)
            .map_err(|source| AppError::Read { path: path.to_path_buf(), source })?;
        let size = contents.len() as u64;
        if size > self.size_limit {
            return Err(AppError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.size_limit,
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mode = FileMode::from_raw(metadata.permissions().mode());
        debug!(path = %path.display(), size, %mode, "inspected file");

        Ok(FileSnapshot { name, contents, size, mode })
    }
}

fn open_error(path: &Path, source: io::Error) -> AppError {
    if source.kind() == io::ErrorKind::NotFound {
        AppError::NotFound { path: path.to_path_buf() }
    } else {
        AppError::Open { path: path.to_path_buf(), source }
    }
}
