//! Crash-safe replacement of a file's contents and permissions.
//!
//! Contents are staged in a private directory on the destination's volume,
//! synced, and renamed over the destination in one step, so a concurrent
//! reader sees either the old or the new file. When the rename would cross
//! devices the writer falls back to copy-then-delete, which is NOT atomic:
//! a reader may observe a partially copied destination. The outcome reports
//! which path was taken.

use std::fmt;
use std::fs::{self, DirBuilder, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::domain::{AppError, FileMode, Relocation, TempStep, WriteOutcome, WriteRequest};

const STAGING_PREFIX: &str = ".fsres-";

/// Callback run with the staged file's path just before relocation.
pub type StagingHook = Arc<dyn Fn(&Path) + Send + Sync>;

/// Writes files through a staging directory and an atomic rename.
#[derive(Clone, Default)]
pub struct AtomicWriter {
    staging_hook: Option<StagingHook>,
}

impl fmt::Debug for AtomicWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicWriter")
            .field("staging_hook", &self.staging_hook.is_some())
            .finish()
    }
}

impl AtomicWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` after staging completes and before the rename.
    pub fn with_staging_hook(mut self, hook: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        self.staging_hook = Some(Arc::new(hook));
        self
    }

    pub fn write(&self, request: &WriteRequest) -> Result<WriteOutcome, AppError> {
        self.write_with(request, |from, to| fs::rename(from, to))
    }

    pub(crate) fn write_with<R>(
        &self,
        request: &WriteRequest,
        rename: R,
    ) -> Result<WriteOutcome, AppError>
    where
        R: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        let destination = request.destination.as_path();
        let file_name = destination.file_name().ok_or_else(|| AppError::PathExpansion {
            path: destination.display().to_string(),
            reason: "destination has no file name".to_string(),
        })?;
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Removed on drop, whichever way this function exits.
        let staging = create_staging_dir(parent)?;
        let staged = staging.path().join(file_name);
        write_staged(&staged, &request.contents)?;
        debug!(staged = %staged.display(), bytes = request.contents.len(), "staged contents");

        let mode = effective_mode(request)?;
        ensure_parent(parent, request.create_parent_dirs, destination)?;

        if let Some(hook) = &self.staging_hook {
            hook(&staged);
        }

        let relocation = relocate(&staged, destination, rename)?;

        fs::set_permissions(destination, Permissions::from_mode(mode.bits()))
            .map_err(|source| AppError::Chmod { path: destination.to_path_buf(), source })?;

        debug!(destination = %destination.display(), %mode, ?relocation, "wrote file");
        Ok(WriteOutcome { relocation, mode })
    }
}

/// Private directory next to the destination, falling back to the system
/// temp directory when the destination's volume refuses it.
fn create_staging_dir(parent: &Path) -> Result<TempDir, AppError> {
    let anchor = nearest_existing_dir(parent);
    match tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir_in(&anchor) {
        Ok(dir) => Ok(dir),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem
            ) =>
        {
            warn!(
                anchor = %anchor.display(),
                error = %err,
                "cannot stage next to destination; using system temp dir"
            );
            tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir().map_err(|source| {
                AppError::TempIo { step: TempStep::CreateDir, path: std::env::temp_dir(), source }
            })
        }
        Err(source) => Err(AppError::TempIo { step: TempStep::CreateDir, path: anchor, source }),
    }
}

fn nearest_existing_dir(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir)
}

fn write_staged(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let temp_err = |step| {
        let path = path.to_path_buf();
        move |source| AppError::TempIo { step, path, source }
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
        .map_err(temp_err(TempStep::CreateFile))?;
    file.write_all(contents).map_err(temp_err(TempStep::Write))?;
    file.sync_all().map_err(temp_err(TempStep::Sync))?;
    // Closed before the rename; std has no fallible close to report.
    drop(file);
    Ok(())
}

/// Requested permissions, else the destination's current ones, else 0644.
fn effective_mode(request: &WriteRequest) -> Result<FileMode, AppError> {
    if let Some(mode) = request.explicit_permissions() {
        return Ok(mode);
    }
    match fs::metadata(&request.destination) {
        Ok(metadata) => Ok(FileMode::from_raw(metadata.permissions().mode())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FileMode::DEFAULT_FILE),
        Err(source) => {
            Err(AppError::ModeLookup { path: request.destination.clone(), source })
        }
    }
}

fn ensure_parent(parent: &Path, create: bool, destination: &Path) -> Result<(), AppError> {
    match fs::metadata(parent) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        _ => return Ok(()),
    }
    if !create {
        return Err(AppError::NoParentDirectory { path: destination.to_path_buf() });
    }
    DirBuilder::new()
        .recursive(true)
        .mode(FileMode::PARENT_DIR.bits())
        .create(parent)
        .map_err(|source| AppError::MkdirParent { path: parent.to_path_buf(), source })?;
    debug!(parent = %parent.display(), "created parent directories");
    Ok(())
}

fn relocate<R>(staged: &Path, destination: &Path, rename: R) -> Result<Relocation, AppError>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let move_err = |source| AppError::Move {
        from: staged.to_path_buf(),
        to: destination.to_path_buf(),
        source,
    };

    match rename(staged, destination) {
        Ok(()) => Ok(Relocation::Renamed),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            warn!(
                destination = %destination.display(),
                "rename crosses devices; copying instead, write is not atomic"
            );
            fs::copy(staged, destination).map_err(move_err)?;
            fs::remove_file(staged).map_err(move_err)?;
            Ok(Relocation::Copied)
        }
        Err(source) => Err(move_err(source)),
    }
}
