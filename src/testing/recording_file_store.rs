use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, FileMode, FileSnapshot, WriteOutcome, WriteRequest};
use crate::ports::FileStore;
use crate::services::LocalFileStore;

/// A call observed by [`RecordingFileStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Inspect(PathBuf),
    Write(PathBuf),
    SetMode(PathBuf, FileMode),
    Remove(PathBuf),
}

/// Local file store that records every call it forwards.
#[derive(Default)]
pub struct RecordingFileStore {
    inner: LocalFileStore,
    calls: RefCell<Vec<StoreCall>>,
}

#[allow(dead_code)]
impl RecordingFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }
}

impl FileStore for RecordingFileStore {
    fn inspect(&self, path: &Path) -> Result<FileSnapshot, AppError> {
        self.calls.borrow_mut().push(StoreCall::Inspect(path.to_path_buf()));
        self.inner.inspect(path)
    }

    fn write(&self, request: &WriteRequest) -> Result<WriteOutcome, AppError> {
        self.calls.borrow_mut().push(StoreCall::Write(request.destination.clone()));
        self.inner.write(request)
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> Result<(), AppError> {
        self.calls.borrow_mut().push(StoreCall::SetMode(path.to_path_buf(), mode));
        self.inner.set_mode(path, mode)
    }

    fn remove(&self, path: &Path) -> Result<bool, AppError> {
        self.calls.borrow_mut().push(StoreCall::Remove(path.to_path_buf()));
        self.inner.remove(path)
    }
}
