use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::app::AppContext;
use crate::domain::PathContext;
use crate::ports::FileStore;
use crate::services::LocalFileStore;

/// Temporary directory acting as working directory, with `home/` as HOME.
pub struct Sandbox {
    dir: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create sandbox");
        fs::create_dir(dir.path().join("home")).expect("failed to create sandbox home");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `contents` at `rel` with exact permission bits, creating parents.
    pub fn write(&self, rel: &str, contents: &str, mode: u32) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn mode_of(&self, rel: &str) -> u32 {
        fs::metadata(self.path(rel)).unwrap().permissions().mode() & 0o7777
    }

    pub fn paths(&self) -> PathContext {
        PathContext::new(self.dir.path(), Some(self.path("home")))
    }

    pub fn context(&self) -> AppContext<LocalFileStore> {
        self.context_with(LocalFileStore::new())
    }

    pub fn context_with<F: FileStore>(&self, store: F) -> AppContext<F> {
        AppContext::new(store, self.paths())
    }
}
