//! Shared testing harness for `fsres` integration tests.

use assert_cmd::Command;
use serde_json::Value;
use std::fs::{self, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory and `$HOME`.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create test home");
        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Path to the working directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `fsres` binary within the working directory.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("fsres").expect("Failed to locate fsres binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env_remove("FSRES_STATE")
            .env_remove("FSRES_LOG");
        cmd
    }

    pub(crate) fn path(&self, rel: &str) -> PathBuf {
        self.work_dir.join(rel)
    }

    /// Default state file location.
    pub(crate) fn state_path(&self) -> PathBuf {
        self.path("fsres.state.json")
    }

    /// Parsed contents of the state file.
    pub(crate) fn state(&self) -> Value {
        let raw = fs::read_to_string(self.state_path()).expect("Failed to read state file");
        serde_json::from_str(&raw).expect("State file should be valid JSON")
    }

    pub(crate) fn write_file(&self, rel: &str, contents: &str, mode: u32) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write test file");
        fs::set_permissions(&path, Permissions::from_mode(mode))
            .expect("Failed to set test file mode");
        path
    }

    pub(crate) fn read_file(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("Failed to read test file")
    }

    pub(crate) fn mode_of(&self, path: impl AsRef<Path>) -> u32 {
        let path = path.as_ref();
        let path = if path.is_absolute() { path.to_path_buf() } else { self.work_dir.join(path) };
        fs::metadata(path).expect("Failed to stat file").permissions().mode() & 0o7777
    }
}
