use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, FileMode, WriteRequest};
use crate::ports::{StateRecord, StateStore};

use super::AtomicWriter;

/// Tracked state kept as a JSON document.
///
/// The record may hold sensitive file contents, so it is written owner-only.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
    writer: AtomicWriter,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), writer: AtomicWriter::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<Option<StateRecord>, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record = serde_json::from_str(&content).map_err(|err| AppError::StateFile {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;
        Ok(Some(record))
    }

    fn save(&self, record: &StateRecord) -> Result<(), AppError> {
        let mut content = serde_json::to_vec_pretty(record)?;
        content.push(b'\n');
        let request = WriteRequest::new(&self.path, content)
            .with_permissions(FileMode::new(0o600)?)
            .with_create_parent_dirs(true);
        self.writer.write(&request)?;
        debug!(path = %self.path.display(), "saved state");
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceData, ResourceId, ResourceKind};
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn record() -> StateRecord {
        let mut data = ResourceData::default();
        data.set_id(ResourceId::new("out.txt"));
        data.set("contents", "hello");
        StateRecord { kind: ResourceKind::FileWriter, data }
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_record_loads_back() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("state.json"));

        store.save(&record()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.kind, ResourceKind::FileWriter);
        assert_eq!(loaded.data.id().unwrap().as_str(), "out.txt");
        assert_eq!(loaded.data.get_str("contents"), "hello");
    }

    #[test]
    fn state_file_is_owner_only() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("state.json"));
        store.save(&record()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn corrupt_state_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonStateStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::StateFile { .. }));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("state.json"));
        store.save(&record()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
