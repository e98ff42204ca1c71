use super::FileMode;

/// Contents and metadata of a regular file captured in one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// Base name of the file.
    pub name: String,
    /// Full file contents.
    pub contents: Vec<u8>,
    /// Size in bytes as reported by `stat`.
    pub size: u64,
    pub mode: FileMode,
}

impl FileSnapshot {
    /// Contents as text; invalid UTF-8 sequences are replaced.
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }
}
