use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FILE_READER, FILE_WRITER, ResourceSchema};

/// The two managed-file resource variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Read-only discovery of an existing file.
    FileReader,
    /// Owns the file's contents and permissions.
    FileWriter,
}

impl ResourceKind {
    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            ResourceKind::FileReader => &FILE_READER,
            ResourceKind::FileWriter => &FILE_WRITER,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_type_name() {
        let json = serde_json::to_string(&ResourceKind::FileWriter).unwrap();
        assert_eq!(json, "\"file_writer\"");
        assert_eq!(ResourceKind::FileWriter.to_string(), "file_writer");
    }
}
