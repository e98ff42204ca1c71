use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::domain::schema::{
    CONTENTS, CREATE_PARENT_DIRS, DELETE_ON_DESTROY, FILE_WRITER, MODE, PATH, ROOT,
};
use crate::domain::{AppError, FileMode, ResourceData, ResourceId, ResourceKind, WriteRequest};
use crate::ports::FileStore;

use super::{Resource, refresh_from_disk};

/// Owns a file's contents and permissions.
pub struct FileWriter<'a, F: FileStore> {
    ctx: &'a AppContext<F>,
}

impl<'a, F: FileStore> FileWriter<'a, F> {
    pub fn new(ctx: &'a AppContext<F>) -> Self {
        Self { ctx }
    }

    /// Atomically write contents and mode to the file behind `id`.
    fn write_file(&self, id: &ResourceId, data: &ResourceData) -> Result<(), AppError> {
        let mode = FileMode::parse(data.get_str(MODE))?;
        let request = WriteRequest {
            destination: self.ctx.resolver().reconstruct(id, data.get_str(ROOT))?,
            contents: data.get_str(CONTENTS).as_bytes().to_vec(),
            create_parent_dirs: data.get_bool(CREATE_PARENT_DIRS),
            permissions: Some(mode),
        };
        let outcome = self.ctx.store().write(&request)?;
        if !outcome.is_atomic() {
            warn!(id = %id, "file was copied across devices; the write was not atomic");
        }
        Ok(())
    }
}

impl<F: FileStore> Resource for FileWriter<'_, F> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::FileWriter
    }

    fn create(&self, data: &mut ResourceData) -> Result<(), AppError> {
        FILE_WRITER.apply_defaults(data.attributes_mut());
        let id = self.ctx.resolver().resolve(data.get_str(PATH), data.get_str(ROOT))?;
        data.set(PATH, id.as_str());
        self.write_file(&id, data)?;
        // The file now exists, so the identity stays even if the read fails.
        data.set_id(id);
        self.read(data)?;
        info!(id = %data.get_str(PATH), "wrote file");
        Ok(())
    }

    fn read(&self, data: &mut ResourceData) -> Result<(), AppError> {
        refresh_from_disk(self.ctx, data).map(|_| ())
    }

    fn update(&self, data: &mut ResourceData) -> Result<(), AppError> {
        for field in [PATH, ROOT] {
            if data.has_change(field) {
                return Err(AppError::ReplacementRequired(field.to_string()));
            }
        }

        let id = data.id().cloned().ok_or(AppError::MissingIdentity)?;

        // A rewrite reapplies mode and parent creation as well.
        if data.has_change(CONTENTS) {
            self.write_file(&id, data)?;
            self.read(data)?;
            info!(id = %data.get_str(PATH), "rewrote file");
            return Ok(());
        }

        if data.has_change(MODE) {
            let mode = FileMode::parse(data.get_str(MODE))?;
            if mode.is_unset() {
                return self.read(data);
            }
            let path = self.ctx.resolver().reconstruct(&id, data.get_str(ROOT))?;
            self.ctx.store().set_mode(&path, mode)?;
            data.set(MODE, mode.to_string());
            info!(id = %id, %mode, "changed file mode");
        }

        Ok(())
    }

    fn delete(&self, data: &mut ResourceData) -> Result<(), AppError> {
        if let Some(id) = data.id().cloned()
            && data.get_bool(DELETE_ON_DESTROY)
        {
            let path = self.ctx.resolver().reconstruct(&id, data.get_str(ROOT))?;
            if self.ctx.store().remove(&path)? {
                info!(id = %id, "deleted file");
            } else {
                debug!(id = %id, "file already absent");
            }
        }
        data.clear_id();
        Ok(())
    }
}
