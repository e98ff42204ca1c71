use tracing::info;

use crate::app::AppContext;
use crate::domain::schema::{PATH, ROOT};
use crate::domain::{AppError, ResourceData, ResourceKind};
use crate::ports::FileStore;

use super::{Resource, refresh_from_disk};

/// Read-only view of an existing file. Never modifies or deletes it.
pub struct FileReader<'a, F: FileStore> {
    ctx: &'a AppContext<F>,
}

impl<'a, F: FileStore> FileReader<'a, F> {
    pub fn new(ctx: &'a AppContext<F>) -> Self {
        Self { ctx }
    }
}

impl<F: FileStore> Resource for FileReader<'_, F> {
    fn kind(&self) -> ResourceKind {
        ResourceKind::FileReader
    }

    fn create(&self, data: &mut ResourceData) -> Result<(), AppError> {
        let id = self.ctx.resolver().resolve(data.get_str(PATH), data.get_str(ROOT))?;
        data.set(PATH, id.as_str());
        data.set_id(id);

        if let Err(err) = self.read(data) {
            data.clear_id();
            return Err(err);
        }
        info!(id = %data.get_str(PATH), "tracking file");
        Ok(())
    }

    fn read(&self, data: &mut ResourceData) -> Result<(), AppError> {
        refresh_from_disk(self.ctx, data).map(|_| ())
    }

    fn update(&self, _data: &mut ResourceData) -> Result<(), AppError> {
        Err(AppError::UpdateUnsupported { kind: self.kind().to_string() })
    }

    fn delete(&self, data: &mut ResourceData) -> Result<(), AppError> {
        data.clear_id();
        Ok(())
    }
}
