//! Lifecycle operations of the managed-file resources.

mod file_reader;
mod file_writer;
pub mod plan;

pub use file_reader::FileReader;
pub use file_writer::FileWriter;
pub use plan::{Plan, plan, planned_data};

use tracing::debug;

use crate::app::AppContext;
use crate::domain::schema::{CONTENTS, MODE, NAME, PATH, ROOT, SIZE};
use crate::domain::{AppError, FileSnapshot, ResourceData, ResourceKind};
use crate::ports::FileStore;

/// The four lifecycle operations an orchestrator drives.
pub trait Resource {
    fn kind(&self) -> ResourceKind;

    /// Bring the resource into existence and assign its identity.
    fn create(&self, data: &mut ResourceData) -> Result<(), AppError>;

    /// Refresh every derived attribute from disk.
    ///
    /// A missing file yields [`AppError::NotFound`]: the resource is gone.
    fn read(&self, data: &mut ResourceData) -> Result<(), AppError>;

    /// Apply changed inputs in place.
    fn update(&self, data: &mut ResourceData) -> Result<(), AppError>;

    /// Stop tracking the resource. Always clears the identity on success.
    fn delete(&self, data: &mut ResourceData) -> Result<(), AppError>;
}

/// Resource implementation for `kind`.
pub fn for_kind<'a, F: FileStore>(
    ctx: &'a AppContext<F>,
    kind: ResourceKind,
) -> Box<dyn Resource + 'a> {
    match kind {
        ResourceKind::FileReader => Box::new(FileReader::new(ctx)),
        ResourceKind::FileWriter => Box::new(FileWriter::new(ctx)),
    }
}

/// Inspect the file behind `data`'s identity and store the derived attributes.
pub(crate) fn refresh_from_disk<F: FileStore>(
    ctx: &AppContext<F>,
    data: &mut ResourceData,
) -> Result<FileSnapshot, AppError> {
    let id = data.id().cloned().ok_or(AppError::MissingIdentity)?;
    let path = ctx.resolver().reconstruct(&id, data.get_str(ROOT))?;
    let snapshot = ctx.store().inspect(&path)?;

    data.set(PATH, id.as_str());
    data.set(NAME, snapshot.name.clone());
    data.set(CONTENTS, snapshot.contents_lossy());
    data.set(SIZE, snapshot.size as i64);
    data.set(MODE, snapshot.mode.to_string());
    debug!(id = %id, size = snapshot.size, "refreshed from disk");
    Ok(snapshot)
}
