use tracing::info;

use crate::app::AppContext;
use crate::app::resources::for_kind;
use crate::domain::{AppError, ResourceId, ResourceKind};
use crate::ports::{FileStore, StateRecord, StateStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyOutcome {
    pub kind: ResourceKind,
    pub id: Option<ResourceId>,
}

/// Delete the tracked resource and forget it. `None` when nothing is tracked.
pub fn execute<F: FileStore, S: StateStore>(
    ctx: &AppContext<F>,
    state: &S,
) -> Result<Option<DestroyOutcome>, AppError> {
    let Some(StateRecord { kind, mut data }) = state.load()? else {
        return Ok(None);
    };
    let id = data.id().cloned();

    for_kind(ctx, kind).delete(&mut data)?;
    state.clear()?;
    info!(%kind, id = ?id, "destroyed resource");
    Ok(Some(DestroyOutcome { kind, id }))
}
