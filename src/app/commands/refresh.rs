use tracing::info;

use crate::app::AppContext;
use crate::app::resources::for_kind;
use crate::domain::{AppError, ResourceData, ResourceId, ResourceKind};
use crate::ports::{FileStore, StateRecord, StateStore};

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    NotTracked,
    /// The file disappeared; the record was dropped.
    Gone { kind: ResourceKind, id: Option<ResourceId> },
    Refreshed {
        kind: ResourceKind,
        data: ResourceData,
        /// Attributes that differ from the stored record.
        drifted: Vec<String>,
    },
}

/// Re-read the tracked file and store what is on disk now.
pub fn execute<F: FileStore, S: StateStore>(
    ctx: &AppContext<F>,
    state: &S,
) -> Result<RefreshOutcome, AppError> {
    let Some(StateRecord { kind, mut data }) = state.load()? else {
        return Ok(RefreshOutcome::NotTracked);
    };

    data.commit();
    match for_kind(ctx, kind).read(&mut data) {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {
            info!(%kind, id = ?data.id(), "tracked file is gone; forgetting it");
            state.clear()?;
            return Ok(RefreshOutcome::Gone { kind, id: data.id().cloned() });
        }
        Err(err) => return Err(err),
    }

    let drifted =
        data.attributes().keys().filter(|name| data.has_change(name)).cloned().collect();
    data.commit();
    state.save(&StateRecord { kind, data: data.clone() })?;
    Ok(RefreshOutcome::Refreshed { kind, data, drifted })
}
