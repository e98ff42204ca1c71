use serde::Serialize;

use crate::domain::{AppError, Attributes, ResourceId, ResourceKind};
use crate::ports::{StateRecord, StateStore};

/// Tracked attributes as presented to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowOutcome {
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub attributes: Attributes,
}

/// Stored record with sensitive values masked unless `reveal` is set.
pub fn execute<S: StateStore>(state: &S, reveal: bool) -> Result<Option<ShowOutcome>, AppError> {
    let Some(StateRecord { kind, data }) = state.load()? else {
        return Ok(None);
    };
    let attributes = if reveal {
        data.attributes().clone()
    } else {
        kind.schema().redacted(data.attributes())
    };
    Ok(Some(ShowOutcome { kind, id: data.id().cloned(), attributes }))
}
