//! Persistence of the tracked resource record.

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, ResourceData, ResourceKind};

/// The record an orchestrator keeps for one managed resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub kind: ResourceKind,
    pub data: ResourceData,
}

/// Port for the tracked-state record.
pub trait StateStore {
    /// Load the record, or `None` when nothing is tracked.
    fn load(&self) -> Result<Option<StateRecord>, AppError>;

    fn save(&self, record: &StateRecord) -> Result<(), AppError>;

    /// Forget the record. No-op if nothing is tracked.
    fn clear(&self) -> Result<(), AppError>;
}
