use std::cell::RefCell;

use crate::domain::AppError;
use crate::ports::{StateRecord, StateStore};

/// In-memory state store.
#[derive(Default)]
pub struct MemoryStateStore {
    record: RefCell<Option<StateRecord>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Option<StateRecord> {
        self.record.borrow().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<StateRecord>, AppError> {
        Ok(self.record.borrow().clone())
    }

    fn save(&self, record: &StateRecord) -> Result<(), AppError> {
        *self.record.borrow_mut() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.record.borrow_mut() = None;
        Ok(())
    }
}
