mod file_store;
mod state_store;

pub use file_store::FileStore;
pub use state_store::{StateRecord, StateStore};
