mod memory_state_store;
mod recording_file_store;
mod sandbox;

pub use memory_state_store::MemoryStateStore;
pub use recording_file_store::{RecordingFileStore, StoreCall};
pub use sandbox::Sandbox;
