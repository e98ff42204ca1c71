mod atomic_writer;
mod file_inspector;
mod json_state_store;
mod local_file_store;
mod path_resolver;

pub use atomic_writer::{AtomicWriter, StagingHook};
pub use file_inspector::{FILE_SIZE_LIMIT, FileInspector};
pub use json_state_store::JsonStateStore;
pub use local_file_store::LocalFileStore;
pub use path_resolver::PathResolver;
