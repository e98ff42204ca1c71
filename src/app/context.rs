use crate::domain::PathContext;
use crate::ports::FileStore;
use crate::services::PathResolver;

/// Application context holding dependencies for lifecycle operations.
pub struct AppContext<F: FileStore> {
    store: F,
    paths: PathContext,
}

impl<F: FileStore> AppContext<F> {
    /// Create a new application context.
    pub fn new(store: F, paths: PathContext) -> Self {
        Self { store, paths }
    }

    /// Get a reference to the file store.
    pub fn store(&self) -> &F {
        &self.store
    }

    /// Get the working and home directories used for path expansion.
    pub fn paths(&self) -> &PathContext {
        &self.paths
    }

    pub fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(&self.paths)
    }
}
