//! API Facade for the application.
//!
//! Builds the local adapters from a [`Config`] and runs one command.

use crate::app::commands::{apply, destroy, refresh, show};
use crate::app::config::Config;
use crate::app::AppContext;
use crate::domain::{AppError, Attributes, ResourceKind};
use crate::services::{JsonStateStore, LocalFileStore};

pub use crate::app::commands::apply::ApplyOutcome;
pub use crate::app::commands::destroy::DestroyOutcome;
pub use crate::app::commands::refresh::RefreshOutcome;
pub use crate::app::commands::show::ShowOutcome;

fn create_context(config: &Config) -> AppContext<LocalFileStore> {
    AppContext::new(LocalFileStore::new(), config.paths().clone())
}

fn state_store(config: &Config) -> JsonStateStore {
    JsonStateStore::new(config.state_path())
}

/// Converge a resource of `kind` onto `attributes`.
pub fn apply(
    config: &Config,
    kind: ResourceKind,
    attributes: Attributes,
) -> Result<ApplyOutcome, AppError> {
    apply::execute(&create_context(config), &state_store(config), kind, attributes)
}

/// Re-read the tracked file.
pub fn refresh(config: &Config) -> Result<RefreshOutcome, AppError> {
    refresh::execute(&create_context(config), &state_store(config))
}

/// Delete the tracked resource and forget it.
pub fn destroy(config: &Config) -> Result<Option<DestroyOutcome>, AppError> {
    destroy::execute(&create_context(config), &state_store(config))
}

/// Tracked attributes, with sensitive values masked unless `reveal` is set.
pub fn show(config: &Config, reveal: bool) -> Result<Option<ShowOutcome>, AppError> {
    show::execute(&state_store(config), reveal)
}
