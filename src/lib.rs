//! fsres: declarative management of a single local file.
//!
//! A `file_reader` resource tracks an existing file; a `file_writer` resource
//! owns a file's contents and permissions and writes them atomically.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ApplyOutcome, DestroyOutcome, RefreshOutcome, ShowOutcome, apply, destroy, refresh, show,
};
pub use app::config::Config;
pub use app::resources::Plan;
pub use domain::{AppError, AttrValue, Attributes, PathContext, ResourceData, ResourceId, ResourceKind};
