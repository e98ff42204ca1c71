//! Apply command implementation.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::app::api;
use crate::app::config::Config;
use crate::app::resources::Plan;
use crate::domain::schema::{CONTENTS, CREATE_PARENT_DIRS, DELETE_ON_DESTROY, MODE, PATH, ROOT};
use crate::domain::{AppError, Attributes, ResourceKind};

#[derive(Subcommand)]
pub enum ApplyResource {
    /// Track an existing file without modifying it
    Reader {
        #[command(flatten)]
        location: Location,
    },
    /// Own a file's contents and permissions
    Writer {
        #[command(flatten)]
        location: Location,
        /// File contents
        #[arg(long, conflicts_with = "contents_file")]
        contents: Option<String>,
        /// Read file contents from this file
        #[arg(long, value_name = "FILE")]
        contents_file: Option<PathBuf>,
        /// Octal permission bits, e.g. 0644
        #[arg(long)]
        mode: Option<String>,
        /// Fail instead of creating missing parent directories
        #[arg(long)]
        no_create_parent_dirs: bool,
        /// Leave the file in place on destroy
        #[arg(long)]
        keep_on_destroy: bool,
    },
}

#[derive(Args)]
pub struct Location {
    /// Path of the managed file
    #[arg(long)]
    path: String,
    /// Root the path is tracked relative to (default: working directory)
    #[arg(long)]
    root: Option<String>,
}

impl Location {
    fn into_attributes(self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(PATH.to_string(), self.path.into());
        if let Some(root) = self.root {
            attributes.insert(ROOT.to_string(), root.into());
        }
        attributes
    }
}

pub fn run_apply(config: &Config, resource: ApplyResource) -> Result<(), AppError> {
    let (kind, attributes) = match resource {
        ApplyResource::Reader { location } => (ResourceKind::FileReader, location.into_attributes()),
        ApplyResource::Writer {
            location,
            contents,
            contents_file,
            mode,
            no_create_parent_dirs,
            keep_on_destroy,
        } => {
            let mut attributes = location.into_attributes();
            let contents = match contents_file {
                Some(file) => Some(fs::read_to_string(&file).map_err(|source| AppError::Read {
                    path: file.clone(),
                    source,
                })?),
                None => contents,
            };
            if let Some(contents) = contents {
                attributes.insert(CONTENTS.to_string(), contents.into());
            }
            if let Some(mode) = mode {
                attributes.insert(MODE.to_string(), mode.into());
            }
            attributes.insert(CREATE_PARENT_DIRS.to_string(), (!no_create_parent_dirs).into());
            attributes.insert(DELETE_ON_DESTROY.to_string(), (!keep_on_destroy).into());
            (ResourceKind::FileWriter, attributes)
        }
    };

    let outcome = api::apply(config, kind, attributes)?;
    let id = outcome.data.id().map(|id| id.to_string()).unwrap_or_default();
    match &outcome.plan {
        Plan::Create => println!("✅ Created {} {}", outcome.kind, id),
        Plan::NoOp => println!("✅ {} {} is up to date", outcome.kind, id),
        Plan::Update { changed } => {
            println!("✅ Updated {} {} (changed: {})", outcome.kind, id, changed.join(", "))
        }
        Plan::Replace { forced_by } => {
            println!("✅ Replaced {} {} (forced by: {})", outcome.kind, id, forced_by.join(", "))
        }
    }
    Ok(())
}
