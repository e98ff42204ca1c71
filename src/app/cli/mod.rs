//! CLI Adapter.

mod apply;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api::{self, RefreshOutcome};
use crate::app::config::Config;
use crate::app::logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "fsres")]
#[command(version)]
#[command(about = "Declaratively manage a single local file", long_about = None)]
struct Cli {
    /// State file tracking the managed resource [env: FSRES_STATE]
    #[arg(long, global = true, value_name = "FILE")]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or converge the managed file
    #[clap(visible_alias = "a")]
    Apply {
        #[command(subcommand)]
        resource: apply::ApplyResource,
    },
    /// Re-read the tracked file and record its current attributes
    #[clap(visible_alias = "r")]
    Refresh,
    /// Print the tracked attributes as JSON
    Show {
        /// Print sensitive values such as file contents
        #[arg(long)]
        show_sensitive: bool,
    },
    /// Delete the tracked resource and forget it
    Destroy,
}

/// Entry point for the CLI.
pub fn run() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(state) = cli.state {
        config = config.with_state_path(state);
    }

    match cli.command {
        Commands::Apply { resource } => apply::run_apply(&config, resource),
        Commands::Refresh => run_refresh(&config),
        Commands::Show { show_sensitive } => run_show(&config, show_sensitive),
        Commands::Destroy => run_destroy(&config),
    }
}

fn run_refresh(config: &Config) -> Result<(), AppError> {
    match api::refresh(config)? {
        RefreshOutcome::NotTracked => println!("ℹ️ No resource is tracked"),
        RefreshOutcome::Gone { kind, id } => {
            let id = id.map(|id| id.to_string()).unwrap_or_default();
            println!("⚠️ {} {} no longer exists; stopped tracking it", kind, id);
        }
        RefreshOutcome::Refreshed { kind, data, drifted } => {
            let id = data.id().map(|id| id.to_string()).unwrap_or_default();
            if drifted.is_empty() {
                println!("✅ {} {} is up to date", kind, id);
            } else {
                println!("✅ Refreshed {} {} (changed: {})", kind, id, drifted.join(", "));
            }
        }
    }
    Ok(())
}

fn run_show(config: &Config, show_sensitive: bool) -> Result<(), AppError> {
    match api::show(config, show_sensitive)? {
        Some(outcome) => println!("{}", serde_json::to_string_pretty(&outcome)?),
        None => println!("ℹ️ No resource is tracked"),
    }
    Ok(())
}

fn run_destroy(config: &Config) -> Result<(), AppError> {
    match api::destroy(config)? {
        Some(outcome) => {
            let id = outcome.id.map(|id| id.to_string()).unwrap_or_default();
            println!("✅ Destroyed {} {}", outcome.kind, id);
        }
        None => println!("ℹ️ No resource is tracked"),
    }
    Ok(())
}
