//! Rating command handlers for the CLI.
//!
//! `import` runs a JSON file through the same batch pipeline as the bulk
//! HTTP endpoint; `list` is a read-only query.

mod import;
mod query;

use std::path::PathBuf;

use clap::Subcommand;

pub(crate) use import::run_ratings_import;
pub(crate) use query::run_ratings_list;

/// Sub-commands available under `ratings`.
#[derive(Debug, Subcommand)]
pub enum RatingsCommands {
    /// Import a JSON array of rating objects
    Import {
        /// Path to the JSON file
        #[arg(long)]
        file: PathBuf,
        /// Validate the file without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Show stored ratings, oldest first
    List {
        /// Maximum number of ratings to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}
