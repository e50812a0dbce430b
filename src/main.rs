//! Literalura - a book catalogue fed by the Gutendex (Project Gutenberg) API.
//!
//! Searches the remote catalog, lets the user pick a result and saves it
//! with its authors, never storing the same book or author twice. Saved data
//! can be listed by language, downloads or author life span. Runs as a set
//! of CLI commands or as an interactive menu.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod dedup;
pub mod error;
pub mod ingest;
pub mod model;
pub mod query;
pub mod seed;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr keeps stdout clean for listings and JSON)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("literalura=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
