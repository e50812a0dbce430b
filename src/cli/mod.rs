//! Command-line interface for Literalura.
//!
//! This module provides subcommands for searching the remote catalog,
//! saving results and querying the local catalogue, plus the interactive
//! menu used when no subcommand is given.

mod commands;

pub use commands::{Cli, Commands, run_command};
