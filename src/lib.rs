//! Core library for `agenda-watch`: detect content changes in the documents an
//! agenda links to, classify them with a completion service, and publish the
//! verdicts to a queue.

pub mod adapters;
pub mod agenda;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod progress;
pub mod publish;
pub mod snapshot;

pub use error::Error;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration, or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli)
}
