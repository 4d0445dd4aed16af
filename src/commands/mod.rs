//! Command dispatch and handlers.

pub mod compare;
pub mod init;

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Error;

/// Environment variable naming a cassette file to record network interactions into.
pub const RECORD_ENV: &str = "AGENDA_WATCH_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `AGENDA_WATCH_RECORD` is set to a file path, every fetch, completion
/// and queue interaction is recorded to that cassette.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the command fails
/// before processing documents.
pub fn dispatch(cli: &Cli) -> Result<(), Error> {
    let config = Config::from_env()?;
    let ctx = match env::var(RECORD_ENV) {
        Ok(path) if !path.is_empty() => {
            ServiceContext::recording(&config, &PathBuf::from(path), cli.command.name())?
        }
        _ => ServiceContext::live(&config)?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(dispatch_with_context(cli, &config, &ctx));

    // Write the cassette even when the command failed.
    if let Some(path) = ctx.finish()? {
        info!(path = %path.display(), "recording saved");
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(cli: &Cli, config: &Config, ctx: &ServiceContext) -> Result<(), Error> {
    match cli.command {
        Command::Init => init::run(ctx, &cli.paths).await.map(|_| ()),
        Command::Compare => {
            compare::run(ctx, &cli.paths, &config.completion.deployment).await.map(|_| ())
        }
    }
}
