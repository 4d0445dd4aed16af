//! Binary entrypoint for the `agenda-watch` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be populated.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("failed to load .env: {err}");
            return ExitCode::FAILURE;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agenda_watch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match agenda_watch::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(agenda_watch::Error::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
