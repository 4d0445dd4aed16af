//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `agenda-watch`.
#[derive(Debug, Parser)]
#[command(name = "agenda-watch", version, about = "Watch agenda documents and publish classified changes")]
pub struct Cli {
    /// Agenda and snapshot locations.
    #[command(flatten)]
    pub paths: Paths,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where the agenda and the two snapshot sets live.
#[derive(Debug, Clone, Args)]
pub struct Paths {
    /// HTML agenda listing the monitored documents.
    #[arg(long, global = true, env = "AGENDA_PATH", default_value = "data/agenda.html")]
    pub agenda: PathBuf,
    /// Baseline snapshot directory.
    #[arg(long, global = true, env = "ORIGINAL_DIR", default_value = "data/original")]
    pub original_dir: PathBuf,
    /// Current-observation snapshot directory.
    #[arg(long, global = true, env = "TEMP_DIR", default_value = "data/temp")]
    pub temp_dir: PathBuf,
}

/// Supported top-level subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch every document into the baseline snapshot set.
    Init,
    /// Fetch every document into the current snapshot set, compare with the
    /// baseline, and publish a verdict for each change.
    Compare,
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Compare => "compare",
        }
    }
}
