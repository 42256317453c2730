//! `rw toc` subcommand group.

mod normalize;
mod parse;

use clap::Subcommand;

use normalize::NormalizeArgs;
use parse::ParseArgs;

use crate::error::CliError;

/// Table of contents commands.
#[derive(Subcommand)]
pub(crate) enum TocCommand {
    /// Validate a toc file and summarize its site-map.
    Parse(ParseArgs),
    /// Re-write a toc file in its minimal form.
    Normalize(NormalizeArgs),
}

impl TocCommand {
    /// Execute the toc subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Parse(args) => args.execute(),
            Self::Normalize(args) => args.execute(),
        }
    }
}
