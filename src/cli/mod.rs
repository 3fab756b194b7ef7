//! Command-line front end of the `roguewick` binary.
//!
//! The search always runs to completion here; interrupting a search early
//! needs [RogueSearch::with_stop_flag] from library code.

pub mod args;

pub use args::Cli;

use crate::rogue::{RogueError, RogueOutcome, RogueSearch};
use crate::treestream::{StreamError, read_forest, write_forest_to};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Rogue(#[from] RogueError),
}

/// Reads the trees, removes the rogues, and writes the pruned trees.
///
/// Every removed taxon is reported on stderr as soon as it is decided.
pub fn run(cli: &Cli) -> Result<RogueOutcome, CliError> {
    let forest = read_forest(&cli.sources())?;
    info!(
        num_trees = forest.len(),
        num_taxa = forest.num_taxa(),
        "read forest"
    );

    let search = RogueSearch::new(forest, cli.rogue_config())?;
    let outcome = search.run_with(|rogue| eprintln!("Removing {} as rogue", rogue.name))?;

    write_forest_to(cli.output.as_deref(), &outcome.forest)?;
    Ok(outcome)
}
