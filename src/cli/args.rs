//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::rogue::{DEFAULT_ITERATIONS, RogueConfig, parse_guard_list};
use crate::treestream::TreeSource;

/// Remove rogue taxa from a sample of phylogenetic trees.
///
/// Reads rooted Newick trees, one per line, removes the requested number of
/// rogue taxa one after the other, and writes the pruned trees.
#[derive(Parser, Debug)]
#[command(name = "roguewick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of rogue taxa to remove
    #[arg(short = 'n', long, env = "ROGUEWICK_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Comma-separated taxa that must never be removed
    #[arg(short = 'g', long, env = "ROGUEWICK_GUARD", value_name = "TAXA")]
    pub guard: Option<String>,

    /// Worker threads for scoring (1 = sequential; default: all cores)
    #[arg(long, env = "ROGUEWICK_THREADS")]
    pub threads: Option<usize>,

    /// Write pruned trees to this file instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Tree files, one Newick tree per line ('-' or none: stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub files: Vec<String>,
}

impl Cli {
    /// Builds the search configuration from the arguments.
    pub fn rogue_config(&self) -> RogueConfig {
        let guarded = self.guard.as_deref().map(parse_guard_list).unwrap_or_default();
        let config = RogueConfig::default()
            .with_iterations(self.iterations)
            .with_guarded(guarded);
        match self.threads {
            Some(threads) => config.with_threads(threads),
            None => config,
        }
    }

    /// Tree sources named on the command line, in order.
    pub fn sources(&self) -> Vec<TreeSource> {
        self.files.iter().map(|arg| TreeSource::from_arg(arg)).collect()
    }
}
