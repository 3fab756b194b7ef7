//! Error type of the rogue search.

use crate::model::MIN_LEAVES;
use thiserror::Error;

/// Fatal conditions of forest construction, pruning, and the rogue search.
///
/// None of these are retried; a run that hits one produces no result.
#[derive(Error, Debug)]
pub enum RogueError {
    #[error("input contains no trees")]
    EmptyInput,

    /// `tree` is the 1-based position in the input.
    #[error("tree {tree} does not have the same leaf set as the first tree")]
    InconsistentLeafSets { tree: usize },

    /// `tree` is the 1-based position in the input.
    #[error("taxon '{taxon}' appears more than once in tree {tree}")]
    DuplicateTaxon { taxon: String, tree: usize },

    #[error("no rogue candidate left: all {num_taxa} remaining taxa are guarded")]
    ExhaustedCandidates { num_taxa: usize },

    #[error(
        "removing '{taxon}' would leave trees with {remaining} leaves, at least {} required; \
         too many iterations for the number of taxa",
        MIN_LEAVES
    )]
    DegeneratePruning { taxon: String, remaining: usize },

    #[error("taxon '{0}' is not a leaf of the trees")]
    UnknownTaxon(String),

    #[error("failed to build scoring thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RogueResult<T> = Result<T, RogueError>;
