//! Candidate scoring and rogue selection.

use crate::model::LabelIndex;
use crate::rogue::error::{RogueError, RogueResult};
use crate::rogue::forest::Forest;
use crate::rogue::oracle::CladeCredibility;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

// =#========================================================================#=
// SCORED CANDIDATE
// =#========================================================================#=
/// A candidate rogue together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Best tree probability of the forest without this taxon
    pub score: f64,
    pub taxon: LabelIndex,
    pub name: String,
}

impl fmt::Display for ScoredCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// Orders candidates by score, then by taxon name, both ascending.
///
/// The rogue is the maximum under this order, so among equal scores the
/// lexicographically largest name wins. Scores are compared numerically;
/// only if that fails (NaN) the IEEE total order decides.
///
/// # Example
/// ```
/// use roguewick::rogue::{ScoredCandidate, compare_candidates};
/// use std::cmp::Ordering;
///
/// let a = ScoredCandidate { score: -1.0, taxon: 0, name: "A".to_string() };
/// let d = ScoredCandidate { score: -1.0, taxon: 3, name: "D".to_string() };
/// assert_eq!(compare_candidates(&a, &d), Ordering::Less);
/// ```
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    a.score
        .partial_cmp(&b.score)
        .unwrap_or_else(|| a.score.total_cmp(&b.score))
        .then_with(|| a.name.cmp(&b.name))
}

// =#========================================================================#=
// SCORING
// =#========================================================================#=
/// Scores one candidate: the highest probability any tree reaches within
/// the forest with `taxon` pruned, under a fresh oracle of type `O`.
///
/// The fold starts at `f64::MIN`, so a forest whose trees all score
/// `-inf` gets `f64::MIN`.
///
/// # Errors
/// Pruning errors of [Forest::pruned].
pub fn score_candidate<O>(forest: &Forest, taxon: LabelIndex) -> RogueResult<f64>
where
    O: CladeCredibility + Default,
{
    let pruned = forest.pruned(taxon)?;

    let mut oracle = O::default();
    for tree in pruned.trees() {
        oracle.add_tree(tree);
    }
    oracle.compute_probabilities();

    Ok(pruned
        .trees()
        .iter()
        .map(|tree| oracle.tree_probability(tree))
        .fold(f64::MIN, f64::max))
}

/// Where candidate scorings run.
#[derive(Debug)]
pub enum Workers {
    /// One after the other on the calling thread
    Sequential,
    /// On the global rayon pool
    Global,
    /// On a dedicated rayon pool
    Pool(ThreadPool),
}

impl Workers {
    /// Picks the workers for a requested thread count:
    /// `None` uses the global pool, `Some(1)` runs sequentially.
    ///
    /// # Errors
    /// [RogueError::ThreadPool] if a dedicated pool cannot be built.
    pub fn from_threads(threads: Option<usize>) -> RogueResult<Self> {
        match threads {
            None => Ok(Workers::Global),
            Some(1) => Ok(Workers::Sequential),
            Some(n) => Ok(Workers::Pool(ThreadPoolBuilder::new().num_threads(n).build()?)),
        }
    }

    /// Scores all candidates, results in candidate order.
    fn score_all<O>(&self, forest: &Forest, candidates: &[LabelIndex]) -> RogueResult<Vec<f64>>
    where
        O: CladeCredibility + Default,
    {
        let score_par = || {
            candidates
                .par_iter()
                .map(|&taxon| score_candidate::<O>(forest, taxon))
                .collect::<RogueResult<Vec<f64>>>()
        };

        match self {
            Workers::Sequential => candidates
                .iter()
                .map(|&taxon| score_candidate::<O>(forest, taxon))
                .collect(),
            Workers::Global => score_par(),
            Workers::Pool(pool) => pool.install(score_par),
        }
    }
}

// =#========================================================================#=
// SELECTION
// =#========================================================================#=
/// Scores every taxon not in `guarded` and returns the best candidate
/// under [compare_candidates]. The forest is not modified.
///
/// Scores are collected in taxon order before reduction, so the result
/// does not depend on the workers.
///
/// # Errors
/// * [RogueError::ExhaustedCandidates] - every taxon is guarded
/// * Pruning errors of [Forest::pruned], e.g. [RogueError::DegeneratePruning]
pub fn select_rogue<O>(
    forest: &Forest,
    guarded: &BTreeSet<String>,
    workers: &Workers,
) -> RogueResult<ScoredCandidate>
where
    O: CladeCredibility + Default,
{
    let candidates: Vec<LabelIndex> = forest
        .taxa()
        .iter()
        .copied()
        .filter(|&taxon| !guarded.contains(forest.taxon_name(taxon)))
        .collect();
    if candidates.is_empty() {
        return Err(RogueError::ExhaustedCandidates {
            num_taxa: forest.num_taxa(),
        });
    }

    let scores = workers.score_all::<O>(forest, &candidates)?;

    candidates
        .into_iter()
        .zip(scores)
        .map(|(taxon, score)| {
            let name = forest.taxon_name(taxon).to_string();
            debug!(candidate = %name, score, "scored candidate");
            ScoredCandidate { score, taxon, name }
        })
        .max_by(compare_candidates)
        .ok_or(RogueError::ExhaustedCandidates {
            num_taxa: forest.num_taxa(),
        })
}
