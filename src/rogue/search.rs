//! The iterative rogue removal loop.

use crate::rogue::config::RogueConfig;
use crate::rogue::error::RogueResult;
use crate::rogue::forest::Forest;
use crate::rogue::oracle::{CladeCredibility, CladeProbabilities};
use crate::rogue::select::{ScoredCandidate, Workers, select_rogue};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Lifecycle of a [RogueSearch].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Configured, no iteration run yet
    Ready,
    /// At least one iteration run, more to come
    Iterating,
    /// All iterations run, or stopped
    Done,
}

/// Result of a completed [RogueSearch].
#[derive(Debug, Clone)]
pub struct RogueOutcome {
    /// The forest with all removed taxa pruned
    pub forest: Forest,
    /// Names of the removed taxa, in removal order
    pub removed: Vec<String>,
    /// Whether the stop flag ended the search before all iterations ran
    pub stopped_early: bool,
}

// =#========================================================================#=
// ROGUE SEARCH
// =#========================================================================#=
/// Greedy rogue taxon removal.
///
/// Each iteration scores every unguarded taxon (see
/// [select_rogue](crate::rogue::select_rogue)), records the best one as
/// rogue, and prunes it from every tree of the working forest. Iterations
/// run strictly one after the other; the forest is the only state they
/// share.
///
/// Generic over the [CladeCredibility] oracle; [RogueSearch::new] uses
/// [CladeProbabilities].
///
/// # Example
/// ```
/// use roguewick::newick::parse_trees;
/// use roguewick::rogue::{Forest, RogueConfig, RogueSearch};
///
/// let (trees, labels) = parse_trees("((A,B),(C,D));\n((A,B),(C,D));")?;
/// let forest = Forest::new(trees, labels)?;
///
/// let outcome = RogueSearch::new(forest, RogueConfig::default().with_threads(1))?.run()?;
/// assert_eq!(outcome.removed, ["D"]);
/// assert_eq!(outcome.forest.num_taxa(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RogueSearch<O = CladeProbabilities> {
    forest: Forest,
    config: RogueConfig,
    workers: Workers,
    removed: Vec<String>,
    state: SearchState,
    stop: Option<Arc<AtomicBool>>,
    oracle: PhantomData<fn() -> O>,
}

impl RogueSearch {
    /// Creates a search with the default [CladeProbabilities] oracle.
    ///
    /// # Errors
    /// [RogueError::ThreadPool](crate::rogue::RogueError::ThreadPool) if the
    /// configured workers cannot be set up.
    pub fn new(forest: Forest, config: RogueConfig) -> RogueResult<Self> {
        Self::with_oracle(forest, config)
    }
}

impl<O: CladeCredibility + Default> RogueSearch<O> {
    /// Creates a search scoring with oracle type `O`.
    pub fn with_oracle(forest: Forest, config: RogueConfig) -> RogueResult<Self> {
        for name in config.guarded() {
            if forest.taxon_index(name).is_none() {
                warn!(taxon = %name, "guarded taxon is not a leaf of the trees, ignoring");
            }
        }
        let workers = Workers::from_threads(config.threads())?;

        Ok(Self {
            forest,
            config,
            workers,
            removed: Vec::new(),
            state: SearchState::Ready,
            stop: None,
            oracle: PhantomData,
        })
    }

    /// Installs a flag that ends the search between iterations once raised.
    ///
    /// Library callers only; the `roguewick` binary runs without one and
    /// stops on the threshold or the taxon floor.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The working forest, with all rogues so far removed.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Names of the rogues removed so far, in order.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Runs a single iteration: selects the rogue and prunes it.
    ///
    /// # Returns
    /// * `Ok(Some(candidate))` - the rogue removed in this iteration
    /// * `Ok(None)` - all configured iterations already ran
    ///
    /// # Errors
    /// Errors of [select_rogue] and [Forest::prune]. The forest is left as
    /// it was before the failed iteration.
    pub fn step(&mut self) -> RogueResult<Option<ScoredCandidate>> {
        if self.is_complete() {
            self.state = SearchState::Done;
            return Ok(None);
        }
        self.state = SearchState::Iterating;

        let rogue = select_rogue::<O>(&self.forest, self.config.guarded(), &self.workers)?;
        self.forest.prune(rogue.taxon)?;
        self.removed.push(rogue.name.clone());

        info!(
            iteration = self.removed.len(),
            taxon = %rogue.name,
            score = rogue.score,
            "removed rogue taxon"
        );
        debug!(
            generation = self.forest.generation(),
            num_taxa = self.forest.num_taxa(),
            "forest after removal"
        );

        if self.is_complete() {
            self.state = SearchState::Done;
        }
        Ok(Some(rogue))
    }

    /// Runs all iterations.
    pub fn run(self) -> RogueResult<RogueOutcome> {
        self.run_with(|_| {})
    }

    /// Runs all iterations, passing every removed rogue to `progress` as
    /// soon as it is decided.
    ///
    /// # Errors
    /// The first error of any iteration; no partial outcome is returned.
    pub fn run_with<F>(mut self, mut progress: F) -> RogueResult<RogueOutcome>
    where
        F: FnMut(&ScoredCandidate),
    {
        let mut stopped_early = false;
        while self.state != SearchState::Done {
            if !self.is_complete() && self.stop_requested() {
                info!(removed = self.removed.len(), "stop requested, ending search");
                stopped_early = true;
                self.state = SearchState::Done;
                break;
            }
            if let Some(rogue) = self.step()? {
                progress(&rogue);
            }
        }

        Ok(RogueOutcome {
            forest: self.forest,
            removed: self.removed,
            stopped_early,
        })
    }

    fn is_complete(&self) -> bool {
        self.removed.len() >= self.config.iterations()
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|stop| stop.load(Ordering::Relaxed))
    }
}
