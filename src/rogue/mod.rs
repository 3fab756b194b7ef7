//! Rogue taxon identification and removal.
//!
//! A rogue taxon is a leaf whose position varies so much across a sample of
//! trees that it depresses the credibility of the clades around it. The
//! search removes rogues greedily: in each iteration, every unguarded taxon
//! is tentatively pruned from all trees, the pruned sample is scored with a
//! [CladeCredibility] oracle, and the taxon whose removal yields the best
//! scoring tree is removed for good.
//!
//! # Components
//! * [Forest] - the sample of trees over a common set of taxa
//! * [CladeCredibility] / [CladeProbabilities] - the scoring oracle
//! * [score_candidate] / [select_rogue] - one iteration's decision
//! * [RogueSearch] - the iteration loop, configured by [RogueConfig]

pub mod config;
pub mod error;
pub mod forest;
pub mod oracle;
pub mod search;
pub mod select;

pub use config::{DEFAULT_ITERATIONS, RogueConfig, parse_guard_list};
pub use error::{RogueError, RogueResult};
pub use forest::Forest;
pub use oracle::{Clade, CladeCredibility, CladeProbabilities};
pub use search::{RogueOutcome, RogueSearch, SearchState};
pub use select::{ScoredCandidate, Workers, compare_candidates, score_candidate, select_rogue};
