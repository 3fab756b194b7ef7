//! Roguewick removes rogue taxa from samples of phylogenetic trees.
//!
//! A sample of rooted trees over a common set of taxa, as produced by
//! Bayesian tree sampling, often contains a few taxa whose position jumps
//! around between trees. Such rogue taxa depress the support of the clades
//! around them. This crate finds them greedily: in each iteration, the
//! taxon whose removal from all trees yields the most credible tree is
//! removed for good.
//!
//! Core functionality provided:
//! - Rogue search: [RogueSearch](rogue::RogueSearch) over a
//!   [Forest](rogue::Forest), configured by [RogueConfig](rogue::RogueConfig)
//!   and scored by a pluggable [CladeCredibility](rogue::CladeCredibility)
//!   oracle; by default log clade credibility
//!   ([CladeProbabilities](rogue::CladeProbabilities)).
//! - Newick: Parse and write Newick strings, see [crate::newick].
//! - Tree stream I/O: one tree per line from files or stdin, see
//!   [crate::treestream].
//! - Tree model: [CompactTree] + [LeafLabelMap]: All trees share a
//!   index-to-label mapping and each leaf only stores a label index.
//!   Arena pattern, so no direct vertex references are stored, only vertex
//!   indices. See [crate::model] for more details.
//!
//! Limitations:
//! - Only leaf-labels considered; internal vertex labels are skipped
//! - Comments and annotations are skipped
//!
//! # Example
//! ```
//! use roguewick::newick::parse_trees;
//! use roguewick::remove_rogues;
//! use roguewick::rogue::RogueConfig;
//!
//! let (trees, labels) = parse_trees(
//!     "((A,B),((C,D),E));\n((A,B),((C,E),D));\n((A,B),((C,D),E));",
//! )?;
//! let config = RogueConfig::default().with_guarded(["A"]);
//! let outcome = remove_rogues(trees, labels, config)?;
//!
//! assert_eq!(outcome.removed.len(), 1);
//! assert_eq!(outcome.forest.num_taxa(), 4);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod model;
pub mod newick;
pub mod parser;
pub mod rogue;
pub mod treestream;

use crate::model::CompactTree;
use crate::model::leaf_label_map::LeafLabelMap;
use crate::rogue::{Forest, RogueConfig, RogueOutcome, RogueResult, RogueSearch};

// ============================================================================
// Quick API
// ============================================================================
/// Removes rogue taxa from trees sharing a [LeafLabelMap] with the default
/// oracle.
///
/// See [RogueSearch] for full control, e.g. a custom oracle, single steps,
/// or a stop flag.
pub fn remove_rogues(
    trees: Vec<CompactTree>,
    labels: LeafLabelMap,
    config: RogueConfig,
) -> RogueResult<RogueOutcome> {
    RogueSearch::new(Forest::new(trees, labels)?, config)?.run()
}
