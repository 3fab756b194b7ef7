//! The working sample of trees.

use crate::model::{CompactTree, LabelIndex, LeafLabelMap, PruneError};
use crate::rogue::error::{RogueError, RogueResult};
use std::sync::Arc;
use tracing::trace;

// =#========================================================================#=
// FOREST
// =#========================================================================#=
/// Ordered sequence of trees over one common set of taxa.
///
/// All trees reference their leaf labels through one shared
/// [LeafLabelMap]; the label index is the identity of a taxon. The order of
/// the trees is kept for output.
///
/// # Invariants
/// - At least one tree
/// - Every tree has the same set of leaf labels, each exactly once
/// - `taxa` is that set, ordered by label string
///
/// Pruning never changes a forest in place except through [Forest::prune],
/// which bumps the [generation](Forest::generation).
///
/// # Example
/// ```
/// use roguewick::newick::parse_trees;
/// use roguewick::rogue::Forest;
///
/// let (trees, labels) = parse_trees("((A,B),(C,D));\n((A,C),(B,D));")?;
/// let forest = Forest::new(trees, labels)?;
/// assert_eq!(forest.len(), 2);
/// assert_eq!(forest.taxon_names().collect::<Vec<_>>(), ["A", "B", "C", "D"]);
///
/// let pruned = forest.pruned(forest.taxon_index("C").unwrap())?;
/// assert_eq!(pruned.num_taxa(), 3);
/// assert_eq!(forest.num_taxa(), 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<CompactTree>,
    labels: Arc<LeafLabelMap>,
    taxa: Vec<LabelIndex>,
    generation: u64,
}

impl Forest {
    /// Builds a forest from trees sharing the given label map.
    ///
    /// # Errors
    /// * [RogueError::EmptyInput] - no trees
    /// * [RogueError::DuplicateTaxon] - a taxon labels two leaves of one tree
    /// * [RogueError::InconsistentLeafSets] - a tree's leaf set differs from the first tree's
    pub fn new(trees: Vec<CompactTree>, labels: LeafLabelMap) -> RogueResult<Self> {
        let Some(first) = trees.first() else {
            return Err(RogueError::EmptyInput);
        };
        let labels = Arc::new(labels);

        let taxa = sorted_leaf_set(first, &labels, 1)?;
        for (tree_index, tree) in trees.iter().enumerate().skip(1) {
            let position = tree_index + 1;
            if sorted_leaf_set(tree, &labels, position)? != taxa {
                return Err(RogueError::InconsistentLeafSets { tree: position });
            }
        }

        Ok(Self {
            trees,
            labels,
            taxa,
            generation: 0,
        })
    }

    /// Returns the trees, in input order.
    pub fn trees(&self) -> &[CompactTree] {
        &self.trees
    }

    pub fn into_trees(self) -> Vec<CompactTree> {
        self.trees
    }

    /// Returns the label map shared by all trees.
    pub fn labels(&self) -> &LeafLabelMap {
        &self.labels
    }

    /// Returns the number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Returns the number of taxa (leaves per tree).
    pub fn num_taxa(&self) -> usize {
        self.taxa.len()
    }

    /// Returns the taxa, ordered by name.
    pub fn taxa(&self) -> &[LabelIndex] {
        &self.taxa
    }

    /// Returns the taxon names, in order.
    pub fn taxon_names(&self) -> impl Iterator<Item = &str> {
        self.taxa.iter().map(|&taxon| &self.labels[taxon])
    }

    /// Returns the name of a taxon.
    ///
    /// # Panics
    /// Panics if `taxon` is not an index of the label map.
    pub fn taxon_name(&self, taxon: LabelIndex) -> &str {
        &self.labels[taxon]
    }

    /// Returns the index of the named taxon if it is a leaf of the trees.
    pub fn taxon_index(&self, name: &str) -> Option<LabelIndex> {
        self.labels
            .get_index(name)
            .filter(|taxon| self.contains_taxon(*taxon))
    }

    /// Returns whether `taxon` is a leaf of the trees.
    pub fn contains_taxon(&self, taxon: LabelIndex) -> bool {
        self.taxa.contains(&taxon)
    }

    /// Number of in-place prunes this forest went through.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a new forest with `taxon` removed from every tree.
    ///
    /// The result is one generation ahead; this forest is untouched.
    ///
    /// # Errors
    /// * [RogueError::UnknownTaxon] - `taxon` is not a leaf of the trees
    /// * [RogueError::DegeneratePruning] - trees would keep fewer than
    ///   [MIN_LEAVES](crate::model::MIN_LEAVES) leaves
    pub fn pruned(&self, taxon: LabelIndex) -> RogueResult<Forest> {
        let name = || self.labels.get_label(taxon).unwrap_or_default().to_string();
        if !self.contains_taxon(taxon) {
            return Err(RogueError::UnknownTaxon(name()));
        }

        let trees = self
            .trees
            .iter()
            .map(|tree| {
                tree.without_leaf(&taxon).map_err(|err| match err {
                    PruneError::LeafNotFound => RogueError::UnknownTaxon(name()),
                    PruneError::TooFewLeaves { remaining } => RogueError::DegeneratePruning {
                        taxon: name(),
                        remaining,
                    },
                })
            })
            .collect::<RogueResult<Vec<_>>>()?;
        trace!(taxon = %name(), generation = self.generation + 1, "pruned forest");

        Ok(Forest {
            trees,
            labels: Arc::clone(&self.labels),
            taxa: self.taxa.iter().copied().filter(|&t| t != taxon).collect(),
            generation: self.generation + 1,
        })
    }

    /// Removes `taxon` from every tree in place.
    ///
    /// On error, the forest is left unchanged.
    pub fn prune(&mut self, taxon: LabelIndex) -> RogueResult<()> {
        *self = self.pruned(taxon)?;
        Ok(())
    }
}

/// Collects the leaf labels of a tree, ordered by label string, and checks
/// that no label appears twice.
fn sorted_leaf_set(
    tree: &CompactTree,
    labels: &LeafLabelMap,
    position: usize,
) -> RogueResult<Vec<LabelIndex>> {
    let mut leaf_set: Vec<LabelIndex> = tree.leaf_labels().copied().collect();
    leaf_set.sort_by(|&a, &b| labels[a].cmp(&labels[b]));
    if let Some(pair) = leaf_set.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(RogueError::DuplicateTaxon {
            taxon: labels[pair[0]].to_string(),
            tree: position,
        });
    }
    Ok(leaf_set)
}
