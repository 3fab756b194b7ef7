//! Clade credibility of trees within a sample.
//!
//! A clade is the set of taxa below a non-leaf vertex. How often a clade
//! occurs across a sample of trees measures its support; combining the
//! support of all clades of a tree gives the tree's credibility.

use crate::model::{CompactTree, LabelIndex, Vertex};
use std::collections::HashMap;

const WORD_BITS: usize = u64::BITS as usize;

// =#========================================================================#=
// CLADE CREDIBILITY (trait)
// =#========================================================================#=
/// Scores trees by how well their clades are supported across a sample.
///
/// The lifecycle is fixed:
/// 1. [`add_tree`](Self::add_tree) for every tree of the sample
/// 2. [`compute_probabilities`](Self::compute_probabilities) once
/// 3. [`tree_probability`](Self::tree_probability) for any number of trees
///
/// A fresh instance (via `Default`) is used for every sample.
pub trait CladeCredibility {
    /// Registers one tree as a member of the sample.
    fn add_tree(&mut self, tree: &CompactTree);

    /// Finalises clade statistics after all trees were added.
    fn compute_probabilities(&mut self);

    /// Returns the aggregate credibility of the tree's clades; higher is better.
    fn tree_probability(&self, tree: &CompactTree) -> f64;
}

// =#========================================================================#=
// CLADE
// =#========================================================================#=
/// Set of taxa, stored as a bitset over [LabelIndex].
///
/// Trailing zero words are never stored, so equal sets compare and hash
/// equal regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clade(Vec<u64>);

impl Clade {
    /// Returns the clade containing just `taxon`.
    pub fn singleton(taxon: LabelIndex) -> Self {
        let mut words = vec![0; taxon / WORD_BITS + 1];
        words[taxon / WORD_BITS] = 1 << (taxon % WORD_BITS);
        Clade(words)
    }

    /// Adds all taxa of `other` to this clade.
    pub fn union_with(&mut self, other: &Clade) {
        if self.0.len() < other.0.len() {
            self.0.resize(other.0.len(), 0);
        }
        for (word, other_word) in self.0.iter_mut().zip(&other.0) {
            *word |= other_word;
        }
    }

    pub fn contains(&self, taxon: LabelIndex) -> bool {
        self.0
            .get(taxon / WORD_BITS)
            .is_some_and(|word| word & (1 << (taxon % WORD_BITS)) != 0)
    }

    /// Number of taxa in the clade.
    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the clades of all non-leaf vertices of `tree`, in post-order.
    ///
    /// # Example
    /// ```
    /// use roguewick::newick::parse_str;
    /// use roguewick::rogue::Clade;
    ///
    /// let (tree, labels) = parse_str("((A,B),(C,D,E));")?;
    /// let clades = Clade::all_of(&tree);
    /// assert_eq!(clades.len(), 3);
    /// assert_eq!(clades[0].len(), 2);
    /// assert!(clades[1].contains(labels.get_index("E").unwrap()));
    /// assert_eq!(clades[2].len(), 5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn all_of(tree: &CompactTree) -> Vec<Clade> {
        let mut below: Vec<Clade> = vec![Clade::default(); tree.num_vertices()];
        let mut clades = Vec::with_capacity(tree.num_vertices() - tree.num_leaves());

        for vertex in tree.post_order_iter() {
            match vertex {
                Vertex::Leaf { index, label, .. } => below[*index] = Clade::singleton(*label),
                Vertex::Internal {
                    index, children, ..
                }
                | Vertex::Root {
                    index, children, ..
                } => {
                    let mut clade = Clade::default();
                    for &child in children {
                        clade.union_with(&below[child]);
                    }
                    clades.push(clade.clone());
                    below[*index] = clade;
                }
            }
        }

        clades
    }
}

// =#========================================================================#=
// CLADE PROBABILITIES
// =#========================================================================#=
/// Log clade credibility over observed clade frequencies.
///
/// The probability of a clade is the fraction of sample trees containing
/// it. A tree's probability is the sum of the natural logarithms of its
/// clades' probabilities; a tree with a clade never seen in the sample
/// scores `f64::NEG_INFINITY`, as does any query before
/// [`compute_probabilities`](CladeCredibility::compute_probabilities).
///
/// # Example
/// ```
/// use roguewick::newick::parse_trees;
/// use roguewick::rogue::{CladeCredibility, CladeProbabilities};
///
/// let (trees, _) = parse_trees("((A,B),(C,D));((A,B),(C,D));((A,C),(B,D));")?;
/// let mut oracle = CladeProbabilities::default();
/// for tree in &trees {
///     oracle.add_tree(tree);
/// }
/// oracle.compute_probabilities();
///
/// let expected = 2.0 * (2.0f64 / 3.0).ln();
/// assert!((oracle.tree_probability(&trees[0]) - expected).abs() < 1e-12);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CladeProbabilities {
    num_trees: usize,
    counts: HashMap<Clade, usize>,
    probabilities: HashMap<Clade, f64>,
}

impl CladeProbabilities {
    /// Number of trees added so far.
    pub fn num_trees(&self) -> usize {
        self.num_trees
    }

    /// Number of distinct clades seen so far.
    pub fn num_clades(&self) -> usize {
        self.counts.len()
    }

    /// Returns the fraction of sample trees containing `clade`.
    ///
    /// Valid after [`compute_probabilities`](CladeCredibility::compute_probabilities).
    pub fn clade_probability(&self, clade: &Clade) -> f64 {
        self.probabilities.get(clade).copied().unwrap_or(0.0)
    }
}

impl CladeCredibility for CladeProbabilities {
    fn add_tree(&mut self, tree: &CompactTree) {
        self.num_trees += 1;
        for clade in Clade::all_of(tree) {
            *self.counts.entry(clade).or_insert(0) += 1;
        }
    }

    fn compute_probabilities(&mut self) {
        let num_trees = self.num_trees as f64;
        self.probabilities = self
            .counts
            .iter()
            .map(|(clade, &count)| (clade.clone(), count as f64 / num_trees))
            .collect();
    }

    fn tree_probability(&self, tree: &CompactTree) -> f64 {
        Clade::all_of(tree)
            .iter()
            .map(|clade| self.clade_probability(clade).ln())
            .sum()
    }
}
