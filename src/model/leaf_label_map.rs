//! Leaf label module for phylogenetic tree representation.
//!
//! - [LeafLabelMap]: Joined storage and lookup for leaf labels (taxa) of trees on same labels.

use crate::model::label_storage::LabelStorage;
use std::collections::HashMap;

/// Index of a label (taxon) in a [LeafLabelMap].
pub type LabelIndex = usize;

// =#========================================================================#=
// LEAF LABEL MAP
// =#========================================================================#=
/// Maps leaf labels (strings) to compact indices for efficient storage.
///
/// This bidirectional mapping allows multiple trees with the same taxa to share
/// a single label storage, with each leaf referencing labels by [LabelIndex].
/// Labels are deduplicated automatically - inserting the same label twice returns
/// the same index. Labels are never removed, so an index stays valid even
/// after its taxon was pruned from all trees.
///
/// # Example
/// ```
/// use roguewick::model::LeafLabelMap;
///
/// let mut labels = LeafLabelMap::new(3);
///
/// let idx_a = labels.get_or_insert("A");  // idx_a = 0
/// let idx_b = labels.get_or_insert("B");  // idx_b = 1
/// let idx_a2 = labels.get_or_insert("A"); // idx_a2 = 0 (deduplicated)
///
/// assert_eq!(idx_a, idx_a2);
/// assert_eq!(labels.get_label(idx_a), Some("A"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafLabelMap {
    /// List of unique labels
    labels: Vec<String>,
    /// Map from label to its index
    map: HashMap<String, LabelIndex>,
}

impl LeafLabelMap {
    /// Creates a new LeafLabelMap with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of unique leaf labels
    pub fn new(num_leaves: usize) -> Self {
        LeafLabelMap {
            labels: Vec::with_capacity(num_leaves),
            map: HashMap::with_capacity(num_leaves),
        }
    }

    /// Gets the index for a label, inserting it if it doesn't exist.
    ///
    /// If the label already exists, returns its existing index.
    /// If the label is new, assigns it the next available index.
    pub fn get_or_insert(&mut self, s: &str) -> LabelIndex {
        if let Some(&index) = self.map.get(s) {
            return index;
        }

        let idx = self.labels.len();
        self.labels.push(s.to_string());
        self.map.insert(s.to_string(), idx);
        idx
    }

    /// Retrieves the index for a given label.
    ///
    /// # Returns
    /// `Some(index)` if the label exists, `None` otherwise
    pub fn get_index(&self, s: &str) -> Option<LabelIndex> {
        self.map.get(s).copied()
    }

    /// Retrieves the leaf label for a given index.
    ///
    /// # Returns
    /// `Some(&str)` if the index is valid, `None` otherwise
    pub fn get_label(&self, index: LabelIndex) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Returns the number of labels currently stored.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Returns reference to the labels in this map.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl LabelStorage for LeafLabelMap {
    type LabelRef = LabelIndex;

    fn with_capacity(num_labels: usize) -> Self {
        LeafLabelMap::new(num_labels)
    }

    fn store_and_ref(&mut self, label: &str) -> LabelIndex {
        self.get_or_insert(label)
    }

    fn check_and_ref(&self, label: &str) -> Option<LabelIndex> {
        self.get_index(label)
    }

    fn num_labels(&self) -> usize {
        self.labels.len()
    }
}

impl std::ops::Index<LabelIndex> for LeafLabelMap {
    type Output = str;

    fn index(&self, index: LabelIndex) -> &Self::Output {
        &self.labels[index]
    }
}
