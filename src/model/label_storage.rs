//! Trait for label storage backends used by tree builders and parsers.

use std::fmt::{Debug, Display};

// =#========================================================================#=
// LABEL STORAGE
// =#========================================================================#=
/// Backend storage for labels during parsing.
///
/// A [LabelStorage] works with a [TreeBuilder](crate::model::TreeBuilder)
/// to handle leaf labels. During parsing, the
/// [NewickParser](crate::newick::NewickParser) calls storage methods to
/// convert label strings into [LabelRef](Self::LabelRef) values that get
/// passed to the builder.
///
/// The associated type [LabelRef](Self::LabelRef) must match
/// [`TreeBuilder::LabelRef`](crate::model::TreeBuilder::LabelRef).
///
/// # Implementations
/// * [LeafLabelMap](crate::model::LeafLabelMap):
///   returns indices into shared storage
pub trait LabelStorage: Debug {
    /// The reference type stored in tree leaves.
    type LabelRef: Clone + Display + Debug;

    /// Creates a new storage with capacity for the expected number of labels.
    fn with_capacity(num_labels: usize) -> Self;

    /// Stores a label (if new) and returns its reference.
    fn store_and_ref(&mut self, label: &str) -> Self::LabelRef;

    /// Looks up an existing label, returning its reference if found.
    ///
    /// Does not modify storage.
    fn check_and_ref(&self, label: &str) -> Option<Self::LabelRef>;

    /// Returns the number of labels in storage.
    fn num_labels(&self) -> usize;
}
