//! Provides [TreeBuilder] implementation struct for [CompactTree].

use crate::model::label_storage::LabelStorage;
use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::{CompactTree, LabelIndex, LeafLabelMap, VertexIndex};

/// Builder that constructs [CompactTree] instances.
///
/// [CompactTreeBuilder] implements [TreeBuilder] to construct
/// [CompactTree] instances during parsing. Labels are stored externally in
/// a [LeafLabelMap], with leaves holding only [LabelIndex] references.
///
/// This is the builder used for tree streams, as all trees share a single
/// label map, avoiding string duplication.
///
/// # Example
/// ```
/// use roguewick::newick::NewickParser;
/// use roguewick::parser::ByteParser;
///
/// let byte_parser = ByteParser::for_str("(A,(B,C));");
/// let mut parser = NewickParser::new_compact_defaults();
/// let trees = parser.parse_all(byte_parser)?;
/// let labels = parser.into_label_storage();
/// assert_eq!(trees.len(), 1);
/// assert_eq!(labels.num_labels(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct CompactTreeBuilder {
    current_tree: Option<CompactTree>,
}

impl CompactTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    /// Tree under construction; starts an empty one if `init_next` was skipped.
    fn tree(&mut self) -> &mut CompactTree {
        self.current_tree.get_or_insert_with(|| CompactTree::new(0))
    }
}

impl TreeBuilder for CompactTreeBuilder {
    type LabelRef = LabelIndex;
    type VertexIdx = VertexIndex;
    type Tree = CompactTree;
    type Storage = LeafLabelMap;

    fn create_storage(capacity: usize) -> LeafLabelMap {
        LeafLabelMap::with_capacity(capacity)
    }

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = Some(CompactTree::new(num_leaves));
    }

    fn add_leaf(&mut self, branch_len: Option<f64>, label: LabelIndex) -> Self::VertexIdx {
        self.tree().add_leaf(branch_len.map(BranchLength::new), label)
    }

    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        branch_len: Option<f64>,
    ) -> Self::VertexIdx {
        self.tree()
            .add_internal_vertex(children, branch_len.map(BranchLength::new))
    }

    fn add_root(&mut self, children: Vec<Self::VertexIdx>, branch_len: Option<f64>) -> Self::VertexIdx {
        self.tree()
            .add_root(children, branch_len.map(BranchLength::new))
    }

    fn finish_tree(&mut self) -> Option<Self::Tree> {
        self.current_tree.take()
    }
}
