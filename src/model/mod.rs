//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [GenTree], which uses the arena pattern to store
//! [Vertex] values. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Root and internal vertices have two or more
//! children, so multifurcations are representable; a tree has at least two
//! leaves.
//!
//! The concrete tree type used throughout the crate is [CompactTree]: each
//! leaf stores a [LabelIndex] into a [LeafLabelMap] shared by all trees of a
//! sample, which makes the label index the interned identity of a taxon.
//!
//! # Building trees
//! Trees are typically constructed during parsing via the [TreeBuilder]
//! trait, which decouples parsers from concrete tree types
//! ([CompactTreeBuilder] → [CompactTree]).
//!
//! # Pruning
//! [`GenTree::without_leaf`] removes one leaf and splices out vertices left
//! with a single child, summing branch lengths so that path lengths between
//! the remaining leaves are preserved.

pub mod compact_tree_builder;
pub mod label_storage;
pub mod leaf_label_map;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

// Tree (generic)
pub use tree::GenTree;
pub use tree::MIN_LEAVES;
pub use tree::PruneError;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::BranchLength;
pub use vertex::Vertex;
// Compact tree
pub use compact_tree_builder::CompactTreeBuilder;
pub use leaf_label_map::LabelIndex;
pub use leaf_label_map::LeafLabelMap;
pub use tree::CompactTree;
// Label handling
pub use label_storage::LabelStorage;
