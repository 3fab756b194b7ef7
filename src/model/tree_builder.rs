//! Trait for constructing phylogenetic trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples parsers from concrete tree representations.
//! Parsers call builder methods as they read Newick syntax, and the
//! builder assembles whatever tree structure it wants.
//!
//! # Label handling
//! A [`TreeBuilder`] works together with a [`LabelStorage`] to handle leaf
//! labels. The key connection is the associated type
//! [`LabelRef`](TreeBuilder::LabelRef):
//!
//! - **[LabelStorage]** gets label strings and returns `LabelRef` values
//! - **[TreeBuilder]** receives those `LabelRef` values in
//!   [`add_leaf`](TreeBuilder::add_leaf)
//!
//! # Built-in implementations
//! * [`CompactTreeBuilder`](crate::model::CompactTreeBuilder) - Builds
//!   [`CompactTree`](crate::model::CompactTree) with labels stored in a shared
//!   [`LeafLabelMap`](crate::model::LeafLabelMap)
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_* ──→ finish_tree() ──→ Empty
//!   ↑                                                                 │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::model::label_storage::LabelStorage;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================#=
/// Abstraction for constructing trees during parsing.
///
/// Parsers are generic over this trait, calling its methods as they encounter
/// leaves, internal vertices, and roots in the input. This allows the same parser
/// to build different tree representations.
///
/// The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal),
///    [`add_root`](Self::add_root) -> build structure bottom-up
/// 3. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
///
/// After `finish_tree`, the builder returns to an empty state,
/// ready for `init_next` again.
pub trait TreeBuilder {
    /// The type used to reference labels within the tree.
    type LabelRef;

    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// The [`LabelStorage`] type compatible with this builder.
    type Storage: LabelStorage<LabelRef = Self::LabelRef>;

    /// Creates a new [`LabelStorage`] instance for parsing.
    ///
    /// Called by the parser before parsing begins. The `capacity` hint
    /// is typically the expected number of leaves.
    fn create_storage(capacity: usize) -> Self::Storage;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `branch_len` - Branch length to parent, if specified in the Newick
    /// * `label` - Label reference obtained from the [LabelStorage]
    fn add_leaf(&mut self, branch_len: Option<f64>, label: Self::LabelRef) -> Self::VertexIdx;

    /// Adds an internal (non-root) vertex with the given children.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in Newick order
    /// * `branch_len` - Branch length to parent, if specified
    fn add_internal(&mut self, children: Vec<Self::VertexIdx>, branch_len: Option<f64>)
    -> Self::VertexIdx;

    /// Adds the root vertex, completing the tree structure.
    ///
    /// # Arguments
    /// * `children` - Indices of the root's child vertices
    /// * `branch_len` - Root branch length (rare, but allowed in Newick)
    fn add_root(&mut self, children: Vec<Self::VertexIdx>, branch_len: Option<f64>)
    -> Self::VertexIdx;

    /// Finalizes the building process and returns the resulting tree.
    ///
    /// Returns `None` if no tree was under construction.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
