//! Provides generic tree representations.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [`GenTree<LabelRef>`] - Main tree structure using the arena pattern
//!   for efficient memory layout, generic over way vertices handle labels.
//! * [CompactTree] as realization with [LabelIndex]
//! * [VertexIndex] as type used to index vertices in tree
//!
//! Pruning a leaf ([`GenTree::without_leaf`]) rebuilds a fresh arena instead
//! of leaving tombstones behind, so every tree in memory is always compact.

use crate::model::leaf_label_map::{LabelIndex, LeafLabelMap};
use crate::model::vertex::{BranchLength, Vertex};
use crate::newick;
use std::collections::HashMap;
use thiserror::Error;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

/// Smallest number of leaves a tree may be pruned down to.
pub const MIN_LEAVES: usize = 2;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
/// Cloning a tree is thus a plain deep copy of the arena.
///
/// Generic over `L` (LabelRef), representing how leaves handle labels
/// (e.g. as index into a shared [LeafLabelMap]).
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
///   (e.g. leaves must not be first `n` indices)
/// - Root and internal vertices have at least two children.
/// - Branch lengths are optional, but if provided must be non-negative.
///
/// # Construction
/// To construct a tree, specify its size based on the number of leaves,
/// then add vertices one by one bottom-up, children before parents.
/// Test validity with [`GenTree::is_valid()`].
#[derive(Debug, Clone)]
pub struct GenTree<L> {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex<L>>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

/// Tree with shared labels via [LeafLabelMap], which is efficient for set of trees.
pub type CompactTree = GenTree<LabelIndex>;

// =#========================================================================#=
// PRUNE ERROR
// =#========================================================================#=
/// Reasons why a leaf cannot be pruned from a single tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    /// No leaf of the tree carries the requested label.
    #[error("leaf not present in tree")]
    LeafNotFound,

    /// Removing the leaf would leave fewer than [MIN_LEAVES] leaves.
    #[error("pruning would leave {remaining} leaves, at least {} required", MIN_LEAVES)]
    TooFewLeaves {
        /// Number of leaves that would remain
        remaining: usize,
    },
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<L> GenTree<L> {
    /// Creates a new tree with capacity for a binary tree with `num_leaves` leaves.
    ///
    /// # Arguments
    /// `num_leaves` - expected number of leaves, used as allocation hint
    pub fn new(num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        GenTree {
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices in order
    /// * `branch_length` - Optional length of incoming edge (for special cases, non-negative)
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_root(index, children, branch_length));
        self.root_index = index;

        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices in order
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length));

        index
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    /// * `label` - Label (ref) for this leaf
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>, label: L) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, branch_length, label));
        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex<L> {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex<L> {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns an iterator over the labels of all leaves, in arena order.
    pub fn leaf_labels(&self) -> impl Iterator<Item = &L> {
        self.vertices.iter().filter_map(|v| v.label())
    }

    /// Checks if all non-root vertices have branch lengths set.
    pub fn vertices_have_branch_lengths(&self) -> bool {
        self.vertices
            .iter()
            .all(|vertex| vertex.is_root() || vertex.has_branch_length())
    }

    /// Returns the path length between two vertices, i.e. the sum of branch
    /// lengths on the path connecting them.
    ///
    /// # Returns
    /// `None` if an edge on the path has no branch length.
    pub fn distance_between(&self, a: VertexIndex, b: VertexIndex) -> Option<f64> {
        // Distances from `a` to each of its ancestors (and itself)
        let mut ancestors_of_a = HashMap::new();
        let mut current = a;
        let mut dist_a = Some(0.0);
        loop {
            ancestors_of_a.insert(current, dist_a);
            match self[current].parent() {
                Some(parent) => {
                    dist_a = dist_a.zip(self[current].branch_length()).map(|(d, bl)| d + *bl);
                    current = parent;
                }
                None => break,
            }
        }

        // Climb from `b` until first common ancestor
        let mut current = b;
        let mut dist_b = Some(0.0);
        loop {
            if let Some(dist_a) = ancestors_of_a.get(&current) {
                return dist_a.zip(dist_b).map(|(x, y)| x + y);
            }
            let parent = self[current].parent()?;
            dist_b = dist_b.zip(self[current].branch_length()).map(|(d, bl)| d + *bl);
            current = parent;
        }
    }

    /// Turns the vertex at `index` into the root of this tree.
    fn promote_to_root(&mut self, index: VertexIndex, branch_length: Option<BranchLength>) {
        self.vertices[index].promote_to_root(branch_length);
        self.root_index = index;
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to the only Root vertex
    /// - All vertex indices match their position in the arena
    /// - Root and internal vertices have at least two children
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Root vertex has no parent set, all others have valid parent set
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut found_root = false;
        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check that there is only one root
            if vertex.is_root() {
                if found_root {
                    return false;
                }
                found_root = true;
            }

            // Check children references
            if let Some(children) = vertex.children() {
                if children.len() < 2 {
                    return false;
                }
                for &child in children {
                    if child >= self.vertices.len() || self.vertices[child].parent() != Some(index)
                    {
                        return false;
                    }
                }
            }

            // Check parent references
            if !vertex.is_root() {
                let Some(parent_index) = vertex.parent() else {
                    return false;
                };
                if parent_index >= self.vertices.len() {
                    return false;
                }
                match self.vertices[parent_index].children() {
                    Some(siblings) if siblings.contains(&index) => {}
                    _ => return false,
                }
            }
        }

        true
    }
}

// ============================================================================
// Pruning (pub)
// ============================================================================
impl<L: PartialEq + Clone> GenTree<L> {
    /// Returns the index of the leaf carrying `label`, if any.
    pub fn leaf_with_label(&self, label: &L) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .find(|v| v.label() == Some(label))
            .map(|v| v.index())
    }

    /// Returns a new tree with the leaf carrying `label` removed.
    ///
    /// Vertices left with a single child are spliced out and the two merged
    /// edges get the sum of their branch lengths, so path lengths between the
    /// remaining leaves are preserved. If the root is left with a single
    /// child, that child becomes the root and takes over the root edge.
    /// Child order of the remaining vertices is kept. This tree is untouched.
    ///
    /// # Errors
    /// * [PruneError::LeafNotFound] - no leaf carries `label`
    /// * [PruneError::TooFewLeaves] - less than [MIN_LEAVES] leaves would remain
    ///
    /// # Example
    /// ```
    /// use roguewick::model::{CompactTree, BranchLength};
    ///
    /// let mut tree = CompactTree::new(3);
    /// let a = tree.add_leaf(Some(BranchLength::new(1.0)), 0);
    /// let b = tree.add_leaf(Some(BranchLength::new(1.0)), 1);
    /// let ab = tree.add_internal_vertex(vec![a, b], Some(BranchLength::new(0.5)));
    /// let c = tree.add_leaf(Some(BranchLength::new(1.5)), 2);
    /// tree.add_root(vec![ab, c], None);
    ///
    /// let pruned = tree.without_leaf(&1).unwrap();
    /// assert_eq!(pruned.num_leaves(), 2);
    /// assert!(pruned.is_valid());
    /// ```
    pub fn without_leaf(&self, label: &L) -> Result<GenTree<L>, PruneError> {
        let target = self.leaf_with_label(label).ok_or(PruneError::LeafNotFound)?;
        let remaining = self.num_leaves() - 1;
        if remaining < MIN_LEAVES {
            return Err(PruneError::TooFewLeaves { remaining });
        }

        let mut pruned = GenTree::new(remaining);

        // Position of each old vertex in the new arena; `None` if dropped
        let mut mapped: Vec<Option<VertexIndex>> = vec![None; self.vertices.len()];

        for vertex in self.post_order_iter() {
            let old_index = vertex.index();
            if old_index == target {
                continue;
            }

            match vertex {
                Vertex::Leaf {
                    branch_length,
                    label,
                    ..
                } => {
                    mapped[old_index] = Some(pruned.add_leaf(*branch_length, label.clone()));
                }
                Vertex::Internal {
                    children,
                    branch_length,
                    ..
                } => {
                    let kept: Vec<VertexIndex> =
                        children.iter().filter_map(|&child| mapped[child]).collect();
                    mapped[old_index] = match kept.as_slice() {
                        [] => None,
                        [only] => {
                            let merged =
                                BranchLength::merge(*branch_length, pruned[*only].branch_length());
                            pruned.vertices[*only].set_branch_length(merged);
                            Some(*only)
                        }
                        _ => Some(pruned.add_internal_vertex(kept, *branch_length)),
                    };
                }
                Vertex::Root {
                    children,
                    branch_length,
                    ..
                } => {
                    let kept: Vec<VertexIndex> =
                        children.iter().filter_map(|&child| mapped[child]).collect();
                    match kept.as_slice() {
                        [] => return Err(PruneError::TooFewLeaves { remaining: 0 }),
                        [only] => {
                            if pruned[*only].is_leaf() {
                                return Err(PruneError::TooFewLeaves { remaining: 1 });
                            }
                            pruned.promote_to_root(*only, *branch_length);
                        }
                        _ => {
                            pruned.add_root(kept, *branch_length);
                        }
                    }
                }
            }
        }

        Ok(pruned)
    }
}

impl<L> std::ops::Index<VertexIndex> for GenTree<L> {
    type Output = Vertex<L>;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl<L> std::ops::IndexMut<VertexIndex> for GenTree<L> {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Printing (pub, only for CompactTree)
// ============================================================================
impl CompactTree {
    /// Newick string of this tree with leaf labels from `labels`.
    pub fn to_newick(&self, labels: &LeafLabelMap) -> String {
        newick::to_newick(self, labels)
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
impl<L> GenTree<L> {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is useful for aggregating data from leaves upward, e.g. clades.
    ///
    /// # Example
    /// ```
    /// use roguewick::model::{CompactTree, BranchLength};
    ///
    /// let mut tree = CompactTree::new(2);
    /// let a = tree.add_leaf(Some(BranchLength::new(1.0)), 0);
    /// let b = tree.add_leaf(Some(BranchLength::new(1.0)), 1);
    /// let root = tree.add_root(vec![a, b], None);
    ///
    /// let indices: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![a, b, root]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_, L> {
        PostOrderIter::new(self)
    }

}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a, L> {
    tree: &'a GenTree<L>,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a, L> PostOrderIter<'a, L> {
    fn new(tree: &'a GenTree<L>) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a, L> Iterator for PostOrderIter<'a, L> {
    type Item = &'a Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(vertex);
            }

            // Mark this vertex as "children will be visited"
            self.stack.push((index, true));

            // Push children in reverse, so first child is processed first
            if let Some(children) = vertex.children() {
                self.stack
                    .extend(children.iter().rev().map(|&child| (child, false)));
            }
        }
        None
    }
}
