//! Vertex and branch length types for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::{Add, Deref};

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has at least two children, no parent, might have branch_length
/// - **Internal**: Has parent and at least two children, no label, might have branch_length
/// - **Leaf**: Has no children, has label (reference) and might have branch_length
///
/// Generic over `L`, the way a leaf references its label (see
/// [CompactTree](crate::model::CompactTree)).
///
/// # Invariants
/// - `index` is index in arena
/// - `branch_length` is non-negative and finite (enforced by [BranchLength]); might not be set
/// - Internal vertices and leaves have `parent` set to [VertexIndex] of parent in arena;
///   `NO_PARENT_SET = usize::MAX` only during construction
/// - Children are kept in the order they were given (Newick order)
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex<L> {
    /// Root vertex of the tree (has no parent, has children)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in order
        children: Vec<VertexIndex>,
        /// Length of the root edge (rare, but allowed in Newick)
        branch_length: Option<BranchLength>,
    },
    /// Internal vertex (has parent and children, no label)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in order
        children: Vec<VertexIndex>,
        /// Distance to parent vertex (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (has parent and label, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Distance to parent vertex (optional, non-negative if present)
        branch_length: Option<BranchLength>,
        /// Label reference of this leaf
        label: L,
    },
}

impl<L> Vertex<L> {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in order
    /// * `branch_length` - Optional root edge length
    pub fn new_root(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Root {
            index,
            children,
            branch_length,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in order
    /// * `branch_length` - Distance to parent vertex
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            branch_length,
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent vertex
    /// * `label` - Label reference for this leaf
    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, label: L) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            branch_length,
            label,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length().is_some()
    }

    /// Returns the branch length of this vertex, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { branch_length, .. } => *branch_length,
            Vertex::Internal { branch_length, .. } => *branch_length,
            Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Replaces the branch length of this vertex.
    pub fn set_branch_length(&mut self, length: Option<BranchLength>) {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length = length,
        }
    }

    /// Returns reference to label if this is a leaf, else `None`.
    pub fn label(&self) -> Option<&L> {
        match self {
            Vertex::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the children if this is a root or internal vertex, else `None`.
    pub fn children(&self) -> Option<&[VertexIndex]> {
        match self {
            Vertex::Root { children, .. } => Some(children),
            Vertex::Internal { children, .. } => Some(children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } => *p = parent,
            Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }

    /// Turns an internal vertex into the root, keeping index and children.
    ///
    /// Used when pruning leaves the old root with a single child.
    ///
    /// # Panics
    /// Panics if called on a leaf.
    pub(crate) fn promote_to_root(&mut self, branch_length: Option<BranchLength>) {
        let (index, children) = match self {
            Vertex::Root { index, children, .. } | Vertex::Internal { index, children, .. } => {
                (*index, std::mem::take(children))
            }
            Vertex::Leaf { .. } => panic!("Cannot promote leaf to root"),
        };
        *self = Vertex::new_root(index, children, branch_length);
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        if length >= 0.0 && length.is_finite() {
            Some(BranchLength(length))
        } else {
            None
        }
    }

    /// Combines the lengths of two edges merged into one by splicing out
    /// their shared vertex. A missing length on one side takes the other.
    pub fn merge(upper: Option<BranchLength>, lower: Option<BranchLength>) -> Option<BranchLength> {
        match (upper, lower) {
            (Some(upper), Some(lower)) => Some(upper + lower),
            (Some(length), None) | (None, Some(length)) => Some(length),
            (None, None) => None,
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Add for BranchLength {
    type Output = BranchLength;

    fn add(self, rhs: BranchLength) -> BranchLength {
        BranchLength(self.0 + rhs.0)
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
