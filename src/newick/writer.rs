//! Newick serialization of [CompactTree]s.

use crate::model::CompactTree;
use crate::model::leaf_label_map::LeafLabelMap;
use crate::model::tree::VertexIndex;
use crate::model::vertex::Vertex;
use crate::parser::utils::escape_label;
use std::io::{self, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes the given trees in Newick format, one tree per line.
///
/// Each tree is written as a complete Newick string followed by a newline,
/// in the given order. Leaf labels are taken from `leaf_label_map` and
/// escaped if necessary.
///
/// # Errors
/// Returns an I/O error if writing fails.
///
/// # Example
/// ```
/// use roguewick::newick::{parse_str, write_newick};
///
/// let (tree, labels) = parse_str("((A:1,B:2):0.5,C:3);")?;
/// let mut out = Vec::new();
/// write_newick(&mut out, &[tree], &labels)?;
/// assert_eq!(String::from_utf8(out)?, "((A:1,B:2):0.5,C:3);\n");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_newick<W: Write>(
    mut writer: W,
    trees: &[CompactTree],
    leaf_label_map: &LeafLabelMap,
) -> io::Result<()> {
    let Some(first) = trees.first() else {
        return Ok(());
    };

    let estimated_capacity = estimate_newick_len(first, leaf_label_map);
    for tree in trees {
        let newick = to_newick_with_capacity(tree, leaf_label_map, estimated_capacity);
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// For example: `(('Little Spotted Kiwi':1,'Great Spotted Kiwi':1):0.5,'Okarito Brown Kiwi':1.5);`
/// Leaf labels are taken from `leaf_label_map` and quoted where needed.
/// Branch lengths are written in the shortest form that parses back to the
/// same value; a root branch length is written after the closing parenthesis.
///
/// # Example
/// ```
/// use roguewick::newick::to_newick;
/// use roguewick::model::{BranchLength, CompactTree, LeafLabelMap};
///
/// let mut tree = CompactTree::new(3);
/// let mut labels = LeafLabelMap::new(3);
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), labels.get_or_insert("A"));
/// let b = tree.add_leaf(Some(BranchLength::new(2.0)), labels.get_or_insert("B"));
/// let c = tree.add_leaf(Some(BranchLength::new(0.25)), labels.get_or_insert("C c"));
/// tree.add_root(vec![a, b, c], None);
///
/// assert_eq!(to_newick(&tree, &labels), "(A:1,B:2,'C c':0.25);");
/// ```
pub fn to_newick(tree: &CompactTree, leaf_label_map: &LeafLabelMap) -> String {
    let estimated_capacity = estimate_newick_len(tree, leaf_label_map);
    to_newick_with_capacity(tree, leaf_label_map, estimated_capacity)
}

/// Returns the Newick representation of a tree with pre-allocated capacity.
///
/// Used when writing multiple trees with similar structure,
/// where the capacity can be estimated once and reused.
fn to_newick_with_capacity(
    tree: &CompactTree,
    leaf_label_map: &LeafLabelMap,
    estimated_capacity: usize,
) -> String {
    // Recursive helper for building the Newick string
    fn build_newick(
        tree: &CompactTree,
        newick: &mut String,
        index: VertexIndex,
        leaf_label_map: &LeafLabelMap,
    ) {
        let vertex = &tree[index];

        match vertex {
            Vertex::Leaf { label, .. } => {
                newick.push_str(&escape_label(&leaf_label_map[*label]));
            }
            Vertex::Internal { children, .. } | Vertex::Root { children, .. } => {
                newick.push('(');
                for (i, &child) in children.iter().enumerate() {
                    if i > 0 {
                        newick.push(',');
                    }
                    build_newick(tree, newick, child, leaf_label_map);
                }
                newick.push(')');
            }
        }
        if let Some(branch_length) = vertex.branch_length() {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimated_capacity);

    if tree.is_root_set() {
        build_newick(tree, &mut newick, tree.root_index(), leaf_label_map);
    }
    newick.push(';');

    newick
}

/// Estimates the length of a Newick string for a given tree, to
/// pre-allocate string capacity.
fn estimate_newick_len(tree: &CompactTree, leaf_label_map: &LeafLabelMap) -> usize {
    // Each non-leaf vertex: "()" plus separating commas
    const NON_LEAF_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let num_non_leaf = tree.num_vertices() - tree.num_leaves();
    let structure_capacity = num_non_leaf * NON_LEAF_CHARS;

    let label_capacity: usize = tree
        .leaf_labels()
        .map(|&label| escape_label(&leaf_label_map[label]).len())
        .sum();

    let branch_capacity = if tree.vertices_have_branch_lengths() {
        tree.num_vertices() * BRANCH_LENGTH_CHARS
    } else {
        0
    };

    structure_capacity + label_capacity + branch_capacity + BUFFER_CHARS
}
