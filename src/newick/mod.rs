//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick format strings
//! into tree structures, and [write_newick] / [to_newick] to serialize
//! [CompactTree]s back. The parser uses a
//! [TreeBuilder](crate::model::TreeBuilder) internally.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns a [CompactTree] + [LeafLabelMap]
//! * [`parse_trees`] - parses a string of several trees, returns [CompactTree]s + [LeafLabelMap]
//!
//! # Full API
//! For more control, configure a [NewickParser] and
//! provide data via a [ByteParser]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_exactly_one`] - parse a single tree, nothing may follow
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)+ ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels are unquoted, or single-quoted with `''` for a literal quote
//! * Comments are square brackets and can occur anywhere where whitespace
//!   is allowed; rooting tags like `[&R]` are comments too
//! * Branch lengths must be non-negative
//!
//! Labels on internal vertices (e.g. support values) are accepted but not
//! kept; written trees carry leaf labels only.

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick};

use crate::model::{CompactTree, LeafLabelMap};
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [CompactTree] and its labels.
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
/// Only whitespace and comments may follow the terminating `;`.
///
/// # Example
/// ```
/// use roguewick::newick::parse_str;
///
/// let (tree, labels) = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(labels.get_index("Fratercula_arctica"), Some(1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<(CompactTree, LeafLabelMap), ParsingError> {
    let mut newick_parser = NewickParser::new_compact_defaults();
    let tree = newick_parser.parse_exactly_one(ByteParser::for_str(newick.as_ref()))?;
    Ok((tree, newick_parser.into_label_storage()))
}

/// Parses all trees of a string of semicolon-terminated Newick strings.
///
/// Trees may appear on the same line or across multiple lines,
/// and `[...]` comments and whitespace are fine. All trees share the
/// returned [LeafLabelMap].
///
/// # Example
/// ```
/// use roguewick::newick::parse_trees;
///
/// let (trees, labels) = parse_trees("(A,(B,C));\n((A,B),C);")?;
/// assert_eq!(trees.len(), 2);
/// assert_eq!(labels.num_labels(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_trees<S: AsRef<str>>(
    newick: S,
) -> Result<(Vec<CompactTree>, LeafLabelMap), ParsingError> {
    let mut newick_parser = NewickParser::new_compact_defaults();
    let trees = newick_parser.parse_all(ByteParser::for_str(newick.as_ref()))?;
    Ok((trees, newick_parser.into_label_storage()))
}
