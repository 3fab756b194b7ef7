//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse single strings, whole tree streams, or exactly one tree per
//! line of input.

use crate::model::label_storage::LabelStorage;
use crate::model::tree_builder::TreeBuilder;
use crate::model::{BranchLength, CompactTreeBuilder, LeafLabelMap};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for single/multiple Newick format
/// phylogenetic trees.
///
/// Generic over [TreeBuilder] (construction). Leaf labels are stored in the
/// builder's [LabelStorage], which is shared by all trees parsed with the
/// same parser, so equal labels in different trees resolve to the same
/// reference.
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`new_compact_defaults()`](Self::new_compact_defaults)
///     - uses [CompactTreeBuilder] and a [LeafLabelMap]
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree, leave the rest
/// * [`parse_exactly_one`](Self::parse_exactly_one) - Parse single tree,
///   reject anything but whitespace and comments after it
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
///
/// # Example
/// ```
/// use roguewick::newick::NewickParser;
/// use roguewick::parser::ByteParser;
///
/// let input = "((A_meleagrides:1.0,A_vulturinum:1.0):0.5,(N_meleagris:1.0,G_plumifera:1.0):0.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let mut newick_parser = NewickParser::new_compact_defaults();
///
/// let tree = newick_parser.parse_str(&mut byte_parser).unwrap();
/// let labels = newick_parser.into_label_storage();
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(labels.num_labels(), 4);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    know_num_leaves: bool,
    num_leaves: usize,
    tree_builder: T,
    storage: T::Storage,
}

// ============================================================================
// Construction & Configuration, Deconstruction (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder
    /// and a fresh label storage.
    pub fn new(tree_builder: T) -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            tree_builder,
            storage: T::create_storage(DEFAULT_NUM_LEAVES_GUESS),
        }
    }

    /// Consumes the parser and returns the underlying
    /// [LabelStorage].
    ///
    /// This should be called after all trees have been parsed to retrieve
    /// the mapping of leaf labels to references.
    pub fn into_label_storage(self) -> T::Storage {
        self.storage
    }
}

impl NewickParser<CompactTreeBuilder> {
    /// Creates a new [NewickParser] for [CompactTree](crate::model::CompactTree)
    /// with default settings:
    /// - Number of leaves is unknown (will be counted during parsing)
    /// - Labels interned in a fresh [LeafLabelMap]
    pub fn new_compact_defaults() -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            tree_builder: CompactTreeBuilder::new(),
            storage: LeafLabelMap::new(DEFAULT_NUM_LEAVES_GUESS),
        }
    }
}

impl Default for NewickParser<CompactTreeBuilder> {
    fn default() -> Self {
        Self::new_compact_defaults()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    ///
    /// # Returns
    /// * `Ok(Vec<T::Tree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<T::Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses exactly one Newick tree from the byte source.
    ///
    /// After the terminating `;` only whitespace and `[...]` comments may
    /// follow; anything else is an error. Used for line-oriented tree streams.
    ///
    /// # Example
    /// ```
    /// use roguewick::newick::NewickParser;
    /// use roguewick::parser::ByteParser;
    ///
    /// let mut parser = NewickParser::new_compact_defaults();
    /// assert!(parser.parse_exactly_one(ByteParser::for_str("(A,B); [end]")).is_ok());
    /// assert!(parser.parse_exactly_one(ByteParser::for_str("(A,B);(A,B);")).is_err());
    /// ```
    pub fn parse_exactly_one<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        let tree = self.parse_str(&mut byte_parser)?;
        byte_parser.skip_comment_and_whitespace()?;
        if !byte_parser.is_eof() {
            return Err(ParsingError::trailing_content(&mut byte_parser));
        }
        Ok(tree)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_leaves);

        // If number of leaves not know yet, reset it to 0,
        // so actual count can now be tracked
        if !self.know_num_leaves {
            self.num_leaves = 0;
        }

        self.parse_root(parser)?;

        // Having parsed a full tree,
        // the number of leaves in a tree is now known
        self.know_num_leaves = true;

        self.tree_builder.finish_tree().ok_or_else(|| {
            ParsingError::invalid_newick_string(parser, "No tree under construction".to_string())
        })
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses root of tree and adds it to tree:
    /// - `(child, child, ...)[label][:branch_length];`
    /// - Skips leading comments and whitespace
    /// - Calls `parse_children` to parse the children list
    ///
    /// Equivalent to `parse_internal_vertex` but takes care of root specialities.
    fn parse_root<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let children = self.parse_children(parser)?;
        self.skip_internal_label(parser)?;

        // Root may have an optional branch length (might be None)
        let branch_length = self.parse_branch_length(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        self.tree_builder.add_root(children, branch_length);

        Ok(())
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its vertex:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`, otherwise `parse_leaf`
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser)
        } else {
            self.parse_leaf(parser)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(child, child, ...)[label][:branch_length]`
    fn parse_internal_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let children = self.parse_children(parser)?;
        self.skip_internal_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;
        Ok(self.tree_builder.add_internal(children, branch_length))
    }

    /// Parses children list `(child, child, ...)` and returns their indices:
    /// - Expects parser at opening `(`
    ///   (caller should skip leading comments/whitespace)
    /// - Requires at least two children
    fn parse_children<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<T::VertexIdx>, ParsingError> {
        // Calling methods should have skipped comments and whitespace
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' before children but found {:?}", next_char),
            ));
        }

        // Parse: "child" {"," "child"}
        let mut children = vec![self.parse_vertex(parser)?];
        loop {
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b',') {
                break;
            }
            children.push(self.parse_vertex(parser)?);
        }

        // Parse: ")"
        if !parser.consume_if(b')') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ',' or ')' after child but found {:?}", next_char),
            ));
        }

        if children.len() < 2 {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Vertex with a single child".to_string(),
            ));
        }

        Ok(children)
    }

    /// Skips the optional label after a closing `)`, quoted or not.
    ///
    /// Internal labels are mostly support values (`(A,B)0.95:1`); only leaf
    /// labels identify taxa, so they are not kept.
    fn skip_internal_label<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<(), ParsingError> {
        parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        Ok(())
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///   (caller should skip leading comments/whitespace)
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected leaf label but found {:?}", next_char),
            ));
        }
        let label_ref = self.storage.store_and_ref(&label);
        let branch_length = self.parse_branch_length(parser)?;
        if !self.know_num_leaves {
            self.num_leaves += 1;
        }

        Ok(self.tree_builder.add_leaf(branch_length, label_ref))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a valid branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is not a non-negative, finite number
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        // Parse: Whitespace/Comments : Whitespace/Comments
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        // Find end of branch length substring
        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        match branch_length_str.parse::<f64>().ok().and_then(BranchLength::try_new) {
            Some(branch_length) => Ok(Some(*branch_length)),
            None => Err(ParsingError::invalid_branch_length(parser, branch_length_str)),
        }
    }
}
