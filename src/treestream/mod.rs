//! Line-oriented tree streams.
//!
//! A tree stream holds one Newick tree per line. Trees are read from named
//! files or standard input into a single [Forest], and the forest is written
//! back one tree per line in the same order.
//!
//! # Reading
//! * [`read_forest`] - all trees from a list of [TreeSource]s
//! * [`read_trees`] - trees from any [BufRead], into a shared [NewickParser]
//!
//! Blank lines are skipped. A line that is not exactly one tree (whitespace
//! and `[...]` comments aside) is a [StreamError::Malformed] error naming the
//! source and the 1-based line number.
//!
//! # Writing
//! * [`write_forest`] - to any [Write]
//! * [`write_forest_to`] - to a file, or standard output

use crate::model::{CompactTree, CompactTreeBuilder};
use crate::newick::{NewickParser, write_newick};
use crate::parser::{ByteParser, ParsingError};
use crate::rogue::{Forest, RogueError};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of standard input as tree source.
pub const STDIN_NAME: &str = "-";

const STDOUT_NAME: &str = "<stdout>";

// =#========================================================================#=
// STREAM ERROR
// =#========================================================================#=
/// Errors of reading or writing tree streams.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("I/O error on {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: io::Error,
    },

    #[error("malformed tree in {source_name}, line {line}: {error}")]
    Malformed {
        source_name: String,
        line: usize,
        #[source]
        error: ParsingError,
    },

    #[error(transparent)]
    Forest(#[from] RogueError),
}

// =#========================================================================#=
// TREE SOURCE
// =#========================================================================#=
/// Where trees are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    Stdin,
    File(PathBuf),
}

impl TreeSource {
    /// Interprets a command-line argument; `-` is standard input.
    ///
    /// # Example
    /// ```
    /// use roguewick::treestream::TreeSource;
    ///
    /// assert_eq!(TreeSource::from_arg("-"), TreeSource::Stdin);
    /// assert_eq!(TreeSource::from_arg("kiwi.nwk"), TreeSource::File("kiwi.nwk".into()));
    /// ```
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_NAME {
            TreeSource::Stdin
        } else {
            TreeSource::File(PathBuf::from(arg))
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> String {
        match self {
            TreeSource::Stdin => STDIN_NAME.to_string(),
            TreeSource::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for TreeSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Reading (pub)
// ============================================================================
/// Reads all trees of the given sources, in order, into one [Forest].
///
/// No sources means standard input.
///
/// # Errors
/// * [StreamError::Io] - a source cannot be opened or read
/// * [StreamError::Malformed] - a line is not a single Newick tree
/// * [StreamError::Forest] - no trees at all, or trees over different taxa
pub fn read_forest(sources: &[TreeSource]) -> Result<Forest, StreamError> {
    let stdin_only = [TreeSource::Stdin];
    let sources = if sources.is_empty() {
        &stdin_only[..]
    } else {
        sources
    };

    let mut parser = NewickParser::new_compact_defaults();
    let mut trees = Vec::new();
    for source in sources {
        let source_name = source.name();
        let num_before = trees.len();
        match source {
            TreeSource::Stdin => {
                read_trees(io::stdin().lock(), &source_name, &mut parser, &mut trees)?
            }
            TreeSource::File(path) => {
                let file = File::open(path).map_err(|error| StreamError::Io {
                    source_name: source_name.clone(),
                    error,
                })?;
                read_trees(BufReader::new(file), &source_name, &mut parser, &mut trees)?
            }
        }
        debug!(source = %source_name, num_trees = trees.len() - num_before, "read trees");
    }

    Ok(Forest::new(trees, parser.into_label_storage())?)
}

/// Reads one tree per non-blank line of `reader` and appends it to `trees`.
///
/// All trees parsed with the same `parser` share its label map.
///
/// # Example
/// ```
/// use roguewick::newick::NewickParser;
/// use roguewick::treestream::read_trees;
///
/// let input = "(A:1,B:2);\n\n((A,B),C);  [comment]\n";
/// let mut parser = NewickParser::new_compact_defaults();
/// let mut trees = Vec::new();
/// read_trees(input.as_bytes(), "input", &mut parser, &mut trees)?;
/// assert_eq!(trees.len(), 2);
/// assert_eq!(parser.into_label_storage().num_labels(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_trees<R: BufRead>(
    reader: R,
    source_name: &str,
    parser: &mut NewickParser<CompactTreeBuilder>,
    trees: &mut Vec<CompactTree>,
) -> Result<(), StreamError> {
    for (line_index, line) in reader.lines().enumerate() {
        let line = line.map_err(|error| StreamError::Io {
            source_name: source_name.to_string(),
            error,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let tree = parser
            .parse_exactly_one(ByteParser::for_str(&line))
            .map_err(|error| StreamError::Malformed {
                source_name: source_name.to_string(),
                line: line_index + 1,
                error,
            })?;
        trees.push(tree);
    }
    Ok(())
}

// ============================================================================
// Writing (pub)
// ============================================================================
/// Writes the trees of `forest`, one per line, in forest order.
pub fn write_forest<W: Write>(writer: W, forest: &Forest) -> io::Result<()> {
    write_newick(writer, forest.trees(), forest.labels())
}

/// Writes the trees of `forest` to the file at `path`, or to standard output
/// if no path is given.
///
/// # Errors
/// [StreamError::Io] if the file cannot be created or written.
pub fn write_forest_to(path: Option<&Path>, forest: &Forest) -> Result<(), StreamError> {
    let (source_name, result) = match path {
        Some(path) => (
            path.display().to_string(),
            File::create(path).and_then(|file| write_forest(BufWriter::new(file), forest)),
        ),
        None => (
            STDOUT_NAME.to_string(),
            write_forest(BufWriter::new(io::stdout().lock()), forest),
        ),
    };
    result.map_err(|error| StreamError::Io { source_name, error })
}
