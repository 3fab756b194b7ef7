//! Basic low-level byte parser functionality.
pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use byte_source::{ByteSource, SliceByteSource};
pub use parsing_error::{ParsingError, ParsingErrorType};
