/// Module with conversion to graphviz dot format
#[cfg(feature = "dot_writer")]
pub(crate) mod dot;

/// Module for several ID types.
pub(crate) mod ids;

/// Module with the regex matcher.
mod matcher;
pub(crate) use matcher::{matches_exactly, matches_suffix};

/// The parser module contains the regex syntax parser.
mod parser;
pub(crate) use parser::parse_regex_syntax;

/// Module with the subset construction that converts an NFA into a DFA.
mod subset_construction;
pub use subset_construction::convert_to_dfa;
