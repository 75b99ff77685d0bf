#![forbid(missing_docs)]
//! # `fsmlab`
//! The `fsmlab` crate is a library to explore finite automata and regular expressions.
//! It lets you build a deterministic finite automaton by hand and run strings through it with
//! a full execution trace, convert a nondeterministic automaton with epsilon transitions into an
//! equivalent deterministic one using the subset construction, and match strings against a
//! small regular expression language with a matcher that explores every alternative.
//!
//! # Example
//! ```rust
//! use fsmlab::{AutomatonBuilder, Regex};
//!
//! let mut automaton = AutomatonBuilder::new()
//!     .add_state("q0", false)
//!     .add_state("q1", false)
//!     .add_state("q2", true)
//!     .add_transition("q0", "q1", 'a')
//!     .add_transition("q1", "q2", 'b')
//!     .add_transition("q2", "q0", 'c')
//!     .build()
//!     .expect("AutomatonBuilder error");
//!
//! let result = automaton.process_string("abcab");
//! for line in result.trace_lines() {
//!     println!("{}", line);
//! }
//! assert!(result.accepted());
//!
//! let regex = Regex::new("a+b*").expect("Regex error");
//! assert!(regex.is_match("aaabbb"));
//! assert!(!regex.is_match("bbb"));
//! ```
//! The output of the example is:
//! ```text
//! Starting at state: q0
//! Read 'a': q0 -> q1
//! Read 'b': q1 -> q2
//! Read 'c': q2 -> q0
//! Read 'a': q0 -> q1
//! Read 'b': q1 -> q2
//! String ACCEPTED
//! ```
//!
//! # Regex syntax
//! The regex language knows literals, concatenation, alternation `|`, the postfix operators
//! `*`, `+` and `?` and grouping with parentheses. Every other character is a literal.
//! A match always covers the whole input.
//!
//! # Crate features
//! - `dot_writer`: Enabled by default. Adds rendering of automata to the graphviz dot format.

/// Module with the automaton model
mod automaton;
pub use automaton::{Automaton, State, Transition};

/// Module with the automaton builder and its limits
mod automaton_builder;
pub use automaton_builder::{AutomatonBuilder, Limits};

/// Module with error definitions
mod errors;
pub use errors::{FsmError, FsmErrorKind, RegexError, Result};

/// Module with the DFA executor
mod executor;
pub use executor::{process_string, ProcessResult, Rejection, TraceEntry};

/// The module with internal implementation details.
mod internal;
pub use internal::convert_to_dfa;
pub use internal::ids::{StateId, TransitionId};

/// Module with the NFA description
mod nfa;
pub use nfa::{NfaDescription, NfaState, StateSet};

/// Module that provides the Regex type
mod regex_type;
pub use regex_type::{is_match, PrefixMatch, Regex};

/// Module with the regex AST
mod regex_ast;
pub use regex_ast::RegexAst;

/// Module with the session type
mod session;
pub use session::{sample_automaton, Session, SAMPLE_INPUTS};
