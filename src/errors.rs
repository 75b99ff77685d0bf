use thiserror::Error;

/// The result type for the `fsmlab` crate.
pub type Result<T> = std::result::Result<T, FsmError>;

/// The error type for the `fsmlab` crate.
#[derive(Error, Debug)]
pub struct FsmError {
    /// The source of the error.
    pub source: Box<FsmErrorKind>,
}

impl FsmError {
    /// Create a new `FsmError`.
    pub fn new(kind: FsmErrorKind) -> Self {
        FsmError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &FsmErrorKind {
        &self.source
    }
}

impl std::fmt::Display for FsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsmErrorKind {
    /// A configured maximum of states or transitions has been reached.
    #[error("Maximum number of {what} reached ({limit})")]
    CapacityExceeded {
        /// What ran out, i.e. "states" or "transitions".
        what: &'static str,
        /// The configured limit.
        limit: usize,
    },

    /// A state with the same name already exists in the automaton.
    #[error("State '{0}' already exists")]
    DuplicateState(String),

    /// A state handle or state name does not refer to a state of the automaton.
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// The regex pattern could not be parsed.
    #[error(transparent)]
    MalformedRegex(RegexError),
}

impl From<RegexError> for FsmError {
    fn from(error: RegexError) -> Self {
        FsmError::new(FsmErrorKind::MalformedRegex(error))
    }
}

/// An error type for the regex parser.
/// The position is the character index in the pattern where the error was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// A group was opened but never closed.
    #[error("Unclosed group opened at position {0}")]
    UnclosedGroup(usize),

    /// A closing parenthesis without a matching opening one.
    #[error("Unmatched ')' at position {0}")]
    UnmatchedCloseParen(usize),

    /// A postfix operator that has nothing to repeat.
    #[error("Operator '{1}' at position {0} has no operand")]
    MissingOperand(usize, char),
}
