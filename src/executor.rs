//! Module with the DFA executor.
//!
//! The executor runs an input string through an [Automaton] and records every step in a
//! trace. Rejections are never reported as errors. Instead the trace ends with an entry
//! that names the reason and [ProcessResult::accepted] is false.

use log::{debug, trace};

use crate::Automaton;

/// One step of an execution trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEntry {
    /// The run started in the given state.
    Start(String),
    /// A symbol was consumed and the cursor moved.
    Step {
        /// The state before the symbol was read.
        from: String,
        /// The symbol that was read.
        symbol: char,
        /// The state after the symbol was read.
        to: String,
    },
    /// The symbol does not belong to the alphabet. The run stops here.
    SymbolNotInAlphabet(char),
    /// The current state has no transition on the symbol. The run stops here.
    NoTransitionDefined {
        /// The current state.
        state: String,
        /// The symbol that could not be consumed.
        symbol: char,
    },
    /// The automaton has no states, hence no initial state.
    NoInitialState,
    /// The input was consumed completely and ended in an accepting state.
    Accepted,
    /// The input was consumed completely and ended in a non-accepting state.
    Rejected,
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEntry::Start(state) => write!(f, "Starting at state: {}", state),
            TraceEntry::Step { from, symbol, to } => {
                write!(f, "Read '{}': {} -> {}", symbol, from, to)
            }
            TraceEntry::SymbolNotInAlphabet(symbol) => {
                write!(f, "Error: '{}' not in alphabet", symbol)
            }
            TraceEntry::NoTransitionDefined { state, symbol } => {
                write!(f, "No transition for '{}' from {}", symbol, state)
            }
            TraceEntry::NoInitialState => write!(f, "Error: automaton has no initial state"),
            TraceEntry::Accepted => write!(f, "String ACCEPTED"),
            TraceEntry::Rejected => write!(f, "String REJECTED"),
        }
    }
}

/// The reason why a run stopped before the input was consumed completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The input contains a symbol outside of the alphabet.
    SymbolNotInAlphabet(char),
    /// The current state has no transition for the next symbol.
    NoTransitionDefined(char),
    /// The automaton has no initial state.
    NoInitialState,
}

/// The result of processing a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    accepted: bool,
    trace: Vec<TraceEntry>,
}

impl ProcessResult {
    fn new() -> Self {
        Self {
            accepted: false,
            trace: Vec::new(),
        }
    }

    /// Check if the string was accepted.
    #[inline]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Get the trace entries in the order they were recorded.
    #[inline]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Get the trace as human readable lines.
    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.iter().map(ToString::to_string).collect()
    }

    /// Get the reason of an early stop, if the run stopped early.
    pub fn rejection(&self) -> Option<Rejection> {
        match self.trace.last()? {
            TraceEntry::SymbolNotInAlphabet(c) => Some(Rejection::SymbolNotInAlphabet(*c)),
            TraceEntry::NoTransitionDefined { symbol, .. } => {
                Some(Rejection::NoTransitionDefined(*symbol))
            }
            TraceEntry::NoInitialState => Some(Rejection::NoInitialState),
            _ => None,
        }
    }

    fn push(&mut self, entry: TraceEntry) {
        trace!("{}", entry);
        self.trace.push(entry);
    }
}

impl std::fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.trace {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Run the input through the automaton.
///
/// The cursor of the automaton is reset to the initial state first. The run stops at the
/// first symbol outside of the alphabet or at the first missing transition.
pub fn process_string(automaton: &mut Automaton, input: &str) -> ProcessResult {
    let mut result = ProcessResult::new();
    automaton.reset();
    let Some(mut current) = automaton.current_state() else {
        result.push(TraceEntry::NoInitialState);
        return result;
    };
    result.push(TraceEntry::Start(automaton.states()[current].name().to_string()));

    for symbol in input.chars() {
        if !automaton.contains_symbol(symbol) {
            debug!("Symbol '{}' is not in the alphabet", symbol);
            result.push(TraceEntry::SymbolNotInAlphabet(symbol));
            return result;
        }
        match automaton.find_transition(current, symbol).copied() {
            Some(transition) => {
                let from = automaton.states()[current].name().to_string();
                current = transition.to();
                automaton.set_current_state(current);
                result.push(TraceEntry::Step {
                    from,
                    symbol,
                    to: automaton.states()[current].name().to_string(),
                });
            }
            None => {
                debug!("No transition for '{}'", symbol);
                result.push(TraceEntry::NoTransitionDefined {
                    state: automaton.states()[current].name().to_string(),
                    symbol,
                });
                return result;
            }
        }
    }

    result.accepted = automaton.states()[current].is_accepting();
    result.push(if result.accepted {
        TraceEntry::Accepted
    } else {
        TraceEntry::Rejected
    });
    result
}

impl Automaton {
    /// Run the input through the automaton, see [process_string].
    pub fn process_string(&mut self, input: &str) -> ProcessResult {
        process_string(self, input)
    }

    /// Check if the automaton accepts the input.
    pub fn accepts(&mut self, input: &str) -> bool {
        process_string(self, input).accepted()
    }
}
