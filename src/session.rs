//! Module with the session type.
//!
//! A session holds the automaton a front end currently works with. It replaces any global
//! state: the front end owns the session and passes it to every operation.

use log::info;

use crate::{Automaton, AutomatonBuilder, ProcessResult, Regex, Result};

/// The inputs that are run against the sample automaton by [Session::run_samples].
pub const SAMPLE_INPUTS: [&str; 4] = ["abc", "ab", "abcabc", "xyz"];

/// Create the sample automaton.
///
/// It has the states q0, q1 and q2, where q2 is accepting, and the transitions
/// q0 --a--> q1, q1 --b--> q2 and q2 --c--> q0. It accepts the language `ab(cab)*`.
pub fn sample_automaton() -> Result<Automaton> {
    AutomatonBuilder::new()
        .add_state("q0", false)
        .add_state("q1", false)
        .add_state("q2", true)
        .add_transition("q0", "q1", 'a')
        .add_transition("q1", "q2", 'b')
        .add_transition("q2", "q0", 'c')
        .initial_state("q0")
        .build()
}

/// A session that carries the current automaton across operations.
#[derive(Debug, Clone, Default)]
pub struct Session {
    automaton: Automaton,
}

impl Session {
    /// Create a session for the given automaton.
    pub fn new(automaton: Automaton) -> Self {
        Self { automaton }
    }

    /// Create a session for the sample automaton.
    pub fn with_sample() -> Result<Self> {
        Ok(Self::new(sample_automaton()?))
    }

    /// Get the current automaton.
    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Get the current automaton for modification.
    #[inline]
    pub fn automaton_mut(&mut self) -> &mut Automaton {
        &mut self.automaton
    }

    /// Replace the current automaton and return the previous one.
    pub fn replace_automaton(&mut self, automaton: Automaton) -> Automaton {
        std::mem::replace(&mut self.automaton, automaton)
    }

    /// Run a string through the current automaton.
    pub fn test_string(&mut self, input: &str) -> ProcessResult {
        self.automaton.process_string(input)
    }

    /// Run several strings through the current automaton.
    pub fn run_batch<I, S>(&mut self, inputs: I) -> Vec<(String, ProcessResult)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        inputs
            .into_iter()
            .map(|input| {
                let result = self.test_string(input.as_ref());
                info!(
                    "Input '{}': {}",
                    input.as_ref(),
                    if result.accepted() { "accepted" } else { "rejected" }
                );
                (input.as_ref().to_string(), result)
            })
            .collect()
    }

    /// Run the [SAMPLE_INPUTS] through the current automaton.
    pub fn run_samples(&mut self) -> Vec<(String, ProcessResult)> {
        self.run_batch(SAMPLE_INPUTS)
    }

    /// Check if the input matches the pattern. The regex engine does not depend on the
    /// current automaton.
    pub fn test_regex(&self, pattern: &str, input: &str) -> Result<bool> {
        Ok(Regex::new(pattern)?.is_match(input))
    }

    /// Move the cursor of the current automaton back to its initial state.
    pub fn reset(&mut self) {
        self.automaton.reset();
    }
}
