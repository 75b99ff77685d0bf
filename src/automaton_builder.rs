use serde::{Deserialize, Serialize};

use crate::{Automaton, FsmError, FsmErrorKind, Result, StateId};

/// Capacity limits of an automaton.
///
/// `None` means unbounded, which is the default. [Limits::legacy] restores the fixed
/// capacities of 100 states and 500 transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Limits {
    /// The maximum number of states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_states: Option<usize>,
    /// The maximum number of transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_transitions: Option<usize>,
}

impl Limits {
    /// The maximum number of states of the legacy configuration.
    pub const LEGACY_MAX_STATES: usize = 100;
    /// The maximum number of transitions of the legacy configuration.
    pub const LEGACY_MAX_TRANSITIONS: usize = 500;

    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// The fixed capacities of the legacy configuration.
    pub fn legacy() -> Self {
        Self {
            max_states: Some(Self::LEGACY_MAX_STATES),
            max_transitions: Some(Self::LEGACY_MAX_TRANSITIONS),
        }
    }
}

/// A builder for creating an automaton from state names.
///
/// ```rust
/// use fsmlab::AutomatonBuilder;
///
/// let mut automaton = AutomatonBuilder::new()
///     .add_state("even", true)
///     .add_state("odd", false)
///     .add_transition("even", "odd", '1')
///     .add_transition("odd", "even", '1')
///     .add_transition("even", "even", '0')
///     .add_transition("odd", "odd", '0')
///     .build()
///     .expect("AutomatonBuilder error");
/// assert!(automaton.process_string("1010").accepted());
/// assert!(!automaton.process_string("100").accepted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    limits: Limits,
    states: Vec<(String, bool)>,
    transitions: Vec<(String, String, char)>,
    initial_state: Option<String>,
    alphabet: Vec<char>,
}

impl AutomatonBuilder {
    /// Creates a new automaton builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Uses the legacy capacity limits.
    pub fn legacy_limits(self) -> Self {
        self.limits(Limits::legacy())
    }

    /// Limits the number of states.
    pub fn max_states(mut self, max_states: usize) -> Self {
        self.limits.max_states = Some(max_states);
        self
    }

    /// Limits the number of transitions.
    pub fn max_transitions(mut self, max_transitions: usize) -> Self {
        self.limits.max_transitions = Some(max_transitions);
        self
    }

    /// Adds a state. The first state added is the initial state unless
    /// [AutomatonBuilder::initial_state] is used.
    pub fn add_state<S: Into<String>>(mut self, name: S, accepting: bool) -> Self {
        self.states.push((name.into(), accepting));
        self
    }

    /// Adds a transition between two states given by name.
    pub fn add_transition<S: Into<String>, T: Into<String>>(
        mut self,
        from: S,
        to: T,
        symbol: char,
    ) -> Self {
        self.transitions.push((from.into(), to.into(), symbol));
        self
    }

    /// Sets the initial state by name.
    pub fn initial_state<S: Into<String>>(mut self, name: S) -> Self {
        self.initial_state = Some(name.into());
        self
    }

    /// Adds symbols to the alphabet that need not appear in any transition.
    pub fn alphabet<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.alphabet.extend(symbols);
        self
    }

    /// Builds the automaton from the builder.
    pub fn build(self) -> Result<Automaton> {
        let mut automaton = Automaton::with_limits(self.limits);
        for (name, accepting) in self.states {
            automaton.add_state(name, accepting)?;
        }
        for (from, to, symbol) in &self.transitions {
            let from = Self::resolve(&automaton, from)?;
            let to = Self::resolve(&automaton, to)?;
            automaton.add_transition(from, to, *symbol)?;
        }
        automaton.seed_alphabet(self.alphabet);
        if let Some(name) = &self.initial_state {
            let initial_state = Self::resolve(&automaton, name)?;
            automaton.set_initial_state(initial_state)?;
        }
        Ok(automaton)
    }

    fn resolve(automaton: &Automaton, name: &str) -> Result<StateId> {
        automaton
            .state_id(name)
            .ok_or_else(|| FsmError::new(FsmErrorKind::UnknownState(name.to_string())))
    }
}
