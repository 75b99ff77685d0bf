//! Module with the hand-built deterministic automaton.
//!
//! An [Automaton] owns its states, an ordered list of transitions, an initial state, the
//! alphabet and a cursor that points to the current state while a string is processed.
//! The alphabet is inferred from the symbols of the added transitions, but it can also be
//! seeded explicitly, which is what the subset construction does.

use std::collections::BTreeSet;

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{
    internal::ids::{StateIdBase, TransitionIdBase},
    FsmError, FsmErrorKind, Limits, Result, StateId, TransitionId,
};

/// A state of an automaton.
///
/// The name is the identity of a state. Two states are equal if their names are equal, even
/// if their accepting flags differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    name: String,
    accepting: bool,
}

impl State {
    /// Create a new state.
    pub fn new<S: Into<String>>(name: S, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
        }
    }

    /// Get the name of the state.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the state is an accepting state.
    #[inline]
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for State {}

impl std::hash::Hash for State {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A transition of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    from: StateId,
    to: StateId,
    symbol: char,
}

impl Transition {
    /// Create a new transition.
    pub fn new(from: StateId, to: StateId, symbol: char) -> Self {
        Self { from, to, symbol }
    }

    /// The source state.
    #[inline]
    pub fn from(&self) -> StateId {
        self.from
    }

    /// The target state.
    #[inline]
    pub fn to(&self) -> StateId {
        self.to
    }

    /// The symbol consumed by the transition.
    #[inline]
    pub fn symbol(&self) -> char {
        self.symbol
    }
}

/// A finite automaton that is executed deterministically.
///
/// The model does not reject several transitions for the same state and symbol. In that
/// case the transition declared first is used, see [Automaton::find_transition].
/// Automata created by [crate::convert_to_dfa] never contain such duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "AutomatonData")]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<Transition>,
    initial_state: Option<StateId>,
    alphabet: BTreeSet<char>,
    #[serde(default)]
    limits: Limits,
    // The cursor used while processing a string
    #[serde(skip)]
    current_state: Option<StateId>,
    // Index from state names to state handles
    #[serde(skip)]
    names: FxHashMap<String, StateId>,
}

impl Automaton {
    /// Create a new empty automaton without limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty automaton with the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    /// Add a state and return its handle.
    ///
    /// The first state added becomes the initial state until
    /// [Automaton::set_initial_state] is called.
    pub fn add_state<S: Into<String>>(&mut self, name: S, accepting: bool) -> Result<StateId> {
        if let Some(limit) = self.limits.max_states {
            if self.states.len() >= limit {
                return Err(FsmError::new(FsmErrorKind::CapacityExceeded {
                    what: "states",
                    limit,
                }));
            }
        }
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(FsmError::new(FsmErrorKind::DuplicateState(name)));
        }
        let id = StateId::new(checked_index::<StateIdBase>(self.states.len(), "states")?);
        trace!("Add state {}: {} (accepting: {})", id, name, accepting);
        self.names.insert(name.clone(), id);
        self.states.push(State::new(name, accepting));
        if self.initial_state.is_none() {
            self.initial_state = Some(id);
            self.current_state = Some(id);
        }
        Ok(id)
    }

    /// Append a transition and add its symbol to the alphabet.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        symbol: char,
    ) -> Result<TransitionId> {
        self.check_state(from)?;
        self.check_state(to)?;
        if let Some(limit) = self.limits.max_transitions {
            if self.transitions.len() >= limit {
                return Err(FsmError::new(FsmErrorKind::CapacityExceeded {
                    what: "transitions",
                    limit,
                }));
            }
        }
        let id = TransitionId::new(checked_index::<TransitionIdBase>(
            self.transitions.len(),
            "transitions",
        )?);
        trace!(
            "Add transition {}: {} --{}--> {}",
            id,
            self.states[from],
            symbol,
            self.states[to]
        );
        self.transitions.push(Transition::new(from, to, symbol));
        self.alphabet.insert(symbol);
        Ok(id)
    }

    /// Add symbols to the alphabet without adding transitions.
    pub fn seed_alphabet<I>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet.extend(symbols);
    }

    /// Set the initial state. The cursor is moved to the new initial state.
    pub fn set_initial_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.initial_state = Some(state);
        self.current_state = Some(state);
        Ok(())
    }

    /// Move the cursor back to the initial state.
    #[inline]
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
    }

    /// Find the first declared transition from `state` on `symbol`.
    pub fn find_transition(&self, state: StateId, symbol: char) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from == state && t.symbol == symbol)
    }

    /// Check if the symbol belongs to the alphabet.
    #[inline]
    pub fn contains_symbol(&self, symbol: char) -> bool {
        self.alphabet.contains(&symbol)
    }

    /// Get the state for a handle.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.as_usize())
    }

    /// Get the handle of the state with the given name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Get the states in insertion order.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Get the transitions in declaration order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Get the alphabet.
    #[inline]
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Get the limits the automaton was created with.
    #[inline]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Get the initial state.
    #[inline]
    pub fn initial_state(&self) -> Option<StateId> {
        self.initial_state
    }

    /// Get the state the cursor points to.
    #[inline]
    pub fn current_state(&self) -> Option<StateId> {
        self.current_state
    }

    /// Move the cursor. Only the executor moves the cursor during a run.
    #[inline]
    pub(crate) fn set_current_state(&mut self, state: StateId) {
        self.current_state = Some(state);
    }

    /// Check that no state has more than one transition on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.transitions.iter().all(|t| seen.insert((t.from, t.symbol)))
    }

    /// Get the outgoing transitions of a state in declaration order.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == state)
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if state.as_usize() < self.states.len() {
            Ok(())
        } else {
            Err(FsmError::new(FsmErrorKind::UnknownState(format!("#{}", state))))
        }
    }

    /// Render the automaton in graphviz dot format.
    #[cfg(feature = "dot_writer")]
    pub fn render_dot<W: std::io::Write>(&self, label: &str, output: &mut W) {
        crate::internal::dot::automaton_render(self, label, output);
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .states
            .iter()
            .map(State::name)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "States: {}", names)?;
        let accepting = self
            .states
            .iter()
            .filter(|s| s.accepting)
            .map(State::name)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Accept States: {}", accepting)?;
        match self.initial_state {
            Some(id) => writeln!(f, "Initial State: {}", self.states[id])?,
            None => writeln!(f, "Initial State: -")?,
        }
        let alphabet = self
            .alphabet
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Alphabet: {{{}}}", alphabet)?;
        writeln!(f, "Transitions:")?;
        for t in &self.transitions {
            writeln!(
                f,
                "  {} --{}--> {}",
                self.states[t.from], t.symbol, self.states[t.to]
            )?;
        }
        Ok(())
    }
}

// The serialized form of an automaton. It is validated on deserialization so that every
// transition refers to existing states and the state names are unique.
#[derive(Deserialize)]
struct AutomatonData {
    states: Vec<State>,
    transitions: Vec<Transition>,
    initial_state: Option<StateId>,
    #[serde(default)]
    alphabet: BTreeSet<char>,
    #[serde(default)]
    limits: Limits,
}

impl TryFrom<AutomatonData> for Automaton {
    type Error = FsmError;

    fn try_from(data: AutomatonData) -> Result<Self> {
        let mut automaton = Automaton::with_limits(data.limits);
        for state in data.states {
            automaton.add_state(state.name, state.accepting)?;
        }
        for t in data.transitions {
            automaton.add_transition(t.from, t.to, t.symbol)?;
        }
        automaton.seed_alphabet(data.alphabet);
        if let Some(initial_state) = data.initial_state {
            automaton.set_initial_state(initial_state)?;
        }
        Ok(automaton)
    }
}

// Ids are narrower than usize, so even an automaton without limits runs out of them. Items are
// added one at a time, hence the first length that has no index is the number of items that fit.
fn checked_index<T: TryFrom<usize>>(len: usize, what: &'static str) -> Result<T> {
    T::try_from(len)
        .map_err(|_| FsmError::new(FsmErrorKind::CapacityExceeded { what, limit: len }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_state_identity_is_the_name() {
        let a = State::new("q0", true);
        let b = State::new("q0", false);
        assert_eq!(a, b);
        let set: FxHashSet<State> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(State::new("q0", true), State::new("q1", true));
    }

    #[test]
    fn test_first_state_is_initial() {
        init();
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        assert_eq!(automaton.initial_state(), Some(q0));
        automaton.set_initial_state(q1).unwrap();
        assert_eq!(automaton.initial_state(), Some(q1));
        assert_eq!(automaton.current_state(), Some(q1));
    }

    #[test]
    fn test_duplicate_state_name() {
        let mut automaton = Automaton::new();
        automaton.add_state("q0", false).unwrap();
        let err = automaton.add_state("q0", true).unwrap_err();
        assert_eq!(
            *err.kind(),
            FsmErrorKind::DuplicateState("q0".to_string())
        );
        assert_eq!(automaton.states().len(), 1);
    }

    #[test]
    fn test_alphabet_is_inferred() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        automaton.add_transition(q0, q1, 'b').unwrap();
        automaton.add_transition(q1, q0, 'a').unwrap();
        automaton.add_transition(q1, q1, 'a').unwrap();
        assert_eq!(
            automaton.alphabet().iter().copied().collect::<Vec<_>>(),
            vec!['a', 'b']
        );
        assert!(automaton.contains_symbol('a'));
        assert!(!automaton.contains_symbol('c'));
    }

    #[test]
    fn test_find_transition_first_declared_wins() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", false).unwrap();
        let q2 = automaton.add_state("q2", true).unwrap();
        automaton.add_transition(q0, q1, 'a').unwrap();
        automaton.add_transition(q0, q2, 'a').unwrap();
        assert_eq!(automaton.find_transition(q0, 'a').unwrap().to(), q1);
        assert!(automaton.find_transition(q1, 'a').is_none());
        assert!(!automaton.is_deterministic());
    }

    #[test]
    fn test_unknown_state_handle() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let err = automaton
            .add_transition(q0, StateId::new(5), 'a')
            .unwrap_err();
        assert_eq!(*err.kind(), FsmErrorKind::UnknownState("#5".to_string()));
        assert!(automaton.transitions().is_empty());
        assert!(automaton.alphabet().is_empty());
    }

    #[test]
    fn test_capacity_exceeded_keeps_automaton_usable() {
        let mut automaton = Automaton::with_limits(Limits {
            max_states: Some(2),
            max_transitions: Some(1),
        });
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        let err = automaton.add_state("q2", false).unwrap_err();
        assert_eq!(
            *err.kind(),
            FsmErrorKind::CapacityExceeded {
                what: "states",
                limit: 2
            }
        );
        automaton.add_transition(q0, q1, 'a').unwrap();
        assert!(automaton.add_transition(q1, q0, 'b').is_err());
        assert!(!automaton.contains_symbol('b'));
        assert!(automaton.process_string("a").accepted());
    }

    #[test]
    fn test_id_space_is_checked() {
        assert_eq!(checked_index::<StateIdBase>(7, "states").unwrap(), 7);
        assert_eq!(checked_index::<u8>(255, "states").unwrap(), 255);
        let err = checked_index::<u8>(256, "states").unwrap_err();
        assert_eq!(
            *err.kind(),
            FsmErrorKind::CapacityExceeded {
                what: "states",
                limit: 256
            }
        );
        #[cfg(target_pointer_width = "64")]
        {
            let len = StateIdBase::MAX as usize + 1;
            let err = checked_index::<TransitionIdBase>(len, "transitions").unwrap_err();
            assert_eq!(
                *err.kind(),
                FsmErrorKind::CapacityExceeded {
                    what: "transitions",
                    limit: len
                }
            );
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        automaton.set_current_state(q1);
        automaton.reset();
        automaton.reset();
        assert_eq!(automaton.current_state(), Some(q0));
    }

    #[test]
    fn test_display() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        automaton.add_transition(q0, q1, 'a').unwrap();
        automaton.add_transition(q1, q0, 'b').unwrap();
        assert_eq!(
            automaton.to_string(),
            "States: q0, q1\n\
             Accept States: q1\n\
             Initial State: q0\n\
             Alphabet: {a, b}\n\
             Transitions:\n  \
             q0 --a--> q1\n  \
             q1 --b--> q0\n"
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state("q0", false).unwrap();
        let q1 = automaton.add_state("q1", true).unwrap();
        automaton.add_transition(q0, q1, 'a').unwrap();
        automaton.seed_alphabet(['z']);

        let serialized = serde_json::to_string(&automaton).unwrap();
        let deserialized: Automaton = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.states(), automaton.states());
        assert_eq!(deserialized.transitions(), automaton.transitions());
        assert_eq!(deserialized.alphabet(), automaton.alphabet());
        assert_eq!(deserialized.state_id("q1"), Some(q1));
        assert_eq!(deserialized.current_state(), Some(q0));
    }

    #[test]
    fn test_deserialization_rejects_dangling_transition() {
        let json = r#"{
            "states": [{"name": "q0", "accepting": false}],
            "transitions": [{"from": 0, "to": 3, "symbol": "a"}],
            "initial_state": 0
        }"#;
        assert!(serde_json::from_str::<Automaton>(json).is_err());
    }
}
