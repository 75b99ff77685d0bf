//! This module contains the NFA description that is the source of the subset construction.
//! States are identified by name. Each state has a set of epsilon targets and maps symbols to
//! sets of target states.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Automaton, Result};

/// A set of NFA state names. The order of a `BTreeSet` makes it usable as a canonical key.
pub type StateSet = BTreeSet<String>;

/// The transitions of a single NFA state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaState {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    epsilon_transitions: StateSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    transitions: BTreeMap<char, StateSet>,
}

impl NfaState {
    /// The targets of the epsilon transitions.
    pub fn epsilon_transitions(&self) -> &StateSet {
        &self.epsilon_transitions
    }

    /// The symbol transitions.
    pub fn transitions(&self) -> &BTreeMap<char, StateSet> {
        &self.transitions
    }

    /// The targets for the given symbol.
    pub fn targets(&self, symbol: char) -> Option<&StateSet> {
        self.transitions.get(&symbol)
    }
}

/// A nondeterministic finite automaton with epsilon transitions.
///
/// Targets that are not declared as states are treated as states without transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NfaDescription {
    states: BTreeMap<String, NfaState>,
}

impl NfaDescription {
    /// Create an empty NFA description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Declaring a state twice has no effect.
    pub fn add_state<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.states.entry(name.into()).or_default();
        self
    }

    /// Add an epsilon transition. Both states are declared if necessary.
    pub fn add_epsilon_transition<S: Into<String>, T: Into<String>>(
        &mut self,
        from: S,
        to: T,
    ) -> &mut Self {
        let to = to.into();
        self.add_state(to.clone());
        self.states
            .entry(from.into())
            .or_default()
            .epsilon_transitions
            .insert(to);
        self
    }

    /// Add a transition on a symbol. Both states are declared if necessary.
    pub fn add_transition<S: Into<String>, T: Into<String>>(
        &mut self,
        from: S,
        symbol: char,
        to: T,
    ) -> &mut Self {
        let to = to.into();
        self.add_state(to.clone());
        self.states
            .entry(from.into())
            .or_default()
            .transitions
            .entry(symbol)
            .or_default()
            .insert(to);
        self
    }

    /// Check if a state with the given name is declared.
    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Get a state by name.
    pub fn state(&self, name: &str) -> Option<&NfaState> {
        self.states.get(name)
    }

    /// Get all states ordered by name.
    pub fn states(&self) -> &BTreeMap<String, NfaState> {
        &self.states
    }

    /// All symbols used in any transition.
    pub fn symbols(&self) -> BTreeSet<char> {
        self.states
            .values()
            .flat_map(|s| s.transitions.keys().copied())
            .collect()
    }

    /// Calculate the epsilon closure of a set of states.
    /// The given states are always part of the closure.
    pub fn epsilon_closure<I, S>(&self, states: I) -> StateSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut closure: StateSet = StateSet::new();
        let mut work_list: Vec<String> = Vec::new();
        for state in states {
            let state = state.into();
            if closure.insert(state.clone()) {
                work_list.push(state);
            }
        }
        while let Some(state) = work_list.pop() {
            if let Some(nfa_state) = self.states.get(&state) {
                for target in &nfa_state.epsilon_transitions {
                    if closure.insert(target.clone()) {
                        work_list.push(target.clone());
                    }
                }
            }
        }
        closure
    }

    /// Calculate move(T, a) for a set of states T and a symbol a.
    /// This is the set of states that can be reached from T by consuming a, without the
    /// epsilon closure.
    pub fn move_set(&self, states: &StateSet, symbol: char) -> StateSet {
        states
            .iter()
            .filter_map(|s| self.states.get(s))
            .filter_map(|s| s.transitions.get(&symbol))
            .flatten()
            .cloned()
            .collect()
    }

    /// Simulate the NFA directly on the input.
    pub fn accepts<S: AsRef<str>>(&self, initial: &str, accepting: &[S], input: &str) -> bool {
        let mut current = self.epsilon_closure([initial]);
        for symbol in input.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(self.move_set(&current, symbol));
        }
        accepting.iter().any(|a| current.contains(a.as_ref()))
    }

    /// Convert the NFA to an equivalent DFA, see [crate::convert_to_dfa].
    pub fn to_dfa<S: AsRef<str>>(
        &self,
        initial: &str,
        accepting: &[S],
        alphabet: &[char],
    ) -> Result<Automaton> {
        crate::convert_to_dfa(self, initial, accepting, alphabet)
    }

    /// Render the NFA in graphviz dot format.
    #[cfg(feature = "dot_writer")]
    pub fn render_dot<W: std::io::Write, S: AsRef<str>>(
        &self,
        label: &str,
        initial: &str,
        accepting: &[S],
        output: &mut W,
    ) {
        crate::internal::dot::nfa_render(self, label, initial, accepting, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> StateSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    // q0 -ε-> q1 -ε-> q2, q2 -ε-> q0, q3 -ε-> q0
    fn epsilon_cycle() -> NfaDescription {
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("q0", "q1")
            .add_epsilon_transition("q1", "q2")
            .add_epsilon_transition("q2", "q0")
            .add_epsilon_transition("q3", "q0")
            .add_transition("q2", 'a', "q3");
        nfa
    }

    #[test]
    fn test_epsilon_closure_terminates_on_cycles() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.epsilon_closure(["q0"]), set(&["q0", "q1", "q2"]));
        assert_eq!(nfa.epsilon_closure(["q3"]), set(&["q0", "q1", "q2", "q3"]));
    }

    #[test]
    fn test_epsilon_closure_contains_start_set() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.epsilon_closure(["unknown"]), set(&["unknown"]));
        assert_eq!(nfa.epsilon_closure(Vec::<String>::new()), StateSet::new());
    }

    #[test]
    fn test_move_set() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.move_set(&set(&["q0", "q2"]), 'a'), set(&["q3"]));
        assert_eq!(nfa.move_set(&set(&["q0", "q1"]), 'a'), StateSet::new());
    }

    #[test]
    fn test_targets_are_declared() {
        let mut nfa = NfaDescription::new();
        nfa.add_transition("q0", 'a', "q1");
        assert!(nfa.contains_state("q1"));
        assert_eq!(nfa.symbols(), ['a'].into_iter().collect());
    }

    #[test]
    fn test_direct_simulation() {
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("q0", "q1")
            .add_transition("q0", 'a', "q0")
            .add_transition("q1", 'b', "q2");
        assert!(nfa.accepts("q0", &["q2"], "ab"));
        assert!(nfa.accepts("q0", &["q2"], "aaab"));
        assert!(nfa.accepts("q0", &["q2"], "b"));
        assert!(!nfa.accepts("q0", &["q2"], "a"));
        assert!(!nfa.accepts("q0", &["q2"], "abb"));
        assert!(!nfa.accepts("q0", &["q2"], ""));
    }

    #[test]
    fn test_serialization() {
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("q0", "q1")
            .add_transition("q1", 'b', "q2");
        let json = serde_json::to_string(&nfa).unwrap();
        assert_eq!(
            json,
            r#"{"q0":{"epsilon_transitions":["q1"]},"q1":{"transitions":{"b":["q2"]}},"q2":{}}"#
        );
        let back: NfaDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nfa);
    }
}
