//! This module contains the conversion of an NFA into a DFA.
//! The DFA is generated from the NFA using the subset construction algorithm.
//! Only subsets that are reachable from the initial state are explored.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    nfa::{NfaDescription, StateSet},
    Automaton, FsmError, FsmErrorKind, Result, StateId,
};

/// The canonical name of a DFA state is the sorted, comma separated list of the names of the
/// NFA states it consists of.
///
/// A comma or a backslash inside a member name is escaped with a backslash. This keeps the
/// names of different subsets different, e.g. the subset {a, b} is named `a,b` while the
/// subset that only contains the state `a,b` is named `a\,b`.
pub(crate) fn canonical_name(subset: &StateSet) -> String {
    subset
        .iter()
        .map(|name| escape_member(name))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_member(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if c == ',' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert an NFA into an equivalent DFA.
///
/// The alphabet is given explicitly and is not inferred from the transitions of the NFA.
/// Every symbol of the alphabet belongs to the alphabet of the resulting automaton, even if no
/// DFA state has a transition on it. A subset without successors on a symbol gets no
/// transition for that symbol, there is no dead state.
///
/// ```rust
/// use fsmlab::{convert_to_dfa, NfaDescription};
///
/// let mut nfa = NfaDescription::new();
/// nfa.add_epsilon_transition("q0", "q1")
///     .add_transition("q0", 'a', "q0")
///     .add_transition("q1", 'b', "q2");
/// let mut dfa = convert_to_dfa(&nfa, "q0", &["q2"], &['a', 'b']).unwrap();
/// assert!(dfa.accepts("aab"));
/// assert!(!dfa.accepts("a"));
/// ```
pub fn convert_to_dfa<S: AsRef<str>>(
    nfa: &NfaDescription,
    initial: &str,
    accepting: &[S],
    alphabet: &[char],
) -> Result<Automaton> {
    if !nfa.contains_state(initial) {
        return Err(FsmError::new(FsmErrorKind::UnknownState(initial.to_string())));
    }
    let accepting: FxHashSet<&str> = accepting.iter().map(AsRef::as_ref).collect();
    let alphabet: BTreeSet<char> = alphabet.iter().copied().collect();

    let mut dfa = Automaton::new();
    dfa.seed_alphabet(alphabet.iter().copied());

    // Every subset that has been discovered, i.e. that is either already processed or still
    // waiting in the work list, mapped to its DFA state.
    let mut marked: FxHashMap<StateSet, StateId> = FxHashMap::default();
    let mut work_list: VecDeque<StateSet> = VecDeque::new();

    // The initial state of the DFA is the epsilon closure of the initial state of the NFA.
    let start = nfa.epsilon_closure([initial]);
    let initial_state = add_subset(&mut dfa, &mut marked, &start, &accepting)?;
    work_list.push_back(start);

    while let Some(subset) = work_list.pop_front() {
        let from = marked[&subset];
        trace!("Process subset {}: {{{}}}", from, canonical_name(&subset));
        for symbol in &alphabet {
            let move_set = nfa.move_set(&subset, *symbol);
            if move_set.is_empty() {
                continue;
            }
            let target = nfa.epsilon_closure(move_set);
            let to = match marked.get(&target) {
                Some(to) => *to,
                None => {
                    let to = add_subset(&mut dfa, &mut marked, &target, &accepting)?;
                    work_list.push_back(target);
                    to
                }
            };
            dfa.add_transition(from, to, *symbol)?;
        }
    }

    dfa.set_initial_state(initial_state)?;
    debug!(
        "Subset construction created {} states and {} transitions",
        dfa.states().len(),
        dfa.transitions().len()
    );
    Ok(dfa)
}

/// Add a DFA state for a newly discovered subset.
/// The state is accepting if the subset contains at least one accepting NFA state.
fn add_subset(
    dfa: &mut Automaton,
    marked: &mut FxHashMap<StateSet, StateId>,
    subset: &StateSet,
    accepting: &FxHashSet<&str>,
) -> Result<StateId> {
    let is_accepting = subset.iter().any(|s| accepting.contains(s.as_str()));
    let state_id = dfa.add_state(canonical_name(subset), is_accepting)?;
    trace!(
        "Add state {}: {{{}}} (accepting: {})",
        state_id,
        canonical_name(subset),
        is_accepting
    );
    marked.insert(subset.clone(), state_id);
    Ok(state_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // q0 -ε-> q1, q0 -a-> q0, q1 -b-> q2
    fn a_star_b() -> NfaDescription {
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("q0", "q1")
            .add_transition("q0", 'a', "q0")
            .add_transition("q1", 'b', "q2");
        nfa
    }

    #[test]
    fn test_canonical_names() {
        init();
        let dfa = convert_to_dfa(&a_star_b(), "q0", &["q2"], &['a', 'b']).unwrap();
        let names = dfa.states().iter().map(|s| s.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["q0,q1", "q2"]);
        assert_eq!(dfa.initial_state(), dfa.state_id("q0,q1"));
        assert!(!dfa.states()[0].is_accepting());
        assert!(dfa.states()[1].is_accepting());
        let transitions = dfa
            .transitions()
            .iter()
            .map(|t| {
                (
                    dfa.states()[t.from()].name(),
                    t.symbol(),
                    dfa.states()[t.to()].name(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            transitions,
            vec![("q0,q1", 'a', "q0,q1"), ("q0,q1", 'b', "q2")]
        );
    }

    #[test]
    fn test_conversion_scenario() {
        init();
        let mut dfa = convert_to_dfa(&a_star_b(), "q0", &["q2"], &['a', 'b']).unwrap();
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("aab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("abb"));
        assert!(!dfa.accepts(""));
        // The epsilon edge lets 'b' be read without any leading 'a'
        assert!(dfa.accepts("b"));
    }

    #[test]
    fn test_unreachable_states_are_not_explored() {
        let mut nfa = a_star_b();
        nfa.add_transition("island", 'a', "q2");
        let dfa = convert_to_dfa(&nfa, "q0", &["q2"], &['a', 'b']).unwrap();
        assert!(dfa.states().iter().all(|s| !s.name().contains("island")));
        assert_eq!(dfa.states().len(), 2);
    }

    #[test]
    fn test_no_dead_state() {
        let mut dfa = convert_to_dfa(&a_star_b(), "q0", &["q2"], &['a', 'b', 'c']).unwrap();
        let q2 = dfa.state_id("q2").unwrap();
        assert_eq!(dfa.transitions_from(q2).count(), 0);
        // 'c' is part of the alphabet, so the run stops with a missing transition
        let result = dfa.process_string("c");
        assert_eq!(
            result.rejection(),
            Some(crate::Rejection::NoTransitionDefined('c'))
        );
    }

    #[test]
    fn test_subsets_are_compared_by_value() {
        // Both 'a' and 'b' lead to the subset {p, q}, discovered through different members.
        let mut nfa = NfaDescription::new();
        nfa.add_transition("s", 'a', "p")
            .add_epsilon_transition("p", "q")
            .add_transition("s", 'b', "q")
            .add_epsilon_transition("q", "p");
        let dfa = convert_to_dfa(&nfa, "s", &["q"], &['a', 'b']).unwrap();
        assert_eq!(dfa.states().len(), 2);
        assert!(dfa.is_deterministic());
    }

    #[test]
    fn test_member_names_with_separators() {
        init();
        // The subset {a, b} and the subset {"a,b"} must not share a name
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("s", "t")
            .add_transition("s", 'x', "a")
            .add_epsilon_transition("a", "b")
            .add_transition("s", 'y', "a,b")
            .add_transition("t", 'z', "back\\slash");
        let mut dfa = convert_to_dfa(&nfa, "s", &["b"], &['x', 'y', 'z']).unwrap();
        let names = dfa.states().iter().map(|s| s.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["s,t", "a,b", "a\\,b", "back\\\\slash"]);
        assert!(dfa.accepts("x"));
        assert!(!dfa.accepts("y"));
        assert!(!dfa.accepts("z"));
    }

    #[test]
    fn test_canonical_name_is_injective() {
        let split = ["a", "b"].iter().map(|s| s.to_string()).collect::<StateSet>();
        let joined = ["a,b"].iter().map(|s| s.to_string()).collect::<StateSet>();
        let escaped = ["a\\", "b"].iter().map(|s| s.to_string()).collect::<StateSet>();
        let escaped_joined = ["a\\,b"].iter().map(|s| s.to_string()).collect::<StateSet>();
        let names = [&split, &joined, &escaped, &escaped_joined]
            .into_iter()
            .map(canonical_name)
            .collect::<BTreeSet<_>>();
        assert_eq!(names.len(), 4);
        assert_eq!(canonical_name(&split), "a,b");
        assert_eq!(canonical_name(&joined), "a\\,b");
    }

    #[test]
    fn test_unknown_initial_state() {
        let err = convert_to_dfa(&a_star_b(), "nope", &["q2"], &['a']).unwrap_err();
        assert_eq!(*err.kind(), FsmErrorKind::UnknownState("nope".to_string()));
    }

    #[test]
    fn test_accepting_initial_closure() {
        let mut nfa = NfaDescription::new();
        nfa.add_epsilon_transition("start", "end")
            .add_transition("end", 'x', "start");
        let mut dfa = convert_to_dfa(&nfa, "start", &["end"], &['x']).unwrap();
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("xxx"));
    }
}
