//! The `dot` module contains the conversion from automata to the graphviz dot format.

use std::io::Write;

use dot_writer::{Attributes, DotWriter, RankDirection};

use crate::{Automaton, NfaDescription};

/// Render the automaton to a graphviz dot format.
/// The initial state is drawn blue, accepting states are drawn red.
pub(crate) fn automaton_render<W: Write>(automaton: &Automaton, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    // The nodes are created in state order, so node_<n> is the node of state n.
    for (index, state) in automaton.states().iter().enumerate() {
        let mut node = digraph.node_auto();
        node.set_label(state.name());
        if automaton.initial_state().map(|s| s.as_usize()) == Some(index) {
            node.set_shape(dot_writer::Shape::Circle)
                .set_color(dot_writer::Color::Blue)
                .set_pen_width(3.0);
        }
        if state.is_accepting() {
            node.set_shape(dot_writer::Shape::Circle)
                .set_color(dot_writer::Color::Red)
                .set_pen_width(3.0);
        }
    }
    for transition in automaton.transitions() {
        digraph
            .edge(
                &format!("node_{}", transition.from().as_usize()),
                &format!("node_{}", transition.to().as_usize()),
            )
            .attributes()
            .set_label(&transition.symbol().to_string());
    }
}

/// Render the NFA to a graphviz dot format.
pub(crate) fn nfa_render<W: Write, S: AsRef<str>>(
    nfa: &NfaDescription,
    label: &str,
    initial: &str,
    accepting: &[S],
    output: &mut W,
) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    let names = nfa.states().keys().collect::<Vec<_>>();
    let node_of = |name: &str| {
        names
            .iter()
            .position(|n| n.as_str() == name)
            .map(|i| format!("node_{}", i))
    };
    for name in &names {
        let mut node = digraph.node_auto();
        node.set_label(name.as_str());
        if name.as_str() == initial {
            node.set_shape(dot_writer::Shape::Circle)
                .set_color(dot_writer::Color::Blue)
                .set_pen_width(3.0);
        }
        if accepting.iter().any(|a| a.as_ref() == name.as_str()) {
            node.set_shape(dot_writer::Shape::Circle)
                .set_color(dot_writer::Color::Red)
                .set_pen_width(3.0);
        }
    }
    for (name, state) in nfa.states() {
        let Some(source) = node_of(name) else {
            continue;
        };
        for (symbol, targets) in state.transitions() {
            for target in targets.iter().filter_map(|t| node_of(t)) {
                digraph
                    .edge(&source, &target)
                    .attributes()
                    .set_label(&symbol.to_string());
            }
        }
        for target in state.epsilon_transitions().iter().filter_map(|t| node_of(t)) {
            digraph.edge(&source, &target).attributes().set_label("ε");
        }
    }
}
