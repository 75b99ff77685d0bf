//! Matcher for the [RegexAst].
//!
//! A node is not matched from a single position. Instead it maps a set of start positions to
//! the set of all positions where a match of the node can end. Because every alternative is
//! kept in the set, a failure late in a concatenation never loses a choice made earlier, so
//! the result is the same as that of a full backtracking search.
//! Repetitions are iterated until no new end positions appear, hence the recursion depth only
//! depends on the nesting of the pattern and not on the length of the input.

use std::collections::BTreeSet;

use crate::RegexAst;

/// A set of positions in the input.
type Positions = BTreeSet<usize>;

/// Match the whole input against the AST.
pub(crate) fn matches_exactly(ast: &RegexAst, input: &[char]) -> bool {
    ends(ast, input, &Positions::from([0])).contains(&input.len())
}

/// Check if a match of the AST ends exactly at the end of the input, starting anywhere.
pub(crate) fn matches_suffix(ast: &RegexAst, input: &[char]) -> bool {
    let starts = (0..=input.len()).collect::<Positions>();
    ends(ast, input, &starts).contains(&input.len())
}

fn ends(ast: &RegexAst, input: &[char], starts: &Positions) -> Positions {
    match ast {
        RegexAst::Literal(c) => starts
            .iter()
            .filter(|pos| input.get(**pos) == Some(c))
            .map(|pos| pos + 1)
            .collect(),
        RegexAst::Concatenation(items) => {
            let mut current = starts.clone();
            for item in items {
                if current.is_empty() {
                    break;
                }
                current = ends(item, input, &current);
            }
            current
        }
        RegexAst::Alternation(branches) => branches
            .iter()
            .flat_map(|branch| ends(branch, input, starts))
            .collect(),
        RegexAst::KleeneStar(node) => star_ends(node, input, starts),
        RegexAst::Plus(node) => star_ends(node, input, &ends(node, input, starts)),
        RegexAst::Optional(node) => {
            let mut result = ends(node, input, starts);
            result.extend(starts.iter().copied());
            result
        }
    }
}

// Zero repetitions end at the starts. Each round only continues from the positions that the
// previous round newly reached, so the loop stops once a round adds nothing.
fn star_ends(node: &RegexAst, input: &[char], starts: &Positions) -> Positions {
    let mut result = starts.clone();
    let mut frontier = starts.clone();
    while !frontier.is_empty() {
        frontier = ends(node, input, &frontier)
            .into_iter()
            .filter(|pos| !result.contains(pos))
            .collect();
        result.extend(frontier.iter().copied());
    }
    result
}
