//! Module with the regex type.
//!
//! A [Regex] is parsed once and can be matched against many inputs. Matches are anchored at
//! both ends, i.e. the whole input must be matched.

use log::debug;

use crate::{
    internal::{matches_exactly, matches_suffix, parse_regex_syntax},
    RegexAst, Result,
};

/// A parsed regular expression.
///
/// ```rust
/// use fsmlab::Regex;
///
/// let regex = Regex::new("(a|b)*c").expect("Regex error");
/// assert!(regex.is_match("aaac"));
/// assert!(regex.is_match("bbbbc"));
/// assert!(!regex.is_match("aaab"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Regex {
    pattern: String,
    ast: RegexAst,
}

impl Regex {
    /// Parse the pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let ast = parse_regex_syntax(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            ast,
        })
    }

    /// Get the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the AST of the pattern.
    #[inline]
    pub fn ast(&self) -> &RegexAst {
        &self.ast
    }

    /// Check if the whole input matches the pattern.
    pub fn is_match(&self, input: &str) -> bool {
        let input = input.chars().collect::<Vec<_>>();
        let matched = matches_exactly(&self.ast, &input);
        debug!(
            "'{}' {} '{}'",
            self.pattern.escape_default(),
            if matched { "matches" } else { "does not match" },
            input.iter().collect::<String>().escape_default()
        );
        matched
    }

    /// Check for every non-empty prefix of the input if it ends with a match of the pattern.
    /// The match may start anywhere in the prefix.
    ///
    /// This is meant for a step by step display of the input and is not used by
    /// [Regex::is_match].
    pub fn match_prefixes(&self, input: &str) -> Vec<PrefixMatch> {
        let input = input.chars().collect::<Vec<_>>();
        (1..=input.len())
            .map(|len| PrefixMatch {
                prefix: input[..len].iter().collect(),
                matched: matches_suffix(&self.ast, &input[..len]),
            })
            .collect()
    }
}

impl From<RegexAst> for Regex {
    fn from(ast: RegexAst) -> Self {
        Self {
            pattern: ast.to_string(),
            ast,
        }
    }
}

impl std::str::FromStr for Regex {
    type Err = crate::FsmError;

    fn from_str(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
    }
}

impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// The result for one prefix of [Regex::match_prefixes].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    /// The prefix of the input.
    pub prefix: String,
    /// True if the prefix ends with a match of the pattern.
    pub matched: bool,
}

impl std::fmt::Display for PrefixMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}': {}",
            self.prefix,
            if self.matched { "match" } else { "no match" }
        )
    }
}

/// Parse the pattern and check if the whole input matches it.
///
/// Use [Regex] to match the same pattern against many inputs.
pub fn is_match(pattern: &str, input: &str) -> Result<bool> {
    Ok(Regex::new(pattern)?.is_match(input))
}
