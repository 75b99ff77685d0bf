//! Recursive descent parser for the regex syntax.
//!
//! ```text
//! Alternation   := Concatenation ('|' Concatenation)*
//! Concatenation := Primary*
//! Primary       := ('(' Alternation ')' | Literal) PostfixOp?
//! PostfixOp     := '*' | '+' | '?'
//! ```
//!
//! Every character that is not an operator is a literal. There are no escapes.

use log::trace;

use crate::{RegexAst, RegexError};

/// Parse a pattern into a [RegexAst].
pub(crate) fn parse_regex_syntax(pattern: &str) -> Result<RegexAst, RegexError> {
    let ast = Parser::new(pattern).parse()?;
    trace!("Parsed '{}': {:?}", pattern.escape_default(), ast);
    Ok(ast)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse(mut self) -> Result<RegexAst, RegexError> {
        let ast = self.alternation()?;
        // The alternation only stops at the end of the pattern or at a closing parenthesis.
        match self.peek() {
            None => Ok(ast),
            Some(_) => Err(RegexError::UnmatchedCloseParen(self.pos)),
        }
    }

    fn alternation(&mut self) -> Result<RegexAst, RegexError> {
        let mut branches = vec![self.concatenation()?];
        while self.peek() == Some('|') {
            self.pos += 1;
            branches.push(self.concatenation()?);
        }
        Ok(if branches.len() == 1 {
            branches.remove(0)
        } else {
            RegexAst::Alternation(branches)
        })
    }

    fn concatenation(&mut self) -> Result<RegexAst, RegexError> {
        let mut items = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '|' | ')' => break,
                _ => items.push(self.primary()?),
            }
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            RegexAst::Concatenation(items)
        })
    }

    fn primary(&mut self) -> Result<RegexAst, RegexError> {
        let start = self.pos;
        let atom = match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.alternation()?;
                if self.peek() != Some(')') {
                    return Err(RegexError::UnclosedGroup(start));
                }
                self.pos += 1;
                inner
            }
            Some(c) if !RegexAst::is_operator(c) => {
                self.pos += 1;
                RegexAst::Literal(c)
            }
            // A postfix operator without an operand
            Some(c) => return Err(RegexError::MissingOperand(self.pos, c)),
            None => return Ok(RegexAst::empty()),
        };
        let ast = match self.peek() {
            Some('*') => RegexAst::star(atom),
            Some('+') => RegexAst::plus(atom),
            Some('?') => RegexAst::optional(atom),
            _ => return Ok(atom),
        };
        self.pos += 1;
        Ok(ast)
    }
}
