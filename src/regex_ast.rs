/// The abstract syntax tree of a regular expression.
///
/// A group does not have its own node. `(ab)*` is a [RegexAst::KleeneStar] of a
/// [RegexAst::Concatenation]. Concatenations and alternations with a single element are
/// collapsed to that element by the parser, so `a` is a [RegexAst::Literal] and not a
/// concatenation of one literal. An empty concatenation denotes the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegexAst {
    /// A single symbol.
    Literal(char),
    /// A sequence of expressions.
    Concatenation(Vec<RegexAst>),
    /// A choice between expressions, tried from left to right.
    Alternation(Vec<RegexAst>),
    /// Zero or more repetitions.
    KleeneStar(Box<RegexAst>),
    /// One or more repetitions.
    Plus(Box<RegexAst>),
    /// Zero or one occurrence.
    Optional(Box<RegexAst>),
}

impl RegexAst {
    /// Create a literal node.
    pub fn literal(c: char) -> Self {
        RegexAst::Literal(c)
    }

    /// Create a star node.
    pub fn star(node: RegexAst) -> Self {
        RegexAst::KleeneStar(Box::new(node))
    }

    /// Create a plus node.
    pub fn plus(node: RegexAst) -> Self {
        RegexAst::Plus(Box::new(node))
    }

    /// Create an optional node.
    pub fn optional(node: RegexAst) -> Self {
        RegexAst::Optional(Box::new(node))
    }

    /// The empty expression that matches only the empty string.
    pub fn empty() -> Self {
        RegexAst::Concatenation(Vec::new())
    }

    /// Check if the character has a special meaning in a pattern.
    #[inline]
    pub fn is_operator(c: char) -> bool {
        matches!(c, '(' | ')' | '|' | '*' | '+' | '?')
    }

    // Writes the node as an operand of a postfix operator or as an element of a
    // concatenation. Everything that is not a single literal needs parentheses.
    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegexAst::Literal(c) => write!(f, "{}", c),
            _ => write!(f, "({})", self),
        }
    }
}

impl std::fmt::Display for RegexAst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegexAst::Literal(c) => write!(f, "{}", c),
            RegexAst::Concatenation(items) => {
                for item in items {
                    match item {
                        RegexAst::Alternation(_) | RegexAst::Concatenation(_) => {
                            item.fmt_operand(f)?
                        }
                        _ => write!(f, "{}", item)?,
                    }
                }
                Ok(())
            }
            RegexAst::Alternation(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    match branch {
                        RegexAst::Alternation(_) => branch.fmt_operand(f)?,
                        _ => write!(f, "{}", branch)?,
                    }
                }
                Ok(())
            }
            RegexAst::KleeneStar(node) => {
                node.fmt_operand(f)?;
                write!(f, "*")
            }
            RegexAst::Plus(node) => {
                node.fmt_operand(f)?;
                write!(f, "+")
            }
            RegexAst::Optional(node) => {
                node.fmt_operand(f)?;
                write!(f, "?")
            }
        }
    }
}
