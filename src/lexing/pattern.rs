//! Pattern front-end
//!
//! Patterns are tokenized with logos (every token is exactly one character, so token indices
//! double as character positions) and parsed with chumsky into a small tree that the NFA
//! builder walks.
//!
//! Grammar:
//!
//! ```text
//! pattern := unit*
//! unit    := char | '-' | '[' item+ ']' | '(' unit* ')'
//! item    := member ('-' member)?
//! member  := any token except ']'
//! ```

use chumsky::prelude::*;
use logos::Logos;
use std::fmt;

use super::error::PatternError;

/// Tokens of the pattern syntax
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("-")]
    Dash,
    #[regex(r"[^\[\]()\-]", |lex| lex.slice().chars().next())]
    Char(char),
}

impl PatternToken {
    /// The character this token was produced from
    pub fn as_char(self) -> char {
        match self {
            PatternToken::OpenBracket => '[',
            PatternToken::CloseBracket => ']',
            PatternToken::OpenParen => '(',
            PatternToken::CloseParen => ')',
            PatternToken::Dash => '-',
            PatternToken::Char(ch) => ch,
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_char())
    }
}

/// One member of a bracketed class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    Single(char),
    /// Inclusive range
    Range(char, char),
}

impl ClassItem {
    pub fn chars(self) -> impl Iterator<Item = char> {
        let (start, end) = match self {
            ClassItem::Single(ch) => (ch, ch),
            ClassItem::Range(start, end) => (start, end),
        };
        start..=end
    }
}

/// Parsed pattern unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    Literal(char),
    Class(Vec<ClassItem>),
    /// Zero or more repetitions of the enclosed units
    Repeat(Vec<PatternNode>),
}

type PatternParseError = Simple<PatternToken>;

fn pattern_parser() -> impl Parser<PatternToken, Vec<PatternNode>, Error = PatternParseError> {
    let literal = filter_map(|span, token: PatternToken| match token {
        PatternToken::Char(ch) => Ok(PatternNode::Literal(ch)),
        PatternToken::Dash => Ok(PatternNode::Literal('-')),
        other => Err(PatternParseError::expected_input_found(
            span,
            Vec::new(),
            Some(other),
        )),
    });

    let member = filter_map(|span, token: PatternToken| match token {
        PatternToken::CloseBracket => {
            Err(PatternParseError::custom(span, "expected a class member"))
        }
        other => Ok(other.as_char()),
    });

    let item = member
        .then(just(PatternToken::Dash).ignore_then(member.clone()).or_not())
        .try_map(|(start, end), span| match end {
            None => Ok(ClassItem::Single(start)),
            Some(end) if start <= end => Ok(ClassItem::Range(start, end)),
            Some(end) => Err(PatternParseError::custom(
                span,
                format!("inverted range {}-{}", start, end),
            )),
        });

    let class = item
        .repeated()
        .at_least(1)
        .delimited_by(
            just(PatternToken::OpenBracket),
            just(PatternToken::CloseBracket),
        )
        .map(PatternNode::Class);

    recursive(move |units| {
        let group = units
            .delimited_by(just(PatternToken::OpenParen), just(PatternToken::CloseParen))
            .map(PatternNode::Repeat);

        literal.or(class).or(group).repeated()
    })
    .then_ignore(end())
}

/// A pattern made only of groups matches the empty string
fn is_nullable(nodes: &[PatternNode]) -> bool {
    nodes
        .iter()
        .all(|node| matches!(node, PatternNode::Repeat(_)))
}

/// Parse `pattern` into its unit sequence
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternNode>, PatternError> {
    let mut tokens = Vec::new();
    for (index, result) in PatternToken::lexer(pattern).enumerate() {
        match result {
            Ok(token) => tokens.push(token),
            Err(_) => return Err(PatternError::new(pattern, index, "unexpected character")),
        }
    }

    let nodes = pattern_parser().parse(tokens).map_err(|errors| {
        let first = errors.into_iter().next();
        match first {
            Some(error) => PatternError::new(pattern, error.span().start, error.to_string()),
            None => PatternError::new(pattern, 0, "malformed pattern"),
        }
    })?;

    if is_nullable(&nodes) {
        return Err(PatternError::new(
            pattern,
            0,
            "pattern can only match the empty string",
        ));
    }

    Ok(nodes)
}
