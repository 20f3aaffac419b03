//! Grammar construction and top-level parse errors

use std::fmt;

use crate::lexing::{render_excerpt, Lexem, TokenKind};

/// A grammar that cannot be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A lazy rule was never given a definition
    Undefined(String),
    /// A lazy rule was given a second definition
    AlreadyDefined(String),
    /// The lazy handle belongs to a builder that no longer exists
    Detached,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Undefined(name) => write!(f, "rule `{}` is never defined", name),
            GrammarError::AlreadyDefined(name) => {
                write!(f, "rule `{}` is defined more than once", name)
            }
            GrammarError::Detached => write!(f, "rule handle outlived its grammar builder"),
        }
    }
}

impl std::error::Error for GrammarError {}

/// The input does not match the grammar.
///
/// Reported at the furthest lexem any alternative reached, which is usually the first token the
/// grammar could not account for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<K> {
    pub lexem: Lexem<K>,
}

impl<K: TokenKind> ParseError<K> {
    pub fn new(lexem: Lexem<K>) -> Self {
        Self { lexem }
    }

    pub fn at_end(&self) -> bool {
        self.lexem.kind == K::END
    }

    /// Render the error with a source excerpt pointing at the offending lexem
    pub fn render(&self, source: &str, file_name: &str) -> String {
        format!(
            "error: {}:\n{}",
            self.headline(),
            render_excerpt(source, file_name, self.lexem.location)
        )
    }

    fn headline(&self) -> String {
        if self.at_end() {
            "unexpected end of input".to_string()
        } else {
            format!("unexpected {:?} {:?}", self.lexem.kind, self.lexem.text)
        }
    }
}

impl<K: TokenKind> fmt::Display for ParseError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.headline(), self.lexem.location)
    }
}

impl<K: TokenKind> std::error::Error for ParseError<K> {}
