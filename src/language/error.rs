//! Errors of the language front-end

use std::fmt;

use super::tokens::Lexeme;
use crate::lexing::{LexError, LexerError};
use crate::parsing::{GrammarError, ParseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The built-in rule table failed to compile
    Rules(LexerError),
    /// The built-in grammar is incomplete
    Grammar(GrammarError),
    Lex(LexError),
    Parse(ParseError<Lexeme>),
}

impl LanguageError {
    /// Render the error for humans, with a source excerpt where the error has a location
    pub fn render(&self, source: &str, file_name: &str) -> String {
        match self {
            LanguageError::Lex(error) => error.render(source),
            LanguageError::Parse(error) => error.render(source, file_name),
            other => format!("error: {}\n", other),
        }
    }
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::Rules(error) => write!(f, "invalid lexer rules: {}", error),
            LanguageError::Grammar(error) => write!(f, "invalid grammar: {}", error),
            LanguageError::Lex(error) => write!(f, "{}", error),
            LanguageError::Parse(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for LanguageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LanguageError::Rules(error) => Some(error),
            LanguageError::Grammar(error) => Some(error),
            LanguageError::Lex(error) => Some(error),
            LanguageError::Parse(error) => Some(error),
        }
    }
}

impl From<LexerError> for LanguageError {
    fn from(error: LexerError) -> Self {
        LanguageError::Rules(error)
    }
}

impl From<GrammarError> for LanguageError {
    fn from(error: GrammarError) -> Self {
        LanguageError::Grammar(error)
    }
}

impl From<LexError> for LanguageError {
    fn from(error: LexError) -> Self {
        LanguageError::Lex(error)
    }
}

impl From<ParseError<Lexeme>> for LanguageError {
    fn from(error: ParseError<Lexeme>) -> Self {
        LanguageError::Parse(error)
    }
}
