//! Error types for rule registration and scanning

use std::fmt;

use super::diagnostics::render_excerpt;
use super::location::Location;

/// A pattern that does not follow the supported syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    /// Character index inside the pattern where the problem was detected
    pub position: usize,
    pub message: String,
}

impl PatternError {
    pub fn new(pattern: &str, position: usize, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pattern {:?} at {}: {}",
            self.pattern, self.position, self.message
        )
    }
}

impl std::error::Error for PatternError {}

/// Errors raised while registering rules on a lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// A rule's pattern could not be compiled
    InvalidPattern { rule: String, error: PatternError },
    /// A rule tried to claim the END sentinel kind
    ReservedKind(String),
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::InvalidPattern { rule, error } => {
                write!(f, "rule {}: {}", rule, error)
            }
            LexerError::ReservedKind(rule) => {
                write!(f, "rule {} uses the reserved END kind", rule)
            }
        }
    }
}

impl std::error::Error for LexerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LexerError::InvalidPattern { error, .. } => Some(error),
            LexerError::ReservedKind(_) => None,
        }
    }
}

/// Fatal scanning error: no rule recognises the text at `location`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub file_name: String,
    pub location: Location,
    /// The offending span, from the start of the failed token to the rejected character
    pub text: String,
}

impl LexError {
    /// Render the error with a source excerpt underlining the offending span
    pub fn render(&self, source: &str) -> String {
        format!(
            "error: couldn't recognise token:\n{}",
            render_excerpt(source, &self.file_name, self.location)
        )
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = if self.file_name.is_empty() {
            "[define-inline]"
        } else {
            &self.file_name
        };
        write!(
            f,
            "couldn't recognise token {:?} at {}:{}",
            self.text, file, self.location
        )
    }
}

impl std::error::Error for LexError {}
