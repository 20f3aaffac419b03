//! Source locations and lexems

use serde::Serialize;
use std::fmt;

/// A continuous span of source text.
///
/// `offset` is a byte offset, `line` and `column` are 1-based and `length` is counted in
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Location {
    pub fn new(offset: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            offset,
            line,
            column,
            length,
        }
    }

    /// Location of the very first character of a source
    pub fn start() -> Self {
        Self::new(0, 1, 1, 0)
    }

    pub fn with_length(self, length: usize) -> Self {
        Self { length, ..self }
    }

    /// Location right after `text`, assuming `text` starts at `self`
    pub fn advanced_over(self, text: &str) -> Self {
        let mut next = Self {
            offset: self.offset + text.len(),
            length: 0,
            ..self
        };
        for ch in text.chars() {
            if ch == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single token: its kind, the matched text and where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexem<K> {
    pub kind: K,
    pub text: String,
    pub location: Location,
}

impl<K> Lexem<K> {
    pub fn new(kind: K, text: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}
