//! Token streams and the backtracking cursor

use crate::lexing::{Lexem, Location, TokenKind};

/// Lexems of one source, always terminated by exactly one END lexem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream<K> {
    lexems: Vec<Lexem<K>>,
}

impl<K: TokenKind> TokenStream<K> {
    /// Wrap `lexems` and append the END sentinel at `end`
    pub fn new(lexems: Vec<Lexem<K>>, end: Location) -> Self {
        let mut lexems: Vec<Lexem<K>> = lexems
            .into_iter()
            .filter(|lexem| lexem.kind != K::END)
            .collect();
        lexems.push(Lexem::new(K::END, "", end.with_length(0)));
        Self { lexems }
    }

    /// All lexems including the trailing END
    pub fn lexems(&self) -> &[Lexem<K>] {
        &self.lexems
    }

    /// Number of lexems, END included
    pub fn len(&self) -> usize {
        self.lexems.len()
    }

    /// True when the stream holds nothing but END
    pub fn is_empty(&self) -> bool {
        self.lexems.len() == 1
    }

    pub fn end_location(&self) -> Location {
        self.lexems[self.lexems.len() - 1].location
    }

    pub fn cursor(&self) -> Cursor<'_, K> {
        Cursor {
            lexems: &self.lexems,
            position: 0,
            furthest: 0,
        }
    }
}

/// Read position inside a [`TokenStream`].
///
/// Parsers save [`Cursor::position`] before an attempt and [`Cursor::restore`] it on failure.
/// The cursor also remembers the furthest position it ever reached, which is where a failed
/// parse is reported.
#[derive(Debug, Clone)]
pub struct Cursor<'a, K> {
    lexems: &'a [Lexem<K>],
    position: usize,
    furthest: usize,
}

impl<'a, K: TokenKind> Cursor<'a, K> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn restore(&mut self, position: usize) {
        self.position = position.min(self.lexems.len() - 1);
    }

    /// Lexem under the cursor. Past the last token this is the END lexem.
    pub fn peek(&self) -> &'a Lexem<K> {
        &self.lexems[self.position]
    }

    /// Move past the current lexem. END is never consumed.
    pub fn advance(&mut self) {
        if !self.at_end() {
            self.position += 1;
            self.furthest = self.furthest.max(self.position);
        }
    }

    pub fn at_end(&self) -> bool {
        self.peek().kind == K::END
    }

    pub fn furthest(&self) -> usize {
        self.furthest
    }

    /// The furthest lexem any parser has looked at
    pub fn furthest_lexem(&self) -> &'a Lexem<K> {
        &self.lexems[self.furthest]
    }
}
