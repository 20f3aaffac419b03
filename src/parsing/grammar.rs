//! Built grammars: the top-level parse entry points

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use super::combinators::Parser;
use super::error::ParseError;
use super::lazy::Slot;
use super::stream::TokenStream;
use crate::lexing::TokenKind;

/// A complete grammar: every declared rule is defined and `top` is the entry rule.
///
/// The grammar owns its rules, so [`super::Lazy`] handles inside it stay valid for as long as
/// the grammar lives. Parsing never mutates the grammar and can run on several threads at once.
pub struct Grammar<K, P> {
    slots: Vec<Arc<dyn Slot>>,
    top: P,
    kind: PhantomData<fn() -> K>,
}

impl<K: TokenKind, P: Parser<K>> Grammar<K, P> {
    pub(crate) fn new(slots: Vec<Arc<dyn Slot>>, top: P) -> Self {
        Self {
            slots,
            top,
            kind: PhantomData,
        }
    }

    /// Parse a prefix of `stream` with the entry rule
    pub fn parse(&self, stream: &TokenStream<K>) -> Option<P::Output> {
        let mut cursor = stream.cursor();
        self.top.parse(&mut cursor)
    }

    /// Parse the whole of `stream`: the entry rule must stop right before END
    pub fn parse_all(&self, stream: &TokenStream<K>) -> Result<P::Output, ParseError<K>> {
        let mut cursor = stream.cursor();
        match self.top.parse(&mut cursor) {
            Some(value) if cursor.at_end() => Ok(value),
            _ => {
                let lexem = cursor.furthest_lexem().clone();
                debug!(
                    position = cursor.furthest(),
                    kind = ?lexem.kind,
                    "parse stopped before end of input"
                );
                Err(ParseError::new(lexem))
            }
        }
    }

    pub fn top(&self) -> &P {
        &self.top
    }

    /// Names of every forward-declared rule, in declaration order
    pub fn rule_names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.name()).collect()
    }
}

impl<K, P> fmt::Debug for Grammar<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field(
                "rules",
                &self.slots.iter().map(|slot| slot.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::{Lexem, Location};
    use crate::parsing::combinators::{end, ignore, token};
    use crate::parsing::lazy::{GrammarBuilder, Lazy};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Number,
        Plus,
        End,
    }

    impl TokenKind for Kind {
        const END: Self = Kind::End;
    }

    fn stream(source: &str) -> TokenStream<Kind> {
        let mut location = Location::start();
        let mut lexems = Vec::new();
        for ch in source.chars() {
            let kind = if ch == '+' { Kind::Plus } else { Kind::Number };
            let text = ch.to_string();
            lexems.push(Lexem::new(kind, text.as_str(), location.with_length(1)));
            location = location.advanced_over(&text);
        }
        TokenStream::new(lexems, location)
    }

    /// sum := NUMBER "+" sum | NUMBER
    fn sum_grammar() -> Grammar<Kind, Lazy<Kind, u32>> {
        let mut builder = GrammarBuilder::new();
        let sum = builder.lazy::<u32>("sum");
        let number = token(Kind::Number).try_map(|lexem| lexem.text.parse::<u32>().ok());
        let plus = number
            .clone()
            .skip(ignore(Kind::Plus))
            .and(sum.clone())
            .map(|(left, right)| left + right);
        builder.define(&sum, plus.or(number)).unwrap();
        builder.build(sum).unwrap()
    }

    #[test]
    fn test_parse_accepts_prefix() {
        let grammar = sum_grammar();
        assert_eq!(grammar.parse(&stream("1+2+")), Some(3));
    }

    #[test]
    fn test_parse_all() {
        let grammar = sum_grammar();
        assert_eq!(grammar.parse_all(&stream("1+2+3")), Ok(6));
    }

    #[test]
    fn test_parse_all_reports_furthest_lexem() {
        let grammar = sum_grammar();
        let error = grammar.parse_all(&stream("1+2++")).unwrap_err();
        assert_eq!(error.lexem.kind, Kind::Plus);
        assert_eq!(error.lexem.location.column, 5);
    }

    #[test]
    fn test_parse_all_reports_premature_end() {
        let grammar = sum_grammar();
        let error = grammar.parse_all(&stream("1+")).unwrap_err();
        assert!(error.at_end());
    }

    #[test]
    fn test_end_anchored_top_rule() {
        let builder: GrammarBuilder<Kind> = GrammarBuilder::new();
        let top = token(Kind::Number).many().skip(end());
        let grammar = builder.build(top).unwrap();
        assert!(grammar.parse(&stream("12")).is_some());
        assert!(grammar.parse(&stream("1+")).is_none());
        assert!(grammar.rule_names().is_empty());
    }

    #[test]
    fn test_rule_names_and_debug() {
        let grammar = sum_grammar();
        assert_eq!(grammar.rule_names(), vec!["sum"]);
        assert_eq!(format!("{:?}", grammar), "Grammar { rules: [\"sum\"] }");
    }

    #[test]
    fn test_grammar_is_shareable_between_threads() {
        let grammar = std::sync::Arc::new(sum_grammar());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let grammar = grammar.clone();
                std::thread::spawn(move || grammar.parse_all(&stream(&format!("{}+1", n))))
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Ok(n as u32 + 1));
        }
    }
}
