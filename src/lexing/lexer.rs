//! The lexer: rule registration and maximal-munch scanning

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::debug;

use super::dfa::{Accept, Dfa};
use super::error::{LexError, LexerError};
use super::location::{Lexem, Location};
use super::nfa::Nfa;
use super::TokenKind;
use crate::parsing::TokenStream;

/// A lexer built from an ordered list of rules.
///
/// Rules must be registered before the first call to [`Lexer::analyse`]; the automaton is
/// compiled on first use (or by [`Lexer::compile`]) and cached afterwards. A compiled lexer is
/// read-only and can be shared between threads.
#[derive(Debug)]
pub struct Lexer<K: TokenKind> {
    nfa: Nfa<Accept<K>>,
    rule_order: Vec<Accept<K>>,
    names: HashMap<K, String>,
    compiled: OnceCell<Dfa<K>>,
}

impl<K: TokenKind> Default for Lexer<K> {
    fn default() -> Self {
        let mut names = HashMap::new();
        names.insert(K::END, "END".to_string());
        Self {
            nfa: Nfa::new(),
            rule_order: Vec::new(),
            names,
            compiled: OnceCell::new(),
        }
    }
}

impl<K: TokenKind> Lexer<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern whose matches are dropped instead of emitted
    pub fn ignore_rule(&mut self, pattern: &str) -> Result<(), LexerError> {
        self.register(Accept::Ignore, "<ignored>", pattern)
    }

    /// Register a rule. Earlier rules win ties on equally long matches.
    pub fn add_rule(
        &mut self,
        kind: K,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<(), LexerError> {
        let name = name.into();
        if kind == K::END {
            return Err(LexerError::ReservedKind(name));
        }
        self.register(Accept::Emit(kind), &name, pattern)?;
        self.names.insert(kind, name);
        Ok(())
    }

    pub fn add_rules<N, P>(
        &mut self,
        rules: impl IntoIterator<Item = (K, N, P)>,
    ) -> Result<(), LexerError>
    where
        N: Into<String>,
        P: AsRef<str>,
    {
        for (kind, name, pattern) in rules {
            self.add_rule(kind, name, pattern.as_ref())?;
        }
        Ok(())
    }

    fn register(&mut self, accept: Accept<K>, name: &str, pattern: &str) -> Result<(), LexerError> {
        self.nfa
            .compile(pattern, accept)
            .map_err(|error| LexerError::InvalidPattern {
                rule: name.to_string(),
                error,
            })?;
        self.rule_order.push(accept);
        // A rule added after compilation invalidates the cached automaton
        self.compiled = OnceCell::new();
        Ok(())
    }

    /// Printable name registered for `kind`
    pub fn token_name(&self, kind: K) -> Option<&str> {
        self.names.get(&kind).map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rule_order.len()
    }

    /// Build (or fetch the cached) deterministic automaton
    pub fn compile(&self) -> &Dfa<K> {
        self.compiled
            .get_or_init(|| Dfa::determinize(&self.nfa, &self.rule_order))
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Scan `source` into lexems, dropping ignored matches. No END sentinel is appended.
    pub fn analyse(&self, source: &str, file_name: &str) -> Result<Vec<Lexem<K>>, LexError> {
        self.scan(source, file_name).map(|(lexems, _)| lexems)
    }

    /// Scan `source` into a token stream terminated by exactly one END lexem
    pub fn tokenize(&self, source: &str, file_name: &str) -> Result<TokenStream<K>, LexError> {
        let (lexems, end) = self.scan(source, file_name)?;
        Ok(TokenStream::new(lexems, end))
    }

    fn scan(&self, source: &str, file_name: &str) -> Result<(Vec<Lexem<K>>, Location), LexError> {
        let dfa = self.compile();
        let chars: Vec<(usize, char)> = source.char_indices().collect();
        let byte_at = |index: usize| chars.get(index).map_or(source.len(), |&(offset, _)| offset);

        let mut lexems = Vec::new();
        let mut token_start = 0;
        let mut token_location = Location::start();

        while token_start < chars.len() {
            let mut state = dfa.root();
            let mut position = token_start;
            let mut last_accept = None;

            while let Some(&(_, ch)) = chars.get(position) {
                let Some(next) = dfa.step(state, ch) else {
                    break;
                };
                state = next;
                position += 1;
                if let Some(accept) = dfa.accept(state) {
                    last_accept = Some((accept, position));
                }
            }

            match last_accept {
                Some((accept, end)) => {
                    let text = &source[byte_at(token_start)..byte_at(end)];
                    if let Accept::Emit(kind) = accept {
                        let location = token_location.with_length(end - token_start);
                        lexems.push(Lexem::new(kind, text, location));
                    }
                    token_location = token_location.advanced_over(text);
                    token_start = end;
                }
                None => {
                    let end = (position + 1).min(chars.len());
                    return Err(LexError {
                        file_name: file_name.to_string(),
                        location: token_location.with_length(end - token_start),
                        text: source[byte_at(token_start)..byte_at(end)].to_string(),
                    });
                }
            }
        }

        debug!(
            file = file_name,
            tokens = lexems.len(),
            "tokenized source"
        );
        Ok((lexems, token_location))
    }
}
