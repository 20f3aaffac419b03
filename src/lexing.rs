//! Lexical analysis for langkit
//!
//! Rules are registered as `(kind, pattern)` pairs on a [`Lexer`]. Every pattern is compiled
//! into one shared nondeterministic automaton, which is determinized lazily (see [`dfa`]) and
//! then driven by a maximal-munch scanner.
//!
//! Pattern syntax
//!
//! Patterns are deliberately tiny: a literal character, a bracketed class such as `[A-Za-z_]`,
//! or a parenthesized group `(...)` meaning "zero or more of the enclosed expression". Units are
//! concatenated by juxtaposition. There is no alternation operator, no escapes and no anchors,
//! so "one or more digits" is written `[0-9]([0-9])`.
//!
//! Priority
//!
//! When two rules accept the same maximal span, the rule registered first wins. Keyword rules
//! must therefore be registered before the identifier rule that would also match them.

pub mod config;
pub mod dfa;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod location;
pub mod nfa;
pub mod pattern;

use std::fmt;
use std::hash::Hash;

pub use config::{ConfigError, LexerConfig, RuleConfig, RuleId};
pub use dfa::{Accept, Dfa};
pub use diagnostics::render_excerpt;
pub use error::{LexError, LexerError, PatternError};
pub use lexer::Lexer;
pub use location::{Lexem, Location};

/// Token kinds a [`Lexer`] can emit.
///
/// `END` is reserved for the sentinel that terminates every token stream and can never be
/// registered for real text.
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug {
    const END: Self;
}
