//! # langkit
//!
//! A small toolkit for building lexers and parsers of toy languages.
//!
//! - [`lexing`] turns `(kind, pattern)` rules into a deterministic automaton and scans sources
//!   with maximal munch.
//! - [`parsing`] provides backtracking parser combinators over the resulting token streams,
//!   including forward-declared rules for recursive grammars.
//! - [`language`] is a complete example: a small imperative language with functions, loops and
//!   arithmetic.
//! - [`processor`] prints token streams and syntax trees in several formats.

pub mod language;
pub mod lexing;
pub mod parsing;
pub mod processor;
