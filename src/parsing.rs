//! Backtracking parser combinators over token streams
//!
//! Grammars are assembled from small parsers with the methods of [`Parser`]:
//!
//! ```ignore
//! let mut builder = GrammarBuilder::new();
//! let list = builder.lazy::<Vec<Lexem<Kind>>>("list");
//! builder.define(
//!     &list,
//!     ignore(Kind::Open)
//!         .and(token(Kind::Atom).separated_by(ignore(Kind::Comma)))
//!         .skip(ignore(Kind::Close))
//!         .map(|(items,)| items),
//! )?;
//! let grammar = builder.build(list)?;
//! let items = grammar.parse_all(&lexer.tokenize(source, file_name)?)?;
//! ```
//!
//! Every parser either succeeds and consumes, or fails and leaves the cursor untouched, so
//! alternatives are simply tried in order. There is no memoization: a grammar that backtracks
//! over the same input repeatedly pays for it every time.

pub mod combinators;
pub mod error;
pub mod grammar;
pub mod lazy;
pub mod stream;
pub mod tuple;

pub use combinators::{
    end, ignore, many, optional, separated_by, seq, token, And, Construct, End, Ignore, Many,
    Map, MapInto, Optional, Or, Parser, Seq, SeparatedBy, Sequence, Skip, Token, TryMap,
};
pub use error::{GrammarError, ParseError};
pub use grammar::Grammar;
pub use lazy::{GrammarBuilder, Lazy};
pub use stream::{Cursor, TokenStream};
pub use tuple::{Append, Concat, Ignored};
