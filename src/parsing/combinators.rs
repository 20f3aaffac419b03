//! The [`Parser`] trait and its combinators
//!
//! A parser either returns a value and leaves the cursor after what it consumed, or returns
//! `None` and leaves the cursor exactly where it found it. Every combinator here keeps that
//! contract, so alternatives can always be retried from the same position.
//!
//! Sequencing is keyed on the parser types involved. Every parser is a [`Sequence`] and hands
//! its items to [`Parser::and`] as a tuple: [`Ignore`] and [`End`] hand over nothing, [`And`],
//! [`Seq`] and [`Skip`] hand over the items they already hold, and every other parser hands over
//! its result as a single item. A parser that merely *returns* a tuple (through `map`, say) is a
//! single item and stays nested.

use std::marker::PhantomData;

use super::stream::Cursor;
use super::tuple::{Concat, Ignored};
use crate::lexing::{Lexem, TokenKind};

pub trait Parser<K> {
    type Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output>;

    /// Transform a successful result
    fn map<F, T>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> T,
    {
        Map { parser: self, f }
    }

    /// Transform a successful result, failing when `f` rejects it
    fn try_map<F, T>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Option<T>,
    {
        TryMap { parser: self, f }
    }

    /// Widen the result into a sum type, typically one enum per grammar rule
    fn map_into<T>(self) -> MapInto<Self, T>
    where
        Self: Sized,
        Self::Output: Into<T>,
    {
        MapInto {
            parser: self,
            target: PhantomData,
        }
    }

    /// Build a boxed node of type `T` from the result
    fn construct<T>(self) -> Construct<Self, T>
    where
        Self: Sized,
        T: From<Self::Output>,
    {
        Construct {
            parser: self,
            node: PhantomData,
        }
    }

    /// Run `next` after `self`, yielding the items of both sides as one flat tuple.
    ///
    /// Any parser can start a sequence: `token(Kind::A).and(token(Kind::B))` yields a pair of
    /// lexems, and ignored parsers drop out wherever they appear.
    fn and<P>(self, next: P) -> And<Self, P>
    where
        Self: Sized + Sequence<K>,
        P: Sequence<K>,
        Self::Items: Concat<P::Items>,
    {
        And { first: self, second: next }
    }

    /// Run `next` after `self`, dropping its result
    fn skip<P>(self, next: P) -> Skip<Self, P>
    where
        Self: Sized,
        P: Parser<K>,
    {
        Skip { first: self, second: next }
    }

    /// Try `self`, then `other` from the same position
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parser<K, Output = Self::Output>,
    {
        Or { first: self, second: other }
    }

    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        many(self)
    }

    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        optional(self)
    }

    fn separated_by<S>(self, separator: S) -> SeparatedBy<Self, S>
    where
        Self: Sized,
        S: Parser<K>,
    {
        separated_by(self, separator)
    }
}

impl<K: TokenKind, P: Parser<K> + ?Sized> Parser<K> for &P {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        (**self).parse(cursor)
    }
}

impl<K: TokenKind, P: Parser<K> + ?Sized> Parser<K> for Box<P> {
    type Output = P::Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        (**self).parse(cursor)
    }
}

/// A parser seen as one part of a sequence
pub trait Sequence<K>: Parser<K> {
    /// What this parser contributes to an enclosing sequence
    type Items;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items>;
}

impl<K: TokenKind, P: Sequence<K> + ?Sized> Sequence<K> for &P {
    type Items = P::Items;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        (**self).parse_items(cursor)
    }
}

impl<K: TokenKind, P: Sequence<K> + ?Sized> Sequence<K> for Box<P> {
    type Items = P::Items;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        (**self).parse_items(cursor)
    }
}

/// Parsers whose whole result is one sequence item
macro_rules! single_item {
    ($($parser:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<K: TokenKind, $($param),+> Sequence<K> for $parser<$($param),+>
            where
                Self: Parser<K>,
            {
                type Items = (<Self as Parser<K>>::Output,);

                fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
                    self.parse(cursor).map(|value| (value,))
                }
            }
        )*
    };
}

single_item!(
    Map<P, F>,
    TryMap<P, F>,
    MapInto<P, T>,
    Construct<P, T>,
    Or<A, B>,
    Many<P>,
    Optional<P>,
    SeparatedBy<P, S>,
);

/// Run `parser`, rewinding the cursor if it fails
fn attempt<K, T>(
    cursor: &mut Cursor<'_, K>,
    parser: impl FnOnce(&mut Cursor<'_, K>) -> Option<T>,
) -> Option<T>
where
    K: TokenKind,
{
    let start = cursor.position();
    let result = parser(cursor);
    if result.is_none() {
        cursor.restore(start);
    }
    result
}

// -------------------------------------------------------------------------------------------
// Primitives
// -------------------------------------------------------------------------------------------

/// Matches one lexem of the given kind and yields it
#[derive(Debug, Clone, Copy)]
pub struct Token<K> {
    kind: K,
}

pub fn token<K: TokenKind>(kind: K) -> Token<K> {
    Token { kind }
}

impl<K: TokenKind> Parser<K> for Token<K> {
    type Output = Lexem<K>;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        let lexem = cursor.peek();
        if self.kind == K::END || lexem.kind != self.kind {
            return None;
        }
        cursor.advance();
        Some(lexem.clone())
    }
}

impl<K: TokenKind> Sequence<K> for Token<K> {
    type Items = (Lexem<K>,);

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        self.parse(cursor).map(|lexem| (lexem,))
    }
}

/// Matches one lexem of the given kind and drops it
#[derive(Debug, Clone, Copy)]
pub struct Ignore<K> {
    kind: K,
}

pub fn ignore<K: TokenKind>(kind: K) -> Ignore<K> {
    Ignore { kind }
}

impl<K: TokenKind> Parser<K> for Ignore<K> {
    type Output = Ignored;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        token(self.kind).parse(cursor).map(|_| Ignored)
    }
}

impl<K: TokenKind> Sequence<K> for Ignore<K> {
    type Items = ();

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        self.parse(cursor).map(|_| ())
    }
}

/// Succeeds on END without consuming it
#[derive(Debug, Clone, Copy, Default)]
pub struct End;

pub fn end() -> End {
    End
}

impl<K: TokenKind> Parser<K> for End {
    type Output = ();

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        cursor.at_end().then_some(())
    }
}

impl<K: TokenKind> Sequence<K> for End {
    type Items = ();

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        Parser::<K>::parse(self, cursor)
    }
}

/// Yields the sequence items of `parser` as a tuple: `seq(token(k))` gives `(Lexem,)`
#[derive(Debug, Clone, Copy)]
pub struct Seq<P> {
    parser: P,
}

pub fn seq<P>(parser: P) -> Seq<P> {
    Seq { parser }
}

impl<K: TokenKind, P: Sequence<K>> Parser<K> for Seq<P> {
    type Output = P::Items;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        self.parser.parse_items(cursor)
    }
}

impl<K: TokenKind, P: Sequence<K>> Sequence<K> for Seq<P> {
    type Items = P::Items;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        self.parser.parse_items(cursor)
    }
}

// -------------------------------------------------------------------------------------------
// Transforms
// -------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<K, P, F, T> Parser<K> for Map<P, F>
where
    K: TokenKind,
    P: Parser<K>,
    F: Fn(P::Output) -> T,
{
    type Output = T;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        self.parser.parse(cursor).map(&self.f)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TryMap<P, F> {
    parser: P,
    f: F,
}

impl<K, P, F, T> Parser<K> for TryMap<P, F>
where
    K: TokenKind,
    P: Parser<K>,
    F: Fn(P::Output) -> Option<T>,
{
    type Output = T;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        attempt(cursor, |cursor| self.parser.parse(cursor).and_then(&self.f))
    }
}

pub struct MapInto<P, T> {
    parser: P,
    target: PhantomData<fn() -> T>,
}

impl<P: Clone, T> Clone for MapInto<P, T> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            target: PhantomData,
        }
    }
}

impl<K, P, T> Parser<K> for MapInto<P, T>
where
    K: TokenKind,
    P: Parser<K>,
    P::Output: Into<T>,
{
    type Output = T;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        self.parser.parse(cursor).map(Into::into)
    }
}

pub struct Construct<P, T> {
    parser: P,
    node: PhantomData<fn() -> T>,
}

impl<P: Clone, T> Clone for Construct<P, T> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            node: PhantomData,
        }
    }
}

impl<K, P, T> Parser<K> for Construct<P, T>
where
    K: TokenKind,
    P: Parser<K>,
    T: From<P::Output>,
{
    type Output = Box<T>;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        self.parser
            .parse(cursor)
            .map(|value| Box::new(T::from(value)))
    }
}

// -------------------------------------------------------------------------------------------
// Sequence and alternation
// -------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<K, A, B> Parser<K> for And<A, B>
where
    K: TokenKind,
    A: Sequence<K>,
    B: Sequence<K>,
    A::Items: Concat<B::Items>,
{
    type Output = <A::Items as Concat<B::Items>>::Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        attempt(cursor, |cursor| {
            let first = self.first.parse_items(cursor)?;
            let second = self.second.parse_items(cursor)?;
            Some(first.concat(second))
        })
    }
}

impl<K, A, B> Sequence<K> for And<A, B>
where
    K: TokenKind,
    A: Sequence<K>,
    B: Sequence<K>,
    A::Items: Concat<B::Items>,
{
    type Items = <Self as Parser<K>>::Output;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        self.parse(cursor)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Skip<A, B> {
    first: A,
    second: B,
}

impl<K, A, B> Parser<K> for Skip<A, B>
where
    K: TokenKind,
    A: Parser<K>,
    B: Parser<K>,
{
    type Output = A::Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        attempt(cursor, |cursor| {
            let first = self.first.parse(cursor)?;
            self.second.parse(cursor)?;
            Some(first)
        })
    }
}

impl<K, A, B> Sequence<K> for Skip<A, B>
where
    K: TokenKind,
    A: Sequence<K>,
    B: Parser<K>,
{
    type Items = A::Items;

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        attempt(cursor, |cursor| {
            let first = self.first.parse_items(cursor)?;
            self.second.parse(cursor)?;
            Some(first)
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<K, A, B> Parser<K> for Or<A, B>
where
    K: TokenKind,
    A: Parser<K>,
    B: Parser<K, Output = A::Output>,
{
    type Output = A::Output;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        attempt(cursor, |cursor| self.first.parse(cursor))
            .or_else(|| attempt(cursor, |cursor| self.second.parse(cursor)))
    }
}

// -------------------------------------------------------------------------------------------
// Repetition
// -------------------------------------------------------------------------------------------

/// Zero or more repetitions; never fails
#[derive(Debug, Clone, Copy)]
pub struct Many<P> {
    parser: P,
}

pub fn many<P>(parser: P) -> Many<P> {
    Many { parser }
}

impl<K: TokenKind, P: Parser<K>> Parser<K> for Many<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        let mut items = Vec::new();
        loop {
            let before = cursor.position();
            match attempt(cursor, |cursor| self.parser.parse(cursor)) {
                Some(item) => {
                    items.push(item);
                    // A match that consumed nothing would match forever
                    if cursor.position() == before {
                        break;
                    }
                }
                None => break,
            }
        }
        Some(items)
    }
}

/// Present or absent; never fails
#[derive(Debug, Clone, Copy)]
pub struct Optional<P> {
    parser: P,
}

pub fn optional<P>(parser: P) -> Optional<P> {
    Optional { parser }
}

impl<K: TokenKind, P: Parser<K>> Parser<K> for Optional<P> {
    type Output = Option<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        Some(attempt(cursor, |cursor| self.parser.parse(cursor)))
    }
}

/// `(item (separator item)*)?` with the separators dropped; never fails
#[derive(Debug, Clone, Copy)]
pub struct SeparatedBy<P, S> {
    item: P,
    separator: S,
}

pub fn separated_by<P, S>(item: P, separator: S) -> SeparatedBy<P, S> {
    SeparatedBy { item, separator }
}

impl<K, P, S> Parser<K> for SeparatedBy<P, S>
where
    K: TokenKind,
    P: Parser<K>,
    S: Parser<K>,
{
    type Output = Vec<P::Output>;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        let mut items = Vec::new();
        let Some(first) = attempt(cursor, |cursor| self.item.parse(cursor)) else {
            return Some(items);
        };
        items.push(first);

        loop {
            let before = cursor.position();
            let next = attempt(cursor, |cursor| {
                self.separator.parse(cursor)?;
                self.item.parse(cursor)
            });
            match next {
                Some(item) if cursor.position() != before => items.push(item),
                Some(item) => {
                    items.push(item);
                    break;
                }
                None => break,
            }
        }
        Some(items)
    }
}
