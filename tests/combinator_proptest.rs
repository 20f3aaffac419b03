//! Property-based tests for the combinator contract: a failed parse never moves the cursor

use langkit::lexing::{Lexem, Location, TokenKind};
use langkit::parsing::{
    end, ignore, many, optional, seq, token, GrammarBuilder, Parser, TokenStream,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    A,
    B,
    C,
    End,
}

impl TokenKind for Kind {
    const END: Self = Kind::End;
}

fn kind() -> impl Strategy<Value = Kind> {
    prop::sample::select(vec![Kind::A, Kind::B, Kind::C])
}

fn stream(kinds: &[Kind]) -> TokenStream<Kind> {
    let lexems = kinds
        .iter()
        .enumerate()
        .map(|(index, &kind)| {
            Lexem::new(kind, format!("{:?}", kind), Location::new(index, 1, index + 1, 1))
        })
        .collect();
    TokenStream::new(lexems, Location::new(kinds.len(), 1, kinds.len() + 1, 0))
}

/// Run `parser` from `start` and check the cursor contract
fn check<P: Parser<Kind>>(
    parser: P,
    stream: &TokenStream<Kind>,
    start: usize,
) -> Result<(), TestCaseError> {
    let mut cursor = stream.cursor();
    cursor.restore(start);
    let before = cursor.position();
    match parser.parse(&mut cursor) {
        Some(_) => prop_assert!(cursor.position() >= before),
        None => prop_assert_eq!(cursor.position(), before),
    }
    prop_assert!(cursor.position() < stream.len());
    Ok(())
}

proptest! {
    #[test]
    fn test_failure_restores_cursor(
        kinds in prop::collection::vec(kind(), 0..12),
        start in 0usize..12,
    ) {
        let stream = stream(&kinds);

        check(token(Kind::A), &stream, start)?;
        check(token(Kind::A).and(token(Kind::B)), &stream, start)?;
        check(seq(token(Kind::A)).and(token(Kind::B)).and(token(Kind::C)), &stream, start)?;
        check(token(Kind::A).and(ignore(Kind::B).and(token(Kind::C))), &stream, start)?;
        check(ignore(Kind::A).skip(ignore(Kind::B)).or(ignore(Kind::A)), &stream, start)?;
        check(seq(many(token(Kind::A))).and(token(Kind::C)), &stream, start)?;
        check(seq(optional(token(Kind::B))).and(token(Kind::A)).skip(end()), &stream, start)?;
        check(token(Kind::A).separated_by(ignore(Kind::B)).skip(ignore(Kind::C)), &stream, start)?;
        check(
            token(Kind::C).try_map(|lexem| (lexem.location.offset % 2 == 0).then_some(lexem)),
            &stream,
            start,
        )?;
    }

    #[test]
    fn test_recursive_rule_restores_cursor(
        kinds in prop::collection::vec(kind(), 0..12),
        start in 0usize..12,
    ) {
        // nested := A nested C | B
        let mut builder = GrammarBuilder::new();
        let nested = builder.lazy::<usize>("nested");
        builder
            .define(
                &nested,
                ignore(Kind::A)
                    .and(nested.clone())
                    .skip(ignore(Kind::C))
                    .map(|(depth,)| depth + 1)
                    .or(ignore(Kind::B).map(|_| 0usize)),
            )
            .unwrap();
        let grammar = builder.build(nested).unwrap();
        check(grammar.top(), &stream(&kinds), start)?;
    }

    #[test]
    fn test_many_of_absent_parser_is_empty(kinds in prop::collection::vec(Just(Kind::B), 0..6)) {
        let stream = stream(&kinds);
        let mut cursor = stream.cursor();
        let result = many(token(Kind::A)).parse(&mut cursor);
        prop_assert_eq!(result.map(|items| items.len()), Some(0));
        prop_assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_many_consumes_longest_run(run in 0usize..8, rest in prop::collection::vec(kind(), 0..4)) {
        let mut kinds = vec![Kind::A; run];
        kinds.push(Kind::B);
        kinds.extend(rest);
        let stream = stream(&kinds);
        let mut cursor = stream.cursor();
        let items = many(token(Kind::A)).parse(&mut cursor).unwrap();
        prop_assert_eq!(items.len(), run);
        prop_assert_eq!(cursor.position(), run);
    }
}

#[test]
fn test_sequence_restores_to_its_own_start() {
    let stream = stream(&[Kind::C, Kind::A, Kind::C]);
    let mut cursor = stream.cursor();
    cursor.advance();
    let parser = token(Kind::A).and(token(Kind::B));
    assert!(parser.parse(&mut cursor).is_none());
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.furthest(), 2);
}

#[test]
fn test_flat_triple() {
    let stream = stream(&[Kind::A, Kind::B, Kind::C]);
    let parser = seq(token(Kind::A)).and(token(Kind::B)).and(token(Kind::C));
    let (a, b, c) = parser.parse(&mut stream.cursor()).unwrap();
    assert_eq!((a.kind, b.kind, c.kind), (Kind::A, Kind::B, Kind::C));
}
