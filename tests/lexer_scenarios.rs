//! Scanning scenarios for hand-registered rule sets

use langkit::lexing::{Lexem, Lexer, LexerError, Location, TokenKind};
use rstest::rstest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    For,
    Name,
    Number,
    Arrow,
    Minus,
    End,
}

impl TokenKind for Kind {
    const END: Self = Kind::End;
}

const SPACE: &str = "[ \t\n]([ \t\n])";
const NAME: &str = "[A-Za-z_]([A-Za-z0-9_])";

fn keyword_first() -> Lexer<Kind> {
    let mut lexer = Lexer::new();
    lexer.ignore_rule(SPACE).unwrap();
    lexer.add_rule(Kind::For, "FOR", "for").unwrap();
    lexer.add_rule(Kind::Name, "NAME", NAME).unwrap();
    lexer
}

fn name_first() -> Lexer<Kind> {
    let mut lexer = Lexer::new();
    lexer.ignore_rule(SPACE).unwrap();
    lexer.add_rule(Kind::Name, "NAME", NAME).unwrap();
    lexer.add_rule(Kind::For, "FOR", "for").unwrap();
    lexer
}

fn summary(lexems: &[Lexem<Kind>]) -> Vec<(Kind, &str)> {
    lexems
        .iter()
        .map(|lexem| (lexem.kind, lexem.text.as_str()))
        .collect()
}

#[test]
fn test_keyword_then_name() {
    let lexems = keyword_first().analyse("for x", "").unwrap();
    assert_eq!(summary(&lexems), vec![(Kind::For, "for"), (Kind::Name, "x")]);
}

#[test]
fn test_earliest_rule_wins_tie() {
    let lexems = name_first().analyse("for", "").unwrap();
    assert_eq!(summary(&lexems), vec![(Kind::Name, "for")]);
}

#[rstest]
#[case(keyword_first(), Kind::For)]
#[case(name_first(), Kind::Name)]
fn test_tie_break_follows_registration_order(#[case] lexer: Lexer<Kind>, #[case] expected: Kind) {
    let lexems = lexer.analyse("x for", "").unwrap();
    assert_eq!(lexems[1].kind, expected);
}

#[test]
fn test_tie_break_ignores_unrelated_rules() {
    let mut lexer = Lexer::new();
    lexer.add_rule(Kind::Number, "NUMBER", "[0-9]([0-9])").unwrap();
    lexer.add_rule(Kind::Arrow, "ARROW", "->").unwrap();
    lexer.add_rule(Kind::Name, "NAME", NAME).unwrap();
    lexer.add_rule(Kind::Minus, "MINUS", "-").unwrap();
    lexer.add_rule(Kind::For, "FOR", "for").unwrap();
    let lexems = lexer.analyse("for", "").unwrap();
    assert_eq!(summary(&lexems), vec![(Kind::Name, "for")]);
}

#[test]
fn test_unknown_character_stops_scanning() {
    let error = keyword_first().analyse("for x @ y", "in.txt").unwrap_err();
    assert_eq!(error.text, "@");
    assert_eq!(error.location, Location::new(6, 1, 7, 1));
    insta::assert_snapshot!(error.render("for x @ y"), @r###"
    error: couldn't recognise token:
    In in.txt:1:7:
         1 |for x @ y
           |      ^
    "###);
}

#[rstest]
#[case("a->b", vec![(Kind::Name, "a"), (Kind::Arrow, "->"), (Kind::Name, "b")])]
#[case("a-b", vec![(Kind::Name, "a"), (Kind::Minus, "-"), (Kind::Name, "b")])]
#[case("a - b", vec![(Kind::Name, "a"), (Kind::Minus, "-"), (Kind::Name, "b")])]
#[case("12-3", vec![(Kind::Number, "12"), (Kind::Minus, "-"), (Kind::Number, "3")])]
fn test_maximal_munch(#[case] source: &str, #[case] expected: Vec<(Kind, &str)>) {
    let mut lexer = Lexer::new();
    lexer.ignore_rule(SPACE).unwrap();
    lexer
        .add_rules([
            (Kind::Arrow, "ARROW", "->"),
            (Kind::Minus, "MINUS", "-"),
            (Kind::Number, "NUMBER", "[0-9]([0-9])"),
            (Kind::Name, "NAME", NAME),
        ])
        .unwrap();
    let lexems = lexer.analyse(source, "").unwrap();
    assert_eq!(summary(&lexems), expected);
}

#[rstest]
#[case("")]
#[case("x")]
#[case("for for for")]
#[case("  \n\t")]
fn test_stream_ends_with_one_end(#[case] source: &str) {
    let stream = keyword_first().tokenize(source, "").unwrap();
    let ends = stream
        .lexems()
        .iter()
        .filter(|lexem| lexem.kind == Kind::End)
        .count();
    assert_eq!(ends, 1);
    assert_eq!(stream.lexems().last().map(|lexem| lexem.kind), Some(Kind::End));
}

#[rstest]
#[case("")]
#[case("(a)")]
#[case("(a)([0-9])")]
#[case("[z-a]")]
#[case("[ab")]
#[case("a)")]
fn test_invalid_patterns_are_rejected(#[case] pattern: &str) {
    let mut lexer: Lexer<Kind> = Lexer::new();
    let error = lexer.add_rule(Kind::Name, "BROKEN", pattern).unwrap_err();
    assert!(matches!(error, LexerError::InvalidPattern { ref rule, .. } if rule == "BROKEN"));
    assert_eq!(lexer.rule_count(), 0);
}

#[test]
fn test_lexer_is_shared_between_threads() {
    let lexer = std::sync::Arc::new(keyword_first());
    lexer.compile();
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let lexer = lexer.clone();
            std::thread::spawn(move || lexer.analyse(&format!("for x{}", n), "").unwrap().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
