//! Property-based tests for the automaton compiler and the scanner

use langkit::language::{self, Lexeme};
use langkit::lexing::{Accept, Dfa, Lexer, TokenKind};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Rule(usize);

impl TokenKind for Rule {
    const END: Self = Rule(usize::MAX);
}

/// One unit of a generated pattern, alongside its regex translation
#[derive(Debug, Clone)]
enum Unit {
    Literal(char),
    Class(&'static str),
}

impl Unit {
    fn pattern(&self) -> String {
        match self {
            Unit::Literal(ch) => ch.to_string(),
            Unit::Class(class) => class.to_string(),
        }
    }
}

fn unit() -> impl Strategy<Value = Unit> {
    prop_oneof![
        prop::sample::select(vec!['a', 'b', 'c']).prop_map(Unit::Literal),
        prop::sample::select(vec!["[ab]", "[a-c]", "[bc]"]).prop_map(Unit::Class),
    ]
}

/// A unit followed by an optional group of plain units: `u` or `u(v...)`
fn segment() -> impl Strategy<Value = (Unit, Vec<Unit>)> {
    (unit(), prop::collection::vec(unit(), 0..3))
}

/// Patterns of the supported syntax, paired with an equivalent anchored regex.
///
/// Groups never follow each other and never nest: two loops on the same state are merged into
/// one and accept interleavings a regex would not.
fn pattern() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(segment(), 1..4).prop_map(|segments| {
        let mut pattern = String::new();
        let mut regex = String::from("^");
        for (head, group) in segments {
            pattern.push_str(&head.pattern());
            regex.push_str(&head.pattern());
            if !group.is_empty() {
                let inner: String = group.iter().map(Unit::pattern).collect();
                pattern.push_str(&format!("({})", inner));
                regex.push_str(&format!("(?:{})*", inner));
            }
        }
        regex.push('$');
        (pattern, regex)
    })
}

fn single_rule(pattern: &str) -> Lexer<Rule> {
    let mut lexer = Lexer::new();
    lexer.add_rule(Rule(0), "RULE", pattern).unwrap();
    lexer
}

fn accepts(dfa: &Dfa<Rule>, text: &str) -> bool {
    dfa.run(text)
        .and_then(|state| dfa.accept(state))
        .is_some()
}

fn reachable(dfa: &Dfa<Rule>) -> BTreeSet<usize> {
    let mut seen = BTreeSet::from([dfa.root()]);
    let mut pending = vec![dfa.root()];
    while let Some(state) = pending.pop() {
        for (_, target) in dfa.edges(state) {
            if seen.insert(target) {
                pending.push(target);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn test_matches_agree_with_regex(
        (pattern, regex) in pattern(),
        inputs in prop::collection::vec("[abcd]{0,8}", 1..16),
    ) {
        let lexer = single_rule(&pattern);
        let dfa = lexer.compile();
        let reference = regex::Regex::new(&regex).unwrap();
        for input in &inputs {
            prop_assert_eq!(
                accepts(dfa, input),
                reference.is_match(input),
                "pattern {} on {:?}", pattern, input
            );
        }
    }

    #[test]
    fn test_dfa_is_deterministic((pattern, _) in pattern(), (other, _) in pattern()) {
        let mut lexer = Lexer::new();
        lexer.add_rule(Rule(0), "FIRST", &pattern).unwrap();
        lexer.add_rule(Rule(1), "SECOND", &other).unwrap();
        let dfa = lexer.compile();
        for state in reachable(dfa) {
            let chars: Vec<char> = dfa.edges(state).map(|(ch, _)| ch).collect();
            let unique: BTreeSet<char> = chars.iter().copied().collect();
            prop_assert_eq!(chars.len(), unique.len());
            for (ch, target) in dfa.edges(state) {
                prop_assert_eq!(dfa.step(state, ch), Some(target));
                prop_assert!(target < dfa.state_count());
            }
        }
    }

    #[test]
    fn test_compilation_is_pure(
        rules in prop::collection::vec(pattern(), 1..4),
    ) {
        let build = || {
            let mut lexer = Lexer::new();
            for (index, (pattern, _)) in rules.iter().enumerate() {
                lexer.add_rule(Rule(index), format!("R{}", index), pattern).unwrap();
            }
            lexer
        };
        let first = build();
        let second = build();
        prop_assert_eq!(first.compile(), second.compile());
    }

    #[test]
    fn test_identical_patterns_resolve_to_earliest_rule(
        (pattern, _) in pattern(),
        input in "[abc]{1,8}",
    ) {
        let mut lexer = Lexer::new();
        lexer.add_rule(Rule(0), "FIRST", &pattern).unwrap();
        lexer.add_rule(Rule(1), "SECOND", &pattern).unwrap();
        let dfa = lexer.compile();
        if let Some(state) = dfa.run(&input) {
            let accept = dfa.accept(state);
            prop_assert!(accept.is_none() || accept == Some(Accept::Emit(Rule(0))));
        }
    }

    #[test]
    fn test_token_stream_ends_with_single_end(
        source in r"[a-z0-9 (){};=+*/<>!,.\n-]{0,64}",
    ) {
        let lexer = language::lexer().unwrap();
        if let Ok(stream) = lexer.tokenize(&source, "") {
            let lexems = stream.lexems();
            let ends = lexems.iter().filter(|lexem| lexem.kind == Lexeme::End).count();
            prop_assert_eq!(ends, 1);
            prop_assert_eq!(lexems.last().map(|lexem| lexem.kind), Some(Lexeme::End));
            prop_assert_eq!(lexems.last().map(|lexem| lexem.location.offset), Some(source.len()));
        }
    }

    #[test]
    fn test_lexems_cover_source_in_order(source in r"[a-z0-9 (){};=+*/<>,\n-]{0,64}") {
        let lexems = language::lexer().unwrap().analyse(&source, "").unwrap();
        let mut offset = 0;
        for lexem in &lexems {
            prop_assert!(lexem.location.offset >= offset);
            prop_assert_eq!(&source[lexem.location.offset..][..lexem.text.len()], lexem.text.as_str());
            offset = lexem.location.offset + lexem.text.len();
        }
    }
}
