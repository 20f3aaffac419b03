//! Token kinds and lexer rules of the demo language
//!
//! Keyword rules come before NAME: when a keyword and an identifier match the same span the
//! earlier rule wins, so `for` is FOR while `format` is still a NAME.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;

use crate::lexing::{Lexer, LexerError, TokenKind};

/// Every token the demo language produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lexeme {
    Arrow,
    Colon,
    Comma,
    Ellipsis,
    Equal,
    Equals,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Minus,
    Mul,
    Plus,
    Div,
    Semicolon,
    Lcb,
    Rcb,
    Lrb,
    Rrb,
    Defun,
    Return,
    If,
    Else,
    Let,
    While,
    For,
    In,
    Int,
    Name,
    Number,
    End,
}

impl TokenKind for Lexeme {
    const END: Self = Lexeme::End;
}

/// Whitespace between tokens
pub const WHITESPACE: &str = "[\n \t]([\n \t])";

/// Rules in priority order
pub const RULES: &[(Lexeme, &str)] = &[
    (Lexeme::Arrow, "->"),
    (Lexeme::Colon, ":"),
    (Lexeme::Comma, ","),
    (Lexeme::Ellipsis, ".."),
    (Lexeme::Equal, "="),
    (Lexeme::Equals, "=="),
    (Lexeme::NotEqual, "!="),
    (Lexeme::Greater, ">"),
    (Lexeme::GreaterOrEqual, ">="),
    (Lexeme::Less, "<"),
    (Lexeme::LessOrEqual, "<="),
    (Lexeme::Minus, "-"),
    (Lexeme::Mul, "*"),
    (Lexeme::Plus, "+"),
    (Lexeme::Div, "/"),
    (Lexeme::Semicolon, ";"),
    (Lexeme::Lcb, "{"),
    (Lexeme::Rcb, "}"),
    (Lexeme::Lrb, "[(]"),
    (Lexeme::Rrb, "[)]"),
    (Lexeme::Defun, "defun"),
    (Lexeme::Return, "return"),
    (Lexeme::If, "if"),
    (Lexeme::Else, "else"),
    (Lexeme::Let, "let"),
    (Lexeme::While, "while"),
    (Lexeme::For, "for"),
    (Lexeme::In, "in"),
    (Lexeme::Int, "int"),
    (Lexeme::Name, "[A-Za-z_]([A-Za-z0-9_])"),
    (Lexeme::Number, "[0-9]([0-9])"),
];

impl Lexeme {
    /// Printable rule name, as used in token dumps
    pub fn name(self) -> &'static str {
        match self {
            Lexeme::Arrow => "ARROW",
            Lexeme::Colon => "COLON",
            Lexeme::Comma => "COMMA",
            Lexeme::Ellipsis => "ELLIPSIS",
            Lexeme::Equal => "EQUAL",
            Lexeme::Equals => "EQUALS",
            Lexeme::NotEqual => "NOT_EQUAL",
            Lexeme::Greater => "GREATER",
            Lexeme::GreaterOrEqual => "GREATER_OR_EQUAL",
            Lexeme::Less => "LESS",
            Lexeme::LessOrEqual => "LESS_OR_EQUAL",
            Lexeme::Minus => "MINUS",
            Lexeme::Mul => "MUL",
            Lexeme::Plus => "PLUS",
            Lexeme::Div => "DIV",
            Lexeme::Semicolon => "SEMICOLON",
            Lexeme::Lcb => "LCB",
            Lexeme::Rcb => "RCB",
            Lexeme::Lrb => "LRB",
            Lexeme::Rrb => "RRB",
            Lexeme::Defun => "DEFUN",
            Lexeme::Return => "RETURN",
            Lexeme::If => "IF",
            Lexeme::Else => "ELSE",
            Lexeme::Let => "LET",
            Lexeme::While => "WHILE",
            Lexeme::For => "FOR",
            Lexeme::In => "IN",
            Lexeme::Int => "INT",
            Lexeme::Name => "NAME",
            Lexeme::Number => "NUMBER",
            Lexeme::End => "END",
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a fresh lexer for the language
pub fn build_lexer() -> Result<Lexer<Lexeme>, LexerError> {
    let mut lexer = Lexer::new();
    lexer.ignore_rule(WHITESPACE)?;
    lexer.add_rules(RULES.iter().map(|&(kind, pattern)| (kind, kind.name(), pattern)))?;
    lexer.compile();
    Ok(lexer)
}

/// The shared, compiled lexer
pub fn lexer() -> Result<&'static Lexer<Lexeme>, LexerError> {
    static LEXER: OnceCell<Lexer<Lexeme>> = OnceCell::new();
    LEXER.get_or_try_init(build_lexer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::Lexem;

    fn kinds(source: &str) -> Vec<Lexeme> {
        lexer()
            .unwrap()
            .analyse(source, "")
            .unwrap()
            .iter()
            .map(|lexem: &Lexem<Lexeme>| lexem.kind)
            .collect()
    }

    #[test]
    fn test_every_kind_but_end_has_a_rule() {
        assert_eq!(RULES.len(), 31);
        assert!(RULES.iter().all(|(kind, _)| *kind != Lexeme::End));
    }

    #[test]
    fn test_keywords_beat_names() {
        assert_eq!(
            kinds("defun return if else let while for in int"),
            vec![
                Lexeme::Defun,
                Lexeme::Return,
                Lexeme::If,
                Lexeme::Else,
                Lexeme::Let,
                Lexeme::While,
                Lexeme::For,
                Lexeme::In,
                Lexeme::Int,
            ]
        );
    }

    #[test]
    fn test_names_extending_keywords() {
        assert_eq!(kinds("format iffy in_range"), vec![Lexeme::Name; 3]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("-> : , .. = == != > >= < <= - * + /"),
            vec![
                Lexeme::Arrow,
                Lexeme::Colon,
                Lexeme::Comma,
                Lexeme::Ellipsis,
                Lexeme::Equal,
                Lexeme::Equals,
                Lexeme::NotEqual,
                Lexeme::Greater,
                Lexeme::GreaterOrEqual,
                Lexeme::Less,
                Lexeme::LessOrEqual,
                Lexeme::Minus,
                Lexeme::Mul,
                Lexeme::Plus,
                Lexeme::Div,
            ]
        );
    }

    #[test]
    fn test_brackets_and_range() {
        assert_eq!(
            kinds("{(0..10)}"),
            vec![
                Lexeme::Lcb,
                Lexeme::Lrb,
                Lexeme::Number,
                Lexeme::Ellipsis,
                Lexeme::Number,
                Lexeme::Rrb,
                Lexeme::Rcb,
            ]
        );
    }

    #[test]
    fn test_arrow_without_spaces() {
        assert_eq!(kinds("a->b"), vec![Lexeme::Name, Lexeme::Arrow, Lexeme::Name]);
        assert_eq!(kinds("a-1"), vec![Lexeme::Name, Lexeme::Minus, Lexeme::Number]);
    }

    #[test]
    fn test_names_match_lexer_table() {
        let lexer = lexer().unwrap();
        for (kind, _) in RULES {
            assert_eq!(lexer.token_name(*kind), Some(kind.name()));
        }
        assert!(lexer.is_compiled());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&Lexeme::GreaterOrEqual).unwrap(),
            "\"GREATER_OR_EQUAL\""
        );
        assert_eq!(Lexeme::NotEqual.to_string(), "NOT_EQUAL");
    }
}
