//! A small imperative language built on the lexer and the combinators
//!
//! Programs are lists of functions:
//!
//! ```text
//! defun fib(n) {
//!     if (n < 2) { return n; }
//!     return fib(n - 1) + fib(n - 2);
//! }
//! ```
//!
//! The lexer and the grammar are built once and shared; see [`tokens::lexer`] and
//! [`grammar::grammar`].

pub mod ast;
pub mod error;
pub mod grammar;
pub mod tokens;
pub mod treeviz;

pub use ast::Program;
pub use error::LanguageError;
pub use grammar::{build_grammar, grammar, ProgramGrammar};
pub use tokens::{build_lexer, lexer, Lexeme};
pub use treeviz::{to_treeviz_str, TreeNode};

use crate::lexing::Lexem;
use crate::parsing::TokenStream;

/// Split `source` into lexems, END included
pub fn tokenize(source: &str, file_name: &str) -> Result<TokenStream<Lexeme>, LanguageError> {
    Ok(lexer()?.tokenize(source, file_name)?)
}

/// Split `source` into lexems, without the END sentinel
pub fn analyse(source: &str, file_name: &str) -> Result<Vec<Lexem<Lexeme>>, LanguageError> {
    Ok(lexer()?.analyse(source, file_name)?)
}

/// Parse a whole program
pub fn parse_program(source: &str, file_name: &str) -> Result<Program, LanguageError> {
    let stream = tokenize(source, file_name)?;
    Ok(grammar()?.parse_all(&stream)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_program() {
        let program = parse_program("defun main() { return 0; }", "main.prog").unwrap();
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].name, "main");
    }

    #[test]
    fn test_lex_error_is_rendered_with_excerpt() {
        let source = "defun main() {\n  return 1 @ 2;\n}\n";
        let error = parse_program(source, "main.prog").unwrap_err();
        assert!(matches!(error, LanguageError::Lex(_)));
        insta::assert_snapshot!(error.render(source, "main.prog"), @r###"
        error: couldn't recognise token:
        In main.prog:2:12:
             2 |  return 1 @ 2;
               |           ^
        "###);
    }

    #[test]
    fn test_parse_error_points_at_furthest_token() {
        let source = "defun main() {\n  return 1 2;\n}\n";
        let error = parse_program(source, "main.prog").unwrap_err();
        let LanguageError::Parse(parse_error) = &error else {
            panic!("expected a parse error");
        };
        assert_eq!(parse_error.lexem.kind, Lexeme::Number);
        assert_eq!(parse_error.lexem.text, "2");
        assert_eq!(error.to_string(), "unexpected Number \"2\" at 2:12");
    }

    #[test]
    fn test_tokenize_ends_with_end() {
        let stream = tokenize("let x", "").unwrap();
        let kinds: Vec<Lexeme> = stream.lexems().iter().map(|lexem| lexem.kind).collect();
        assert_eq!(kinds, vec![Lexeme::Let, Lexeme::Name, Lexeme::End]);
        assert_eq!(analyse("let x", "").unwrap().len(), 2);
    }
}
