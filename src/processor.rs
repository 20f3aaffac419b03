//! Stage/format driven processing of source files
//!
//! A processing spec is written `<stage>-<format>`: `token-simple`, `token-json`, `ast-json` or
//! `ast-tree`. The binary and the snapshot tests both go through [`process_source`].

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::language::{self, to_treeviz_str, LanguageError};
use crate::lexing::{ConfigError, LexError, Lexem, Lexer, TokenKind};

/// What to extract from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// How to print it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    pub fn new(stage: ProcessingStage, format: OutputFormat) -> Self {
        Self { stage, format }
    }

    /// Parse a spec string like "token-simple" or "ast-tree"
    pub fn from_string(spec: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = spec.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(spec.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };
        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "tree" => OutputFormat::Tree,
            other => return Err(ProcessingError::InvalidFormatType(other.to_string())),
        };

        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Tree) => Err(ProcessingError::InvalidFormatType(
                "format 'tree' only works with the ast stage".to_string(),
            )),
            (ProcessingStage::Ast, OutputFormat::Simple) => {
                Err(ProcessingError::InvalidFormatType(
                    "format 'simple' only works with the token stage".to_string(),
                ))
            }
            _ => Ok(Self::new(stage, format)),
        }
    }

    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            Self::new(ProcessingStage::Token, OutputFormat::Simple),
            Self::new(ProcessingStage::Token, OutputFormat::Json),
            Self::new(ProcessingStage::Ast, OutputFormat::Json),
            Self::new(ProcessingStage::Ast, OutputFormat::Tree),
        ]
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Tree => "tree",
        };
        write!(f, "{}-{}", stage, format)
    }
}

/// All spec strings accepted by [`ProcessingSpec::from_string`]
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    Io(String),
    Serialization(String),
    Config(ConfigError),
    Language(LanguageError),
}

impl ProcessingError {
    /// Render the error for the terminal, with a source excerpt for lexical and parse errors
    pub fn render(&self, source: &str, file_name: &str) -> String {
        match self {
            ProcessingError::Language(error) => error.render(source, file_name),
            other => format!("error: {}\n", other),
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(spec) => write!(f, "invalid format: {}", spec),
            ProcessingError::InvalidStage(stage) => write!(f, "invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format) => {
                write!(f, "invalid format type: {}", format)
            }
            ProcessingError::Io(message) => write!(f, "IO error: {}", message),
            ProcessingError::Serialization(message) => {
                write!(f, "serialization error: {}", message)
            }
            ProcessingError::Config(error) => write!(f, "{}", error),
            ProcessingError::Language(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ProcessingError {}

impl From<LanguageError> for ProcessingError {
    fn from(error: LanguageError) -> Self {
        ProcessingError::Language(error)
    }
}

impl From<LexError> for ProcessingError {
    fn from(error: LexError) -> Self {
        ProcessingError::Language(LanguageError::Lex(error))
    }
}

impl From<ConfigError> for ProcessingError {
    fn from(error: ConfigError) -> Self {
        ProcessingError::Config(error)
    }
}

impl From<serde_json::Error> for ProcessingError {
    fn from(error: serde_json::Error) -> Self {
        ProcessingError::Serialization(error.to_string())
    }
}

/// Process `source` with the built-in language
pub fn process_source(
    source: &str,
    file_name: &str,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    debug!(file = file_name, spec = %spec, "processing source");
    match spec.stage {
        ProcessingStage::Token => {
            let lexer = language::lexer().map_err(LanguageError::from)?;
            process_tokens(lexer, source, file_name, spec.format)
        }
        ProcessingStage::Ast => {
            let program = language::parse_program(source, file_name)?;
            match spec.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&program)?),
                OutputFormat::Tree => Ok(to_treeviz_str(&program)),
                OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
                    "format 'simple' only works with the token stage".to_string(),
                )),
            }
        }
    }
}

/// Read and process a file with the built-in language
pub fn process_file<P: AsRef<Path>>(
    path: P,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|e| ProcessingError::Io(format!("{}: {}", path.display(), e)))?;
    process_source(&source, &path.display().to_string(), spec)
}

/// One token as printed by the json format
#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'a str,
    text: &'a str,
    line: usize,
    column: usize,
}

/// Tokenize `source` with any lexer and print the stream, END included
pub fn process_tokens<K: TokenKind>(
    lexer: &Lexer<K>,
    source: &str,
    file_name: &str,
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    let stream = lexer.tokenize(source, file_name)?;
    let name = |lexem: &Lexem<K>| lexer.token_name(lexem.kind).unwrap_or("?");

    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for lexem in stream.lexems() {
                result.push_str(&format!(
                    "{} {:?} @ {}\n",
                    name(lexem),
                    lexem.text,
                    lexem.location
                ));
            }
            Ok(result)
        }
        OutputFormat::Json => {
            let records: Vec<TokenRecord<'_>> = stream
                .lexems()
                .iter()
                .map(|lexem| TokenRecord {
                    kind: name(lexem),
                    text: &lexem.text,
                    line: lexem.location.line,
                    column: lexem.location.column,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&records)?)
        }
        OutputFormat::Tree => Err(ProcessingError::InvalidFormatType(
            "format 'tree' only works with the ast stage".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::LexerConfig;
    use rstest::rstest;

    #[rstest]
    #[case("token-simple", ProcessingStage::Token, OutputFormat::Simple)]
    #[case("token-json", ProcessingStage::Token, OutputFormat::Json)]
    #[case("ast-json", ProcessingStage::Ast, OutputFormat::Json)]
    #[case("ast-tree", ProcessingStage::Ast, OutputFormat::Tree)]
    fn test_parse_spec(
        #[case] text: &str,
        #[case] stage: ProcessingStage,
        #[case] format: OutputFormat,
    ) {
        let spec = ProcessingSpec::from_string(text).unwrap();
        assert_eq!(spec, ProcessingSpec::new(stage, format));
        assert_eq!(spec.to_string(), text);
    }

    #[rstest]
    #[case("token")]
    #[case("bytes-json")]
    #[case("token-xml")]
    #[case("token-tree")]
    #[case("ast-simple")]
    fn test_reject_spec(#[case] text: &str) {
        assert!(ProcessingSpec::from_string(text).is_err());
    }

    #[test]
    fn test_available_formats() {
        assert_eq!(
            available_formats(),
            vec!["token-simple", "token-json", "ast-json", "ast-tree"]
        );
    }

    #[test]
    fn test_token_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_source("let x = 10;", "", &spec).unwrap();
        insta::assert_snapshot!(output, @r###"
        LET "let" @ 1:1
        NAME "x" @ 1:5
        EQUAL "=" @ 1:7
        NUMBER "10" @ 1:9
        SEMICOLON ";" @ 1:11
        END "" @ 1:12
        "###);
    }

    #[test]
    fn test_token_json() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let output = process_source("x", "", &spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "kind": "NAME", "text": "x", "line": 1, "column": 1 },
                { "kind": "END", "text": "", "line": 1, "column": 2 },
            ])
        );
    }

    #[test]
    fn test_ast_tree() {
        let spec = ProcessingSpec::from_string("ast-tree").unwrap();
        let output = process_source("defun id(x) { return x; }", "", &spec).unwrap();
        insta::assert_snapshot!(output, @r###"
        └─ Function: id(x)
          └─ Return
            └─ Variable: x
        "###);
    }

    #[test]
    fn test_ast_json() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let output = process_source("defun f() { }", "", &spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "functions": [
                    { "name": "f", "parameters": [], "body": { "statements": [] } }
                ]
            })
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let spec = ProcessingSpec::from_string("ast-tree").unwrap();
        let error = process_source("defun f( { }", "bad.prog", &spec).unwrap_err();
        assert!(matches!(
            error,
            ProcessingError::Language(LanguageError::Parse(_))
        ));
        assert!(error
            .render("defun f( { }", "bad.prog")
            .starts_with("error: unexpected Lcb \"{\":\nIn bad.prog:1:10:\n"));
    }

    #[test]
    fn test_tokens_with_configured_lexer() {
        let config = LexerConfig::from_yaml(
            "ignore: ['[ ]([ ])']\nrules:\n  - name: WORD\n    pattern: '[a-z]([a-z])'\n",
        )
        .unwrap();
        let lexer = config.build().unwrap();
        let output = process_tokens(&lexer, "ab cd", "", OutputFormat::Simple).unwrap();
        assert_eq!(output, "WORD \"ab\" @ 1:1\nWORD \"cd\" @ 1:4\nEND \"\" @ 1:6\n");
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let error = process_file("does/not/exist.prog", &spec).unwrap_err();
        assert!(matches!(error, ProcessingError::Io(_)));
    }
}
