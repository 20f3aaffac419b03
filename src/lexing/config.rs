//! Lexer rule sets loaded from YAML
//!
//! ```yaml
//! ignore:
//!   - "[ \t\n]([ \t\n])"
//! rules:
//!   - name: FOR
//!     pattern: "for"
//!   - name: NAME
//!     pattern: "[A-Za-z_]([A-Za-z0-9_])"
//! ```
//!
//! Ignore patterns are registered first, then rules in file order. A name that appears more than
//! once maps every one of its patterns to the same kind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use super::error::LexerError;
use super::lexer::Lexer;
use super::TokenKind;

/// Token kind of a configured lexer: the index of the rule name in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub u32);

impl TokenKind for RuleId {
    const END: Self = RuleId(u32::MAX);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Yaml(String),
    Lexer(LexerError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Yaml(msg) => write!(f, "Invalid rules file: {}", msg),
            ConfigError::Lexer(error) => write!(f, "Invalid rule: {}", error),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<LexerError> for ConfigError {
    fn from(error: LexerError) -> Self {
        ConfigError::Lexer(error)
    }
}

impl LexerConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&text)
    }

    /// Register every configured pattern on a fresh lexer
    pub fn build(&self) -> Result<Lexer<RuleId>, ConfigError> {
        let mut lexer = Lexer::new();
        for pattern in &self.ignore {
            lexer.ignore_rule(pattern)?;
        }

        let mut ids: HashMap<&str, RuleId> = HashMap::new();
        for rule in &self.rules {
            let next = RuleId(ids.len() as u32);
            let id = *ids.entry(rule.name.as_str()).or_insert(next);
            lexer.add_rule(id, rule.name.clone(), &rule.pattern)?;
        }
        Ok(lexer)
    }
}
