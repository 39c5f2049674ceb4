//! Grammar model: an immutable, named set of grammar rules
//!
//! A [`Grammar`] is loaded once (from Rust rule tables or from JSON) and
//! shared read-only across any number of parser sessions. No validation is
//! performed at load time; dangling rule references surface lazily, as
//! failed lookups, when a session actually needs them.

pub mod builder;
pub mod graphql;
pub mod rules;

pub use rules::{
    ButNot, IfCondition, ListOfTypeConstraint, OfTypeConstraint, PeekCondition, PeekConstraint,
    Rule, RuleConstraint, RuleName, TokenConstraint,
};

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// An immutable name-to-rule mapping with a designated root rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    rules: HashMap<String, Rule>,
    root: String,
}

impl Grammar {
    /// Build a grammar from rule entries. `root` names the rule a fresh
    /// session starts from; whether it actually exists is only checked
    /// when a session is seeded.
    pub fn new<N: Into<String>>(root: &str, entries: impl IntoIterator<Item = (N, Rule)>) -> Self {
        Grammar {
            rules: entries.into_iter().map(|(n, r)| (n.into(), r)).collect(),
            root: root.to_string(),
        }
    }

    /// Load a grammar from its JSON encoding: an object with a `rules`
    /// mapping and an optional `root` name (default `Document`).
    pub fn from_json(json: &str) -> Result<Grammar, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json)?;
        Ok(Grammar {
            rules: raw.rules,
            root: raw.root,
        })
    }

    /// Look a rule up by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Name of the root rule.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root entry, if the root name resolves.
    pub fn root_rule(&self) -> Option<(&str, &Rule)> {
        self.rules
            .get_key_value(self.root.as_str())
            .map(|(n, r)| (n.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Deserialize)]
struct RawGrammar {
    rules: HashMap<String, Rule>,
    #[serde(default = "default_root")]
    root: String,
}

fn default_root() -> String {
    "Document".to_string()
}

/// Errors surfaced when loading a grammar or seeding a session from one.
#[derive(Debug)]
pub enum GrammarError {
    /// The JSON encoding could not be deserialized.
    Json(serde_json::Error),
    /// A rule name did not resolve against the grammar.
    UnknownRule(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Json(err) => write!(f, "invalid grammar JSON: {}", err),
            GrammarError::UnknownRule(name) => write!(f, "unknown grammar rule: {}", name),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::Json(err) => Some(err),
            GrammarError::UnknownRule(_) => None,
        }
    }
}

impl From<serde_json::Error> for GrammarError {
    fn from(err: serde_json::Error) -> Self {
        GrammarError::Json(err)
    }
}
