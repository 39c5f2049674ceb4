//! Declarative grammar rule shapes
//!
//! A grammar is a name-to-rule mapping; each rule is one of a closed set of
//! shapes. Rules referencing other rules do so by name only; references
//! are resolved by lookup at the moment a parser needs them, so mutually
//! recursive grammars never require a cyclic object graph.
//!
//! The serde representation mirrors the JSON grammar files this engine
//! consumes: a rule is a bare string (rule-name reference), an array
//! (constraint set) or an object whose discriminating field (`token`,
//! `ofType`, `listOfType`, `peek`) selects the shape.

use crate::token::TokenKind;
use serde::{Deserialize, Serialize};

/// Name of a grammar rule, resolved lazily against the grammar.
pub type RuleName = String;

/// One grammar rule: a reference, a single constraint, or an ordered
/// sequence of sub-rules that must all match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    Ref(RuleName),
    Sequence(Vec<Rule>),
    Constraint(Box<RuleConstraint>),
}

/// The four constraint shapes, distinguished by their discriminating field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConstraint {
    OfType(OfTypeConstraint),
    ListOfType(ListOfTypeConstraint),
    Peek(PeekConstraint),
    Token(TokenConstraint),
}

/// Matches exactly one terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConstraint {
    /// Terminal kind to match.
    pub token: TokenKind,
    /// Required exact literal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_value: Option<String>,
    /// Allowed-value set; the terminal's value must be a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
    /// Exclusion constraints; a terminal matching any of them is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub but_not: Option<ButNot>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// On a hard failure of this constraint, also discard the next frame.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eat_next_on_fail: bool,
    /// Style-category override key for the classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
}

/// One or several exclusion constraints for `butNot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButNot {
    One(Box<TokenConstraint>),
    Many(Vec<TokenConstraint>),
}

/// Wraps exactly one nested rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfTypeConstraint {
    pub of_type: Box<Rule>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eat_next_on_fail: bool,
}

/// Zero-or-more repetition of a named rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOfTypeConstraint {
    pub list_of_type: RuleName,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eat_next_on_fail: bool,
}

/// Ordered alternatives disambiguated by one-token lookahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeekConstraint {
    pub peek: Vec<PeekCondition>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eat_next_on_fail: bool,
}

/// One peek alternative: commit to `expect` when `if_condition` holds
/// against the lookahead terminal, or unconditionally when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeekCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_condition: Option<IfCondition>,
    pub expect: Rule,
}

/// A peek condition, inline or referencing a named token-constraint rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IfCondition {
    Ref(RuleName),
    Token(Box<TokenConstraint>),
}

impl From<TokenConstraint> for Rule {
    fn from(c: TokenConstraint) -> Self {
        Rule::Constraint(Box::new(RuleConstraint::Token(c)))
    }
}

impl From<OfTypeConstraint> for Rule {
    fn from(c: OfTypeConstraint) -> Self {
        Rule::Constraint(Box::new(RuleConstraint::OfType(c)))
    }
}

impl From<ListOfTypeConstraint> for Rule {
    fn from(c: ListOfTypeConstraint) -> Self {
        Rule::Constraint(Box::new(RuleConstraint::ListOfType(c)))
    }
}

impl From<PeekConstraint> for Rule {
    fn from(c: PeekConstraint) -> Self {
        Rule::Constraint(Box::new(RuleConstraint::Peek(c)))
    }
}
