//! Token classification
//!
//! Resolves the style tag of an emitted token by precedence: the
//! constraint's explicit style-category override, else the style
//! registered under the enclosing named rule, else a default keyed by
//! terminal kind. Unknown table keys are simply never consulted.

use crate::grammar::TokenConstraint;
use crate::token::TokenKind;
use std::collections::HashMap;

/// Open string-keyed style lookup table (token names and rule names map
/// to style categories).
pub type StyleTable = HashMap<String, String>;

/// Load a style table from its JSON encoding (a flat string-to-string
/// object).
pub fn style_table_from_json(json: &str) -> Result<StyleTable, serde_json::Error> {
    serde_json::from_str(json)
}

/// Fallback style per terminal kind.
pub fn default_style(kind: TokenKind) -> Option<&'static str> {
    if kind.is_punctuator() || kind == TokenKind::Punctuation {
        return Some("punctuation");
    }
    match kind {
        TokenKind::Name => Some("variable"),
        TokenKind::Int | TokenKind::Float => Some("number"),
        TokenKind::String | TokenKind::BlockString => Some("string"),
        TokenKind::Comment => Some("comment"),
        _ => None,
    }
}

/// Resolve the style of a terminal matched by `constraint` inside the
/// named rule `state_label`.
pub fn resolve_style(
    constraint: &TokenConstraint,
    state_label: &str,
    styles: &StyleTable,
    kind: TokenKind,
) -> Option<String> {
    if let Some(token_name) = &constraint.token_name {
        if let Some(style) = styles.get(token_name) {
            return Some(style.clone());
        }
    }
    if let Some(style) = styles.get(state_label) {
        return Some(style.clone());
    }
    default_style(kind).map(str::to_string)
}
