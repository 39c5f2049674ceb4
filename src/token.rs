//! Token vocabulary shared by the lexer, the grammar model and the parser
//!
//! This module defines the terminal kinds of the GraphQL surface syntax,
//! the raw token produced by a token source, the styled token emitted by
//! the parser, and the `TokenSource` contract the parser drives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// All terminal kinds a token source can report and a grammar can constrain.
///
/// Punctuators are their own kinds (a token constraint names `"{"` directly);
/// `Punctuation` only appears on emitted tokens, where the concrete lexeme
/// moves into the token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = "$")]
    Dollar,
    #[serde(rename = "&")]
    Amp,
    #[serde(rename = "(")]
    ParenL,
    #[serde(rename = ")")]
    ParenR,
    #[serde(rename = "...")]
    Spread,
    #[serde(rename = ":")]
    Colon,
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "@")]
    At,
    #[serde(rename = "[")]
    BracketL,
    #[serde(rename = "]")]
    BracketR,
    #[serde(rename = "{")]
    BraceL,
    #[serde(rename = "}")]
    BraceR,
    #[serde(rename = "|")]
    Pipe,
    Name,
    Int,
    Float,
    String,
    BlockString,
    Comment,
    /// Generic kind carried by emitted punctuator tokens.
    Punctuation,
    #[serde(rename = "<EOF>")]
    Eof,
    Invalid,
}

impl TokenKind {
    /// The lexeme of a punctuator kind, `None` for everything else.
    pub fn punctuator(&self) -> Option<&'static str> {
        match self {
            TokenKind::Bang => Some("!"),
            TokenKind::Dollar => Some("$"),
            TokenKind::Amp => Some("&"),
            TokenKind::ParenL => Some("("),
            TokenKind::ParenR => Some(")"),
            TokenKind::Spread => Some("..."),
            TokenKind::Colon => Some(":"),
            TokenKind::Equals => Some("="),
            TokenKind::At => Some("@"),
            TokenKind::BracketL => Some("["),
            TokenKind::BracketR => Some("]"),
            TokenKind::BraceL => Some("{"),
            TokenKind::BraceR => Some("}"),
            TokenKind::Pipe => Some("|"),
            _ => None,
        }
    }

    pub fn is_punctuator(&self) -> bool {
        self.punctuator().is_some()
    }

    /// Opening half of a bracket pair (`(`, `[`, `{`).
    pub fn opens_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenL | TokenKind::BracketL | TokenKind::BraceL
        )
    }

    /// Closing half of a bracket pair (`)`, `]`, `}`).
    pub fn closes_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenR | TokenKind::BracketR | TokenKind::BraceR
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = self.punctuator() {
            return write!(f, "{}", p);
        }
        let name = match self {
            TokenKind::Name => "Name",
            TokenKind::Int => "Int",
            TokenKind::Float => "Float",
            TokenKind::String => "String",
            TokenKind::BlockString => "BlockString",
            TokenKind::Comment => "Comment",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Eof => "<EOF>",
            TokenKind::Invalid => "Invalid",
            _ => unreachable!("punctuators handled above"),
        };
        write!(f, "{}", name)
    }
}

/// A raw terminal as reported by a token source.
///
/// Scalar terminals (names, numbers, strings, comments) carry their raw
/// source slice in `value`; punctuators carry no value, their kind is the
/// lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerToken {
    pub kind: TokenKind,
    pub value: Option<String>,
}

impl LexerToken {
    pub fn new(kind: TokenKind) -> Self {
        LexerToken { kind, value: None }
    }

    pub fn with_value(kind: TokenKind, value: impl Into<String>) -> Self {
        LexerToken {
            kind,
            value: Some(value.into()),
        }
    }

    pub fn eof() -> Self {
        LexerToken::new(TokenKind::Eof)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// A classified, styled token emitted by the parser.
///
/// Punctuator terminals are emitted with the generic `Punctuation` kind and
/// their lexeme in `value`, so that concatenating emitted values (plus the
/// token source's insignificant trivia) reproduces the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    pub style: Option<String>,
}

impl Token {
    pub fn eof() -> Self {
        Token {
            kind: TokenKind::Eof,
            value: None,
            style: None,
        }
    }

    pub fn invalid() -> Self {
        Token {
            kind: TokenKind::Invalid,
            value: None,
            style: None,
        }
    }

    /// End-of-stream sentinel: callers stop driving the parser on either.
    pub fn is_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Invalid)
    }
}

/// The lookahead/consume contract a parser session drives.
///
/// `lookahead` must be stable across repeated calls until `advance` is
/// invoked, and a source must keep returning the `<EOF>` terminal once it
/// has reported it.
pub trait TokenSource {
    /// The next terminal, without consuming it.
    fn lookahead(&mut self) -> LexerToken;

    /// Consume and return the terminal `lookahead` reported.
    fn advance(&mut self) -> LexerToken;

    /// Leading whitespace of the line the lookahead terminal starts on.
    ///
    /// Sources without line structure can rely on the default.
    fn indent_text(&mut self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuator_lexemes_round_trip_through_display() {
        assert_eq!(TokenKind::BraceL.to_string(), "{");
        assert_eq!(TokenKind::Spread.to_string(), "...");
        assert_eq!(TokenKind::Name.to_string(), "Name");
        assert_eq!(TokenKind::Eof.to_string(), "<EOF>");
    }

    #[test]
    fn bracket_classification() {
        assert!(TokenKind::ParenL.opens_bracket());
        assert!(TokenKind::BraceR.closes_bracket());
        assert!(!TokenKind::Colon.opens_bracket());
        assert!(!TokenKind::Name.closes_bracket());
    }

    #[test]
    fn kind_serde_uses_lexeme_names() {
        let kind: TokenKind = serde_json::from_str("\"{\"").unwrap();
        assert_eq!(kind, TokenKind::BraceL);
        let kind: TokenKind = serde_json::from_str("\"Name\"").unwrap();
        assert_eq!(kind, TokenKind::Name);
        assert_eq!(serde_json::to_string(&TokenKind::Spread).unwrap(), "\"...\"");
    }
}
