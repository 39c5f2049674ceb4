//! Raw token definitions for GraphQL source text
//!
//! The raw token set is defined with the logos derive macro. Whitespace
//! and newlines are kept as tokens rather than skipped so the streaming
//! wrapper can observe line structure for indentation tracking.

use logos::Logos;

/// All raw tokens the GraphQL lexer distinguishes.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
    #[token("&")]
    Amp,
    #[token("(")]
    ParenL,
    #[token(")")]
    ParenR,
    #[token("...")]
    Spread,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("@")]
    At,
    #[token("[")]
    BracketL,
    #[token("]")]
    BracketR,
    #[token("{")]
    BraceL,
    #[token("}")]
    BraceR,
    #[token("|")]
    Pipe,

    #[regex(r"[_A-Za-z][_0-9A-Za-z]*")]
    Name,

    #[regex(r"-?(0|[1-9][0-9]*)", priority = 3)]
    Int,

    // Requires a fraction or exponent part, so plain integers stay Int.
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)")]
    Float,

    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    BlockString,

    #[regex(r"#[^\n\r]*")]
    Comment,

    // Commas and BOM are insignificant in GraphQL, same as spaces.
    #[regex(r"[ \t,\u{feff}]+")]
    Whitespace,

    #[regex(r"\r\n|\r|\n")]
    Newline,
}

impl RawToken {
    /// Whether the token is insignificant trivia for parsing purposes.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            RawToken::Whitespace | RawToken::Newline | RawToken::Comment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn punctuators_and_names() {
        assert_eq!(
            kinds("{ field }"),
            vec![
                RawToken::BraceL,
                RawToken::Whitespace,
                RawToken::Name,
                RawToken::Whitespace,
                RawToken::BraceR,
            ]
        );
    }

    #[test]
    fn spread_is_a_single_token() {
        assert_eq!(
            kinds("...Frag"),
            vec![RawToken::Spread, RawToken::Name]
        );
    }

    #[test]
    fn int_and_float_are_distinguished() {
        assert_eq!(kinds("123"), vec![RawToken::Int]);
        assert_eq!(kinds("-0"), vec![RawToken::Int]);
        assert_eq!(kinds("1.5"), vec![RawToken::Float]);
        assert_eq!(kinds("1e10"), vec![RawToken::Float]);
        assert_eq!(kinds("-1.5e-3"), vec![RawToken::Float]);
    }

    #[test]
    fn strings_and_block_strings() {
        assert_eq!(kinds(r#""hello \"quoted\"""#), vec![RawToken::String]);
        assert_eq!(kinds(r#""""multi
line""""#), vec![RawToken::BlockString]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("# a comment\nfield"),
            vec![RawToken::Comment, RawToken::Newline, RawToken::Name]
        );
    }

    #[test]
    fn commas_are_trivia() {
        assert_eq!(
            kinds("a,b"),
            vec![RawToken::Name, RawToken::Whitespace, RawToken::Name]
        );
    }

    #[test]
    fn unlexable_input_is_an_error() {
        let results: Vec<_> = RawToken::lexer("%").collect();
        assert!(results[0].is_err());
    }
}
