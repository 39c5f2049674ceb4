//! Streaming GraphQL token source
//!
//! Wraps the logos raw lexer into the `TokenSource` contract the parser
//! drives: significant terminals only, a one-token lookahead buffer, a
//! sticky `<EOF>` terminal, and capture of each line's leading whitespace
//! for the indentation tracker.
//!
//! Comments, commas and whitespace are insignificant trivia and never
//! surface as terminals.

use crate::lexer::raw::RawToken;
use crate::token::{LexerToken, TokenKind, TokenSource};
use logos::Logos;

/// A lazy token source over GraphQL source text.
pub struct GraphqlLexer<'s> {
    inner: logos::Lexer<'s, RawToken>,
    peeked: Option<LexerToken>,
    /// Leading whitespace of the line the most recently pulled token is on.
    line_indent: String,
    at_line_start: bool,
}

impl<'s> GraphqlLexer<'s> {
    pub fn new(source: &'s str) -> Self {
        GraphqlLexer {
            inner: RawToken::lexer(source),
            peeked: None,
            line_indent: String::new(),
            at_line_start: true,
        }
    }

    /// Pull the next significant terminal out of the raw stream.
    fn pull(&mut self) -> LexerToken {
        loop {
            let Some(result) = self.inner.next() else {
                return LexerToken::eof();
            };
            match result {
                Ok(RawToken::Newline) => {
                    self.at_line_start = true;
                    self.line_indent.clear();
                }
                Ok(RawToken::Whitespace) => {
                    if self.at_line_start {
                        self.line_indent.push_str(self.inner.slice());
                    }
                }
                Ok(RawToken::Comment) => {
                    self.at_line_start = false;
                }
                Ok(raw) => {
                    self.at_line_start = false;
                    return self.terminal(raw);
                }
                Err(()) => {
                    self.at_line_start = false;
                    return LexerToken::with_value(TokenKind::Invalid, self.inner.slice());
                }
            }
        }
    }

    fn terminal(&self, raw: RawToken) -> LexerToken {
        let kind = match raw {
            RawToken::Bang => TokenKind::Bang,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::Amp => TokenKind::Amp,
            RawToken::ParenL => TokenKind::ParenL,
            RawToken::ParenR => TokenKind::ParenR,
            RawToken::Spread => TokenKind::Spread,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Equals => TokenKind::Equals,
            RawToken::At => TokenKind::At,
            RawToken::BracketL => TokenKind::BracketL,
            RawToken::BracketR => TokenKind::BracketR,
            RawToken::BraceL => TokenKind::BraceL,
            RawToken::BraceR => TokenKind::BraceR,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Name => TokenKind::Name,
            RawToken::Int => TokenKind::Int,
            RawToken::Float => TokenKind::Float,
            RawToken::String => TokenKind::String,
            RawToken::BlockString => TokenKind::BlockString,
            RawToken::Comment => TokenKind::Comment,
            RawToken::Whitespace | RawToken::Newline => {
                // Trivia is filtered in `pull`.
                TokenKind::Invalid
            }
        };
        if kind.is_punctuator() {
            LexerToken::new(kind)
        } else {
            // Raw source slice, so consumed values reproduce the input.
            LexerToken::with_value(kind, self.inner.slice())
        }
    }
}

impl TokenSource for GraphqlLexer<'_> {
    fn lookahead(&mut self) -> LexerToken {
        if let Some(token) = &self.peeked {
            return token.clone();
        }
        let token = self.pull();
        self.peeked = Some(token.clone());
        token
    }

    fn advance(&mut self) -> LexerToken {
        match self.peeked.take() {
            Some(token) => token,
            None => self.pull(),
        }
    }

    fn indent_text(&mut self) -> &str {
        if self.peeked.is_none() {
            let token = self.pull();
            self.peeked = Some(token);
        }
        &self.line_indent
    }
}

/// Collect all significant terminals of a source, ending with `<EOF>`.
pub fn tokenize(source: &str) -> Vec<LexerToken> {
    let mut lexer = GraphqlLexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.advance();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookahead_is_stable_until_advance() {
        let mut lexer = GraphqlLexer::new("query Q");
        let first = lexer.lookahead();
        assert_eq!(first, lexer.lookahead());
        assert_eq!(first, lexer.advance());
        assert_eq!(
            lexer.advance(),
            LexerToken::with_value(TokenKind::Name, "Q")
        );
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = GraphqlLexer::new("");
        assert!(lexer.lookahead().is_eof());
        assert!(lexer.advance().is_eof());
        assert!(lexer.advance().is_eof());
    }

    #[test]
    fn punctuators_carry_no_value() {
        let tokens = tokenize("{ name }");
        assert_eq!(tokens[0], LexerToken::new(TokenKind::BraceL));
        assert_eq!(tokens[1], LexerToken::with_value(TokenKind::Name, "name"));
        assert_eq!(tokens[2], LexerToken::new(TokenKind::BraceR));
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn comments_and_commas_are_skipped() {
        let tokens = tokenize("a, b # trailing\nc");
        let values: Vec<_> = tokens
            .iter()
            .filter_map(|t| t.value.as_deref())
            .collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn indent_text_reports_the_lookahead_line() {
        let mut lexer = GraphqlLexer::new("{\n    field\n}");
        assert_eq!(lexer.indent_text(), "");
        lexer.advance(); // {
        assert_eq!(lexer.indent_text(), "    ");
        lexer.advance(); // field
        assert_eq!(lexer.indent_text(), "");
        lexer.advance(); // }
    }

    #[test]
    fn tabs_survive_in_indent_text() {
        let mut lexer = GraphqlLexer::new("{\n\t\tfield }");
        lexer.advance();
        assert_eq!(lexer.indent_text(), "\t\t");
    }

    #[test]
    fn unlexable_characters_become_invalid_terminals() {
        let tokens = tokenize("a %");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].value.as_deref(), Some("%"));
    }
}
