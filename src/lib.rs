//! # graphql-online
//!
//! An incremental, resumable parser for GraphQL executable documents.
//!
//! Instead of batch-parsing to an AST, [`OnlineParser`] interprets a
//! declarative [`Grammar`] one terminal at a time: each
//! [`advance`](parser::OnlineParser::advance) call emits a single styled
//! [`Token`], and the full parse position lives in an explicit
//! [`ParserState`] that can be captured and resumed. This suits editor
//! syntax highlighting and structural outlining, where re-parsing whole
//! documents per keystroke is wasteful.
//!
//! ```
//! use graphql_online::OnlineParser;
//!
//! let mut parser = OnlineParser::from_source("query Q { user { name } }").unwrap();
//! let tokens = parser.tokens();
//! assert_eq!(tokens.first().and_then(|t| t.value.as_deref()), Some("query"));
//! ```

pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod token;

pub use grammar::{Grammar, GrammarError};
pub use lexer::GraphqlLexer;
pub use parser::{OnlineParser, ParserConfig, ParserState, StyleTable};
pub use token::{LexerToken, Token, TokenKind, TokenSource};
