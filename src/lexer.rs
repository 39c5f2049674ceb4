//! GraphQL lexer
//!
//! The lexer is the parser's token-source collaborator: raw tokenization
//! is handled entirely by logos, and [`GraphqlLexer`] layers the
//! lookahead/consume contract on top.

pub mod lexer_impl;
pub mod raw;

pub use lexer_impl::{tokenize, GraphqlLexer};
pub use raw::RawToken;
