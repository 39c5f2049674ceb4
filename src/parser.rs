//! Grammar-driven incremental parsing
//!
//! The machine in [`machine`] interprets a [`Grammar`](crate::grammar::Grammar)
//! over a [`TokenSource`](crate::token::TokenSource), emitting one styled
//! token per call. Supporting pieces: per-session [`config`], the
//! [`frame`]/[`state`] stack model, [`indent`] measurement and [`styles`]
//! resolution.

pub mod config;
pub mod frame;
pub mod indent;
pub mod machine;
pub mod state;
pub mod styles;

pub use config::ParserConfig;
pub use frame::{Frame, FrameKind, FrameShape};
pub use indent::IndentTracker;
pub use machine::OnlineParser;
pub use state::ParserState;
pub use styles::{default_style, resolve_style, style_table_from_json, StyleTable};
