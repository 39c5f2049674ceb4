//! Session state: the frame stack plus the structural side channel
//!
//! Everything mutable about a parse lives here, so a session can be
//! snapshotted by cloning the state and resumed later against the same
//! grammar.

use crate::grammar::{Grammar, GrammarError};
use crate::parser::frame::Frame;

/// Complete mutable state of one parse session.
#[derive(Debug, Clone)]
pub struct ParserState<'g> {
    /// Live rule instantiations, deepest last.
    pub frames: Vec<Frame<'g>>,
    /// Depths at which brackets opened and have not yet closed.
    pub levels: Vec<usize>,
    /// Indentation measured at the start of the current line.
    pub indent_level: usize,
}

impl<'g> ParserState<'g> {
    /// Seed a fresh session: one frame for the grammar's root rule.
    pub fn initial(grammar: &'g Grammar) -> Result<ParserState<'g>, GrammarError> {
        let (name, rule) = grammar
            .root_rule()
            .ok_or_else(|| GrammarError::UnknownRule(grammar.root().to_string()))?;
        let root = Frame::instantiate(grammar, rule, 1, 0, name, Some(name))
            .map_err(|missing| GrammarError::UnknownRule(missing.to_string()))?;
        Ok(ParserState {
            frames: vec![root],
            levels: Vec::new(),
            indent_level: 0,
        })
    }

    /// Name of the nearest enclosing named rule, or the empty string once
    /// the stack has drained.
    pub fn kind(&self) -> &'g str {
        self.frames.last().map(|f| f.state).unwrap_or("")
    }

    /// Sibling ordinal of the top frame.
    pub fn step(&self) -> usize {
        self.frames.last().map(|f| f.step).unwrap_or(0)
    }

    /// Nesting depth of the top frame; 0 once the stack has drained.
    pub fn depth(&self) -> usize {
        self.frames.last().map(|f| f.depth).unwrap_or(0)
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn is_drained(&self) -> bool {
        self.frames.is_empty()
    }
}
