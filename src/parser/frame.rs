//! Stack frames: live instantiations of grammar rules
//!
//! A frame borrows its rule data straight from the shared grammar; all
//! per-use mutable progress (`expanded`, peek cursor) lives on the frame
//! itself. Rule-name references are resolved here, at instantiation time,
//! which is what lets mutually recursive grammars work without a cyclic
//! rule graph.

use crate::grammar::{Grammar, PeekCondition, Rule, RuleConstraint, TokenConstraint};
use std::fmt;

/// Shape tag of a frame, exposed for structural introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    Token,
    OfType,
    ListOfType,
    Peek,
    ConstraintSet,
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameShape::Token => "TokenConstraint",
            FrameShape::OfType => "OfTypeConstraint",
            FrameShape::ListOfType => "ListOfTypeConstraint",
            FrameShape::Peek => "PeekConstraint",
            FrameShape::ConstraintSet => "ConstraintsSet",
        };
        write!(f, "{}", name)
    }
}

/// Shape-specific payload of a frame.
#[derive(Debug, Clone)]
pub enum FrameKind<'g> {
    Token(&'g TokenConstraint),
    OfType(&'g Rule),
    ListOfType(&'g str),
    Peek {
        alternatives: &'g [PeekCondition],
        /// Last alternative tried; `None` before the first attempt.
        index: Option<usize>,
        matched: bool,
    },
    ConstraintSet(&'g [Rule]),
}

/// One live rule instantiation on the parse stack.
#[derive(Debug, Clone)]
pub struct Frame<'g> {
    /// Rule name this frame was instantiated under, if it was named.
    pub name: Option<&'g str>,
    /// Nearest enclosing named rule, for structural context.
    pub state: &'g str,
    /// Nesting depth; the root frame sits at 1.
    pub depth: usize,
    /// Sibling ordinal within the production that pushed this frame.
    pub step: usize,
    /// Whether children have been pushed at least once.
    pub expanded: bool,
    pub optional: bool,
    pub eat_next_on_fail: bool,
    pub kind: FrameKind<'g>,
}

impl<'g> Frame<'g> {
    /// Instantiate `rule` as a frame, following name references through
    /// the grammar until a concrete shape is reached.
    ///
    /// Fails with the offending name when a reference dangles, or when a
    /// reference chain is longer than the grammar itself (a pure-reference
    /// cycle that could never terminate).
    pub fn instantiate(
        grammar: &'g Grammar,
        rule: &'g Rule,
        depth: usize,
        step: usize,
        parent_state: &'g str,
        name_hint: Option<&'g str>,
    ) -> Result<Frame<'g>, &'g str> {
        let mut rule = rule;
        let mut name = name_hint;
        let mut hops = 0;
        let (kind, optional, eat_next_on_fail) = loop {
            match rule {
                Rule::Ref(reference) => {
                    hops += 1;
                    let resolved = grammar.get(reference);
                    match resolved {
                        Some(target) if hops <= grammar.len() => {
                            name = Some(reference.as_str());
                            rule = target;
                        }
                        _ => return Err(reference.as_str()),
                    }
                }
                Rule::Sequence(members) => {
                    break (FrameKind::ConstraintSet(members.as_slice()), false, false)
                }
                Rule::Constraint(constraint) => {
                    break match constraint.as_ref() {
                        RuleConstraint::Token(c) => {
                            (FrameKind::Token(c), c.optional, c.eat_next_on_fail)
                        }
                        RuleConstraint::OfType(c) => {
                            (FrameKind::OfType(&c.of_type), c.optional, c.eat_next_on_fail)
                        }
                        RuleConstraint::ListOfType(c) => (
                            FrameKind::ListOfType(c.list_of_type.as_str()),
                            c.optional,
                            c.eat_next_on_fail,
                        ),
                        RuleConstraint::Peek(c) => (
                            FrameKind::Peek {
                                alternatives: c.peek.as_slice(),
                                index: None,
                                matched: false,
                            },
                            c.optional,
                            c.eat_next_on_fail,
                        ),
                    }
                }
            }
        };
        Ok(Frame {
            name,
            state: name.unwrap_or(parent_state),
            depth,
            step,
            expanded: false,
            optional,
            eat_next_on_fail,
            kind,
        })
    }

    pub fn shape(&self) -> FrameShape {
        match self.kind {
            FrameKind::Token(_) => FrameShape::Token,
            FrameKind::OfType(_) => FrameShape::OfType,
            FrameKind::ListOfType(_) => FrameShape::ListOfType,
            FrameKind::Peek { .. } => FrameShape::Peek,
            FrameKind::ConstraintSet(_) => FrameShape::ConstraintSet,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, FrameKind::ListOfType(_))
    }

    pub fn is_constraint_set(&self) -> bool {
        matches!(self.kind, FrameKind::ConstraintSet(_))
    }
}
