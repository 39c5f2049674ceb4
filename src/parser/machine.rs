//! The rule stack machine
//!
//! One [`OnlineParser::advance`] call emits exactly one styled token, the
//! end-of-input token, or an invalid sentinel. Between calls all progress
//! lives in the [`ParserState`], so a session can be suspended and resumed
//! at any token boundary.
//!
//! The reference control flow for this machine is recursive (`advance`
//! re-entering itself after every expansion, rollback re-entering itself
//! per ancestor). Both are flattened into loops here; native stack usage
//! stays constant no matter how deep the grammar nests.

use crate::grammar::{
    graphql, ButNot, Grammar, GrammarError, IfCondition, Rule, RuleConstraint, TokenConstraint,
};
use crate::lexer::GraphqlLexer;
use crate::parser::config::ParserConfig;
use crate::parser::frame::{Frame, FrameKind};
use crate::parser::indent::IndentTracker;
use crate::parser::state::ParserState;
use crate::parser::styles::{resolve_style, StyleTable};
use crate::token::{LexerToken, Token, TokenKind, TokenSource};

/// Incremental parser: a grammar-driven stack machine over a token source.
pub struct OnlineParser<'g, S> {
    grammar: &'g Grammar,
    styles: &'g StyleTable,
    indent: IndentTracker,
    state: ParserState<'g>,
    source: S,
}

impl<'s> OnlineParser<'static, GraphqlLexer<'s>> {
    /// Parse GraphQL source text with the built-in grammar and styles.
    pub fn from_source(source: &'s str) -> Result<Self, GrammarError> {
        OnlineParser::with_grammar(graphql::grammar(), GraphqlLexer::new(source))
    }
}

impl<'g, S: TokenSource> OnlineParser<'g, S> {
    /// Drive `source` with `grammar`, using the built-in style table and
    /// default configuration.
    pub fn with_grammar(grammar: &'g Grammar, source: S) -> Result<Self, GrammarError> {
        Self::with_options(grammar, graphql::styles(), ParserConfig::default(), source)
    }

    /// Fully parameterized session over a fresh initial state.
    pub fn with_options(
        grammar: &'g Grammar,
        styles: &'g StyleTable,
        config: ParserConfig,
        source: S,
    ) -> Result<Self, GrammarError> {
        let state = ParserState::initial(grammar)?;
        Ok(Self::resume(grammar, styles, config, state, source))
    }

    /// Continue a suspended session from a previously captured state.
    pub fn resume(
        grammar: &'g Grammar,
        styles: &'g StyleTable,
        config: ParserConfig,
        state: ParserState<'g>,
        source: S,
    ) -> Self {
        OnlineParser {
            grammar,
            styles,
            indent: IndentTracker::new(config.tab_size),
            state,
            source,
        }
    }

    pub fn state(&self) -> &ParserState<'g> {
        &self.state
    }

    /// Capture the session state, consuming the parser.
    pub fn into_state(self) -> ParserState<'g> {
        self.state
    }

    /// Emit the next token.
    ///
    /// Returns the end-of-input token as soon as the source is exhausted,
    /// regardless of pending stack contents; returns the invalid sentinel
    /// when rollback has drained the stack while source remains. Callers
    /// stop on either (see [`Token::is_terminator`]).
    pub fn advance(&mut self) -> Token {
        self.state.indent_level = self.indent.measure(self.source.indent_text());

        loop {
            let ahead = self.source.lookahead();
            if ahead.kind == TokenKind::Eof {
                return Token::eof();
            }
            if ahead.kind == TokenKind::Invalid {
                // lexically unrecognized input passes straight through
                let consumed = self.source.advance();
                return Token {
                    kind: TokenKind::Invalid,
                    value: consumed.value,
                    style: None,
                };
            }

            let (kind, depth, state_label, optional, expanded) = match self.state.frames.last() {
                Some(top) => (
                    top.kind.clone(),
                    top.depth,
                    top.state,
                    top.optional,
                    top.expanded,
                ),
                None => return Token::invalid(),
            };

            match kind {
                FrameKind::Token(constraint) => {
                    if token_matches(&ahead, constraint) {
                        let consumed = self.source.advance();
                        self.close_top();
                        return self.emit(consumed, constraint, state_label);
                    }
                    self.fail(optional);
                }
                FrameKind::OfType(rule) => {
                    if expanded {
                        self.close_top();
                    } else {
                        self.mark_expanded();
                        if let Err(missing) = self.push(rule, depth + 1, 0, state_label, None) {
                            return self.grammar_fault(missing);
                        }
                    }
                }
                FrameKind::ListOfType(name) => {
                    // every visit arms another repetition; optional lets
                    // a failed repetition end the list instead of failing it
                    if let Some(top) = self.state.frames.last_mut() {
                        top.expanded = true;
                        top.optional = true;
                    }
                    match self.grammar.get(name) {
                        Some(rule) => {
                            if let Err(missing) =
                                self.push(rule, depth + 1, 0, state_label, Some(name))
                            {
                                return self.grammar_fault(missing);
                            }
                        }
                        None => return self.grammar_fault(name),
                    }
                }
                FrameKind::Peek {
                    alternatives,
                    index,
                    matched,
                } => {
                    if matched {
                        // the committed alternative has resolved
                        self.close_top();
                        continue;
                    }
                    let start = index.map_or(0, |i| i + 1);
                    let mut chosen = None;
                    for (i, alternative) in alternatives.iter().enumerate().skip(start) {
                        match self.condition_holds(alternative.if_condition.as_ref(), &ahead) {
                            Ok(true) => {
                                chosen = Some((i, &alternative.expect));
                                break;
                            }
                            Ok(false) => {}
                            Err(missing) => return self.grammar_fault(missing),
                        }
                    }
                    match chosen {
                        Some((i, expect)) => {
                            if let Some(top) = self.state.frames.last_mut() {
                                top.expanded = true;
                                if let FrameKind::Peek { index, matched, .. } = &mut top.kind {
                                    *index = Some(i);
                                    *matched = true;
                                }
                            }
                            if let Err(missing) = self.push(expect, depth + 1, 0, state_label, None)
                            {
                                return self.grammar_fault(missing);
                            }
                        }
                        None => self.fail(optional),
                    }
                }
                FrameKind::ConstraintSet(members) => {
                    if expanded {
                        self.close_top();
                    } else {
                        self.mark_expanded();
                        // reverse push so members pop in declared order
                        for (step, member) in members.iter().enumerate().rev() {
                            if let Err(missing) =
                                self.push(member, depth + 1, step, state_label, None)
                            {
                                return self.grammar_fault(missing);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Drain the session: every token up to and including the terminator.
    pub fn tokens(&mut self) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let token = self.advance();
            let done = token.is_terminator();
            out.push(token);
            if done {
                return out;
            }
        }
    }

    fn push(
        &mut self,
        rule: &'g Rule,
        depth: usize,
        step: usize,
        parent_state: &'g str,
        name_hint: Option<&'g str>,
    ) -> Result<(), &'g str> {
        let frame = Frame::instantiate(self.grammar, rule, depth, step, parent_state, name_hint)?;
        self.state.frames.push(frame);
        Ok(())
    }

    fn mark_expanded(&mut self) {
        if let Some(top) = self.state.frames.last_mut() {
            top.expanded = true;
        }
    }

    /// Closure: pop the satisfied top frame, cascade through completed
    /// constraint sets, and re-arm a completed list repetition.
    fn close_top(&mut self) {
        let closed = match self.state.frames.pop() {
            Some(frame) => frame,
            None => return,
        };
        let mut child_depth = closed.depth;
        while let Some(top) = self.state.frames.last_mut() {
            if !top.expanded || top.depth + 1 != child_depth {
                return;
            }
            if top.is_list() {
                top.expanded = false;
                top.optional = true;
                return;
            }
            if !top.is_constraint_set() {
                // of-type and peek parents close themselves on revisit
                return;
            }
            child_depth = top.depth;
            self.state.frames.pop();
        }
    }

    fn fail(&mut self, optional: bool) {
        if optional {
            self.state.frames.pop();
        } else {
            self.rollback();
        }
    }

    /// Rollback: discard the failing frame and everything inside the same
    /// subtree, then walk up until an optional or repeatable ancestor
    /// absorbs the failure. Draining the whole stack is total parse
    /// failure.
    fn rollback(&mut self) {
        loop {
            let failing = match self.state.frames.pop() {
                Some(frame) => frame,
                None => return,
            };
            if failing.eat_next_on_fail {
                // absorb the orphaned sibling paired with the failed rule
                self.state.frames.pop();
            }

            let failing_is_list = failing.is_list();
            let mut discarded = 0usize;
            while let Some(top) = self.state.frames.last() {
                if top.depth < failing.depth {
                    break;
                }
                if failing_is_list && !top.expanded {
                    break;
                }
                self.state.frames.pop();
                discarded += 1;
            }

            let (expanded, optional, is_list) = match self.state.frames.last() {
                Some(ancestor) => (ancestor.expanded, ancestor.optional, ancestor.is_list()),
                None => return,
            };
            if !expanded {
                return;
            }
            if optional {
                self.state.frames.pop();
                return;
            }
            if discarded == 1 && is_list {
                // the list's last repetition ended cleanly
                self.state.frames.pop();
                return;
            }
            // the ancestor had committed down this path; it fails too
        }
    }

    /// A condition ref must resolve to a token constraint; anything else is
    /// a grammar bug surfaced as the offending name.
    fn condition_holds(
        &self,
        condition: Option<&'g IfCondition>,
        ahead: &LexerToken,
    ) -> Result<bool, &'g str> {
        match condition {
            None => Ok(true),
            Some(IfCondition::Token(constraint)) => Ok(token_matches(ahead, constraint)),
            Some(IfCondition::Ref(name)) => match self.grammar.get(name) {
                Some(Rule::Constraint(constraint)) => match constraint.as_ref() {
                    RuleConstraint::Token(token) => Ok(token_matches(ahead, token)),
                    _ => Err(name.as_str()),
                },
                _ => Err(name.as_str()),
            },
        }
    }

    /// A dangling rule reference is a grammar bug; the session fails fast
    /// with the sentinel and the offending name as its value.
    fn grammar_fault(&mut self, name: &str) -> Token {
        self.state.frames.clear();
        Token {
            kind: TokenKind::Invalid,
            value: Some(name.to_string()),
            style: None,
        }
    }

    fn emit(
        &mut self,
        consumed: LexerToken,
        constraint: &'g TokenConstraint,
        state_label: &'g str,
    ) -> Token {
        if consumed.kind.opens_bracket() {
            self.state.levels.push(self.state.indent_level);
        } else if consumed.kind.closes_bracket() {
            self.state.levels.pop();
        }
        let style = resolve_style(constraint, state_label, self.styles, consumed.kind);
        let (kind, value) = match consumed.kind.punctuator() {
            Some(lexeme) => (TokenKind::Punctuation, Some(lexeme.to_string())),
            None => (consumed.kind, consumed.value),
        };
        Token { kind, value, style }
    }
}

/// Token-constraint matching. A token carrying a literal value matches on
/// that value when the constraint names one (exact or set), falling back
/// to kind equality; valueless tokens match on kind alone. Exclusions veto
/// the match on any hit.
fn token_matches(token: &LexerToken, constraint: &TokenConstraint) -> bool {
    let matched = match &token.value {
        Some(value) => {
            if let Some(expected) = &constraint.of_value {
                value == expected
            } else if let Some(allowed) = &constraint.one_of {
                allowed.iter().any(|v| v == value)
            } else {
                token.kind == constraint.token
            }
        }
        None => token.kind == constraint.token,
    };
    matched && not_excluded(token, constraint)
}

fn not_excluded(token: &LexerToken, constraint: &TokenConstraint) -> bool {
    match &constraint.but_not {
        None => true,
        Some(ButNot::One(excluded)) => !token_matches(token, excluded),
        Some(ButNot::Many(excluded)) => !excluded.iter().any(|c| token_matches(token, c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::builder::{keyword, list_of, opt, otherwise, peek, rule, seq, token, when};
    use crate::grammar::PeekCondition;

    fn kinds_and_values(tokens: &[Token]) -> Vec<(TokenKind, Option<&str>)> {
        tokens
            .iter()
            .map(|t| (t.kind, t.value.as_deref()))
            .collect()
    }

    fn toy_grammar() -> Grammar {
        Grammar::new(
            "Document",
            [
                ("Document", list_of("Definition")),
                (
                    "Definition",
                    seq([
                        keyword("query").into(),
                        token(TokenKind::Name).into(),
                        token(TokenKind::BraceL).into(),
                        list_of("Field"),
                        token(TokenKind::BraceR).into(),
                    ]),
                ),
                ("Field", seq([token(TokenKind::Name).into()])),
            ],
        )
    }

    #[test]
    fn matches_a_flat_sequence() {
        let grammar = toy_grammar();
        let mut parser =
            OnlineParser::with_grammar(&grammar, GraphqlLexer::new("query Q { a b }")).unwrap();
        let tokens = parser.tokens();
        assert_eq!(
            kinds_and_values(&tokens),
            vec![
                (TokenKind::Name, Some("query")),
                (TokenKind::Name, Some("Q")),
                (TokenKind::Punctuation, Some("{")),
                (TokenKind::Name, Some("a")),
                (TokenKind::Name, Some("b")),
                (TokenKind::Punctuation, Some("}")),
                (TokenKind::Eof, None),
            ]
        );
    }

    #[test]
    fn value_match_takes_precedence_over_kind() {
        let constraint = keyword("query");
        assert!(token_matches(
            &LexerToken::with_value(TokenKind::Name, "query"),
            &constraint
        ));
        assert!(!token_matches(
            &LexerToken::with_value(TokenKind::Name, "fragment"),
            &constraint
        ));
    }

    #[test]
    fn one_of_accepts_any_listed_value() {
        let constraint = token(TokenKind::Name).one_of(&["true", "false"]);
        assert!(token_matches(
            &LexerToken::with_value(TokenKind::Name, "false"),
            &constraint
        ));
        assert!(!token_matches(
            &LexerToken::with_value(TokenKind::Name, "null"),
            &constraint
        ));
    }

    #[test]
    fn but_not_vetoes_an_otherwise_valid_match() {
        let constraint = token(TokenKind::Name).but_not(keyword("on"));
        assert!(token_matches(
            &LexerToken::with_value(TokenKind::Name, "User"),
            &constraint
        ));
        assert!(!token_matches(
            &LexerToken::with_value(TokenKind::Name, "on"),
            &constraint
        ));
    }

    #[test]
    fn optional_construct_is_skipped_when_absent() {
        let grammar = Grammar::new(
            "Document",
            [(
                "Document",
                seq([
                    token(TokenKind::Name).into(),
                    opt(seq([
                        token(TokenKind::Colon).into(),
                        token(TokenKind::Name).into(),
                    ])),
                    token(TokenKind::Bang).into(),
                ]),
            )],
        );
        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("a!")).unwrap();
        let tokens = parser.tokens();
        assert_eq!(
            kinds_and_values(&tokens),
            vec![
                (TokenKind::Name, Some("a")),
                (TokenKind::Punctuation, Some("!")),
                (TokenKind::Eof, None),
            ]
        );
    }

    #[test]
    fn peek_selects_by_lookahead_value() {
        let grammar = Grammar::new(
            "Document",
            [
                (
                    "Document",
                    peek([
                        when(keyword("on"), rule("OnBranch")),
                        otherwise(rule("NameBranch")),
                    ]),
                ),
                ("OnBranch", seq([keyword("on").into(), token(TokenKind::Name).into()])),
                ("NameBranch", seq([token(TokenKind::Name).into()])),
            ],
        );

        let mut parser =
            OnlineParser::with_grammar(&grammar, GraphqlLexer::new("on User")).unwrap();
        assert_eq!(parser.advance().value.as_deref(), Some("on"));
        assert_eq!(parser.advance().value.as_deref(), Some("User"));

        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("other")).unwrap();
        assert_eq!(parser.advance().value.as_deref(), Some("other"));
    }

    #[test]
    fn unparseable_top_level_input_yields_the_invalid_sentinel() {
        let grammar = toy_grammar();
        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("}")).unwrap();
        let token = parser.advance();
        assert_eq!(token.kind, TokenKind::Invalid);
    }

    #[test]
    fn exhausted_source_wins_over_pending_frames() {
        let grammar = toy_grammar();
        let mut parser =
            OnlineParser::with_grammar(&grammar, GraphqlLexer::new("query Q {")).unwrap();
        let tokens = parser.tokens();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(!parser.state().is_drained());
    }

    #[test]
    fn dangling_rule_reference_fails_fast() {
        let grammar = Grammar::new("Document", [("Document", list_of("Missing"))]);
        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("a")).unwrap();
        let token = parser.advance();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(token.value.as_deref(), Some("Missing"));
    }

    #[test]
    fn dangling_condition_reference_fails_fast() {
        let grammar = Grammar::new(
            "Document",
            [
                (
                    "Document",
                    peek([
                        PeekCondition {
                            if_condition: Some(IfCondition::Ref("MissingCondition".into())),
                            expect: rule("Branch"),
                        },
                        otherwise(rule("Branch")),
                    ]),
                ),
                ("Branch", seq([token(TokenKind::Name).into()])),
            ],
        );
        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("hello")).unwrap();
        let token = parser.advance();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(token.value.as_deref(), Some("MissingCondition"));
    }

    #[test]
    fn non_token_condition_reference_fails_fast() {
        let grammar = Grammar::new(
            "Document",
            [
                (
                    "Document",
                    peek([
                        PeekCondition {
                            if_condition: Some(IfCondition::Ref("Branch".into())),
                            expect: rule("Branch"),
                        },
                        otherwise(rule("Branch")),
                    ]),
                ),
                ("Branch", seq([token(TokenKind::Name).into()])),
            ],
        );
        let mut parser = OnlineParser::with_grammar(&grammar, GraphqlLexer::new("hello")).unwrap();
        let token = parser.advance();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(token.value.as_deref(), Some("Branch"));
    }

    #[test]
    fn bracket_levels_track_open_brackets() {
        let grammar = toy_grammar();
        let mut parser =
            OnlineParser::with_grammar(&grammar, GraphqlLexer::new("query Q { a }")).unwrap();
        for _ in 0..3 {
            parser.advance();
        }
        assert_eq!(parser.state().levels(), &[0]);
        for _ in 0..2 {
            parser.advance();
        }
        assert!(parser.state().levels().is_empty());
    }

    #[test]
    fn session_resumes_from_captured_state() {
        let grammar = toy_grammar();
        let source = "query Q { a b }";
        let mut full = OnlineParser::with_grammar(&grammar, GraphqlLexer::new(source)).unwrap();
        let expected = full.tokens();

        let mut first = OnlineParser::with_grammar(&grammar, GraphqlLexer::new(source)).unwrap();
        let mut collected = vec![first.advance(), first.advance(), first.advance()];
        let state = first.into_state();

        // a fresh source positioned after the consumed prefix
        let mut second = OnlineParser::resume(
            &grammar,
            graphql::styles(),
            ParserConfig::default(),
            state,
            GraphqlLexer::new(" a b }"),
        );
        loop {
            let token = second.advance();
            let done = token.is_terminator();
            collected.push(token);
            if done {
                break;
            }
        }
        assert_eq!(kinds_and_values(&collected), kinds_and_values(&expected));
    }
}
