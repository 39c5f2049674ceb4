//! Constructor helpers for writing grammars in Rust
//!
//! JSON grammars deserialize straight into [`Rule`](super::rules::Rule);
//! these helpers exist for grammars defined in code, the built-in GraphQL
//! grammar first among them. They keep rule tables close to the notation
//! the shapes were designed around: `seq`, `list_of`, `peek`, `opt`.

use super::rules::{
    ButNot, IfCondition, ListOfTypeConstraint, OfTypeConstraint, PeekCondition, PeekConstraint,
    Rule, TokenConstraint,
};
use crate::token::TokenKind;

/// Reference to a named rule, resolved at push time.
pub fn rule(name: &str) -> Rule {
    Rule::Ref(name.to_string())
}

/// Ordered sequence of sub-rules (a constraint set).
pub fn seq(members: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Sequence(members.into_iter().collect())
}

/// A bare terminal-kind constraint.
pub fn token(kind: TokenKind) -> TokenConstraint {
    TokenConstraint {
        token: kind,
        of_value: None,
        one_of: None,
        but_not: None,
        optional: false,
        eat_next_on_fail: false,
        token_name: None,
    }
}

/// A `Name` terminal with a required exact value.
pub fn keyword(value: &str) -> TokenConstraint {
    token(TokenKind::Name).of_value(value)
}

/// Zero-or-more repetition of the named rule.
pub fn list_of(name: &str) -> Rule {
    ListOfTypeConstraint {
        list_of_type: name.to_string(),
        optional: false,
        eat_next_on_fail: false,
    }
    .into()
}

/// Wrap a rule so it can carry `optional` (or appear where a constraint is
/// expected).
pub fn of_type(inner: Rule) -> Rule {
    OfTypeConstraint {
        of_type: Box::new(inner),
        optional: false,
        eat_next_on_fail: false,
    }
    .into()
}

/// Optional wrapper: the construct may be absent, and a failure inside it
/// after expansion is absorbed.
pub fn opt(inner: Rule) -> Rule {
    OfTypeConstraint {
        of_type: Box::new(inner),
        optional: true,
        eat_next_on_fail: false,
    }
    .into()
}

/// Ordered lookahead alternatives.
pub fn peek(alternatives: impl IntoIterator<Item = PeekCondition>) -> Rule {
    PeekConstraint {
        peek: alternatives.into_iter().collect(),
        optional: false,
        eat_next_on_fail: false,
    }
    .into()
}

/// One peek alternative guarded by a token condition.
pub fn when(condition: TokenConstraint, expect: Rule) -> PeekCondition {
    PeekCondition {
        if_condition: Some(IfCondition::Token(Box::new(condition))),
        expect,
    }
}

/// The unconditional peek fallback.
pub fn otherwise(expect: Rule) -> PeekCondition {
    PeekCondition {
        if_condition: None,
        expect,
    }
}

impl TokenConstraint {
    /// Require this exact literal value.
    pub fn of_value(mut self, value: &str) -> Self {
        self.of_value = Some(value.to_string());
        self
    }

    /// Restrict to a set of allowed values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.one_of = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Exclude terminals matching the given constraint.
    pub fn but_not(mut self, excluded: TokenConstraint) -> Self {
        self.but_not = Some(ButNot::One(Box::new(excluded)));
        self
    }

    /// Exclude terminals matching any of the given constraints.
    pub fn but_not_any(mut self, excluded: impl IntoIterator<Item = TokenConstraint>) -> Self {
        self.but_not = Some(ButNot::Many(excluded.into_iter().collect()));
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn eat_next_on_fail(mut self) -> Self {
        self.eat_next_on_fail = true;
        self
    }

    /// Style-category override key consumed by the classifier.
    pub fn styled(mut self, token_name: &str) -> Self {
        self.token_name = Some(token_name.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::rules::RuleConstraint;

    #[test]
    fn keyword_builds_a_name_constraint_with_value() {
        let kw = keyword("query").styled("OperationKind");
        assert_eq!(kw.token, TokenKind::Name);
        assert_eq!(kw.of_value.as_deref(), Some("query"));
        assert_eq!(kw.token_name.as_deref(), Some("OperationKind"));
    }

    #[test]
    fn builders_produce_the_expected_shapes() {
        assert!(matches!(rule("Document"), Rule::Ref(ref n) if n == "Document"));
        assert!(matches!(
            seq([rule("A"), rule("B")]),
            Rule::Sequence(ref v) if v.len() == 2
        ));
        assert!(matches!(
            list_of("Definition"),
            Rule::Constraint(c) if matches!(*c, RuleConstraint::ListOfType(_))
        ));
        assert!(matches!(
            opt(rule("Directives")),
            Rule::Constraint(c) if matches!(
                *c,
                RuleConstraint::OfType(ref o) if o.optional
            )
        ));
    }

    #[test]
    fn peek_alternative_order_is_preserved() {
        let rule = peek([
            when(keyword("on"), super::rule("InlineFragment")),
            otherwise(super::rule("FragmentSpread")),
        ]);
        match rule {
            Rule::Constraint(c) => match *c {
                RuleConstraint::Peek(p) => {
                    assert!(p.peek[0].if_condition.is_some());
                    assert!(p.peek[1].if_condition.is_none());
                }
                other => panic!("expected peek, got {:?}", other),
            },
            other => panic!("expected constraint, got {:?}", other),
        }
    }
}
