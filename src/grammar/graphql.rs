//! Built-in grammar for GraphQL executable documents
//!
//! Covers operations (including shorthand queries), variable definitions,
//! field selections with aliases, arguments, all value forms, directives,
//! fragment definitions, fragment spreads and inline fragments. Loaded
//! once and shared read-only across all parser sessions.
//!
//! Fragment spread versus inline fragment is decided by one-token
//! lookahead after the spread: `on`, `{` or `@` commits to an inline
//! fragment, anything else falls back to a spread.

use super::builder::{keyword, list_of, opt, otherwise, peek, rule, seq, token, when};
use super::Grammar;
use crate::parser::styles::StyleTable;
use crate::token::TokenKind;
use once_cell::sync::Lazy;

static GRAMMAR: Lazy<Grammar> = Lazy::new(build);

/// The shared GraphQL executable-document grammar.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}

static STYLES: Lazy<StyleTable> = Lazy::new(|| {
    [
        ("OperationKind", "keyword"),
        ("OperationName", "def"),
        ("VariableName", "variable"),
        ("FieldName", "property"),
        ("AliasedFieldName", "qualifier"),
        ("ArgumentName", "attribute"),
        ("ObjectFieldName", "attribute"),
        ("BooleanValue", "builtin"),
        ("NullValue", "keyword"),
        ("EnumValue", "atom"),
        ("DirectiveName", "meta"),
        ("FragmentName", "def"),
        ("FragmentKeyword", "keyword"),
        ("OnKeyword", "keyword"),
        ("TypeName", "atom"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
});

/// Default style table for the built-in grammar's token names.
pub fn styles() -> &'static StyleTable {
    &STYLES
}

fn build() -> Grammar {
    use TokenKind::*;

    Grammar::new(
        "Document",
        [
            ("Document", list_of("Definition")),
            (
                "Definition",
                peek([
                    when(
                        token(Name).one_of(&["query", "mutation", "subscription"]),
                        rule("OperationDefinition"),
                    ),
                    when(keyword("fragment"), rule("FragmentDefinition")),
                    // Shorthand query: a bare selection set at top level.
                    when(token(BraceL), rule("SelectionSet")),
                ]),
            ),
            (
                "OperationDefinition",
                seq([
                    token(Name)
                        .one_of(&["query", "mutation", "subscription"])
                        .styled("OperationKind")
                        .into(),
                    token(Name).optional().styled("OperationName").into(),
                    opt(rule("VariableDefinitions")),
                    list_of("Directive"),
                    rule("SelectionSet"),
                ]),
            ),
            (
                "VariableDefinitions",
                seq([
                    token(ParenL).into(),
                    list_of("VariableDefinition"),
                    token(ParenR).into(),
                ]),
            ),
            (
                "VariableDefinition",
                seq([
                    rule("Variable"),
                    token(Colon).into(),
                    rule("Type"),
                    opt(rule("DefaultValue")),
                ]),
            ),
            (
                "Variable",
                seq([
                    token(Dollar).into(),
                    token(Name).styled("VariableName").into(),
                ]),
            ),
            ("DefaultValue", seq([token(Equals).into(), rule("Value")])),
            (
                "SelectionSet",
                seq([
                    token(BraceL).into(),
                    list_of("Selection"),
                    token(BraceR).into(),
                ]),
            ),
            (
                "Selection",
                peek([
                    when(
                        token(Spread),
                        seq([
                            token(Spread).into(),
                            peek([
                                when(keyword("on"), rule("InlineFragment")),
                                when(token(BraceL), rule("InlineFragment")),
                                when(token(At), rule("InlineFragment")),
                                otherwise(rule("FragmentSpread")),
                            ]),
                        ]),
                    ),
                    when(token(Name), rule("Field")),
                ]),
            ),
            (
                "Field",
                seq([
                    token(Name).styled("FieldName").into(),
                    // Alias form: the first name was the alias.
                    opt(seq([
                        token(Colon).into(),
                        token(Name).styled("AliasedFieldName").into(),
                    ])),
                    opt(rule("Arguments")),
                    list_of("Directive"),
                    opt(rule("SelectionSet")),
                ]),
            ),
            (
                "Arguments",
                seq([
                    token(ParenL).into(),
                    list_of("Argument"),
                    token(ParenR).into(),
                ]),
            ),
            (
                "Argument",
                seq([
                    token(Name).styled("ArgumentName").into(),
                    token(Colon).into(),
                    rule("Value"),
                ]),
            ),
            (
                "Value",
                peek([
                    when(token(Int), token(Int).into()),
                    when(token(Float), token(Float).into()),
                    when(token(String), token(String).into()),
                    when(token(BlockString), token(BlockString).into()),
                    when(
                        token(Name).one_of(&["true", "false"]),
                        token(Name)
                            .one_of(&["true", "false"])
                            .styled("BooleanValue")
                            .into(),
                    ),
                    when(keyword("null"), keyword("null").styled("NullValue").into()),
                    when(token(Name), token(Name).styled("EnumValue").into()),
                    when(token(Dollar), rule("Variable")),
                    when(token(BracketL), rule("ListValue")),
                    when(token(BraceL), rule("ObjectValue")),
                ]),
            ),
            (
                "ListValue",
                seq([
                    token(BracketL).into(),
                    list_of("Value"),
                    token(BracketR).into(),
                ]),
            ),
            (
                "ObjectValue",
                seq([
                    token(BraceL).into(),
                    list_of("ObjectField"),
                    token(BraceR).into(),
                ]),
            ),
            (
                "ObjectField",
                seq([
                    token(Name).styled("ObjectFieldName").into(),
                    token(Colon).into(),
                    rule("Value"),
                ]),
            ),
            (
                "Directive",
                seq([
                    token(At).into(),
                    token(Name).styled("DirectiveName").into(),
                    opt(rule("Arguments")),
                ]),
            ),
            (
                "FragmentSpread",
                seq([
                    token(Name)
                        .but_not(keyword("on"))
                        .styled("FragmentName")
                        .into(),
                    list_of("Directive"),
                ]),
            ),
            (
                "InlineFragment",
                seq([
                    opt(rule("TypeCondition")),
                    list_of("Directive"),
                    rule("SelectionSet"),
                ]),
            ),
            (
                "TypeCondition",
                seq([keyword("on").styled("OnKeyword").into(), rule("NamedType")]),
            ),
            (
                "FragmentDefinition",
                seq([
                    keyword("fragment").styled("FragmentKeyword").into(),
                    token(Name)
                        .but_not(keyword("on"))
                        .styled("FragmentName")
                        .into(),
                    rule("TypeCondition"),
                    list_of("Directive"),
                    rule("SelectionSet"),
                ]),
            ),
            (
                "Type",
                peek([
                    when(token(BracketL), rule("ListType")),
                    when(token(Name), rule("NamedType")),
                ]),
            ),
            (
                "NamedType",
                seq([
                    token(Name).styled("TypeName").into(),
                    token(Bang).optional().into(),
                ]),
            ),
            (
                "ListType",
                seq([
                    token(BracketL).into(),
                    rule("Type"),
                    token(BracketR).into(),
                    token(Bang).optional().into(),
                ]),
            ),
        ],
    )
}
