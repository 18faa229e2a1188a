//! Tests for selection sets: fields, aliases, arguments, directives,
//! fragment spreads and inline fragments.

use crate::ast;
use crate::tests::utils::first_field;
use crate::tests::utils::first_operation_selections;
use crate::tests::utils::parse_ok;

#[test]
fn field_with_alias_arguments_and_subselection() {
    let doc = parse_ok("{ luke: human(id: \"1000\", unit: METER) { name } }");
    let field = first_field(&doc);
    assert_eq!(field.alias.as_ref().map(ast::Name::as_str), Some("luke"));
    assert_eq!(field.name.as_str(), "human");
    assert_eq!(field.response_key(), "luke");
    assert_eq!(field.arguments.len(), 2);
    assert!(matches!(
        &field.argument("unit").unwrap().value,
        ast::Value::Enum { value, .. } if value == "METER"
    ));
    assert_eq!(field.selection_set.as_ref().unwrap().selections.len(), 1);
}

#[test]
fn response_key_defaults_to_name() {
    let doc = parse_ok("{ name }");
    assert_eq!(first_field(&doc).response_key(), "name");
    assert!(first_field(&doc).selection_set.is_none());
}

#[test]
fn directives_on_fields() {
    let doc = parse_ok("{ a @include(if: $flag) @skip(if: false) }");
    let field = first_field(&doc);
    let names: Vec<_> = field.directives.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["include", "skip"]);
    assert!(
        field.directives[0]
            .argument("if")
            .is_some_and(|arg| arg.value.is_variable())
    );
}

#[test]
fn fragment_spread() {
    let doc = parse_ok("{ ...UserFields @include(if: true) }");
    let ast::Selection::FragmentSpread(spread) = &first_operation_selections(&doc)[0] else {
        panic!("expected a fragment spread");
    };
    assert_eq!(spread.name.as_str(), "UserFields");
    assert_eq!(spread.directives.len(), 1);
}

/// `...` followed by a keyword-like name other than `on` is still a spread.
#[test]
fn spread_of_fragment_named_like_a_keyword() {
    let doc = parse_ok("{ ...null ...query }");
    let names: Vec<_> = first_operation_selections(&doc)
        .iter()
        .map(|selection| match selection {
            ast::Selection::FragmentSpread(spread) => spread.name.as_str(),
            other => panic!("expected a spread, got {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["null", "query"]);
}

#[test]
fn inline_fragment_with_type_condition() {
    let doc = parse_ok("{ ... on Dog { barks } }");
    let ast::Selection::InlineFragment(inline) = &first_operation_selections(&doc)[0] else {
        panic!("expected an inline fragment");
    };
    assert_eq!(
        inline.type_condition.as_ref().map(ast::Name::as_str),
        Some("Dog"),
    );
    assert_eq!(inline.selection_set.selections.len(), 1);
}

#[test]
fn inline_fragment_without_type_condition() {
    let doc = parse_ok("{ ... @skip(if: true) { a } ... { b } }");
    let selections = first_operation_selections(&doc);
    assert_eq!(selections.len(), 2);
    for selection in selections {
        let ast::Selection::InlineFragment(inline) = selection else {
            panic!("expected an inline fragment, got {selection:?}");
        };
        assert!(inline.type_condition.is_none());
    }
    assert_eq!(selections[0].directives().len(), 1);
}

#[test]
fn selections_keep_source_order() {
    let doc = parse_ok("{ a ...F b ... on T { c } d }");
    let kinds: Vec<_> = first_operation_selections(&doc)
        .iter()
        .map(|selection| match selection {
            ast::Selection::Field(field) => field.name.as_str().to_string(),
            ast::Selection::FragmentSpread(spread) => format!("...{}", spread.name),
            ast::Selection::InlineFragment(_) => "inline".to_string(),
        })
        .collect();
    assert_eq!(kinds, vec!["a", "...F", "b", "inline", "d"]);
}

#[test]
fn deeply_nested_selections_within_limit() {
    let depth = 60;
    let source = format!("{}x{}", "{ a ".repeat(depth), " }".repeat(depth));
    let doc = parse_ok(&source);
    assert_eq!(doc.definitions.len(), 1);
}
