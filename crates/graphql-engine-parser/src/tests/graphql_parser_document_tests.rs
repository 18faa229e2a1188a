//! Tests for document-level parsing: operations, fragments and variable
//! definitions.

use crate::ast;
use crate::tests::utils::parse_ok;

#[test]
fn shorthand_query() {
    let doc = parse_ok("{ hero { name } }");
    assert_eq!(doc.definitions.len(), 1);
    let op = doc.operations().next().unwrap();
    assert_eq!(op.operation, ast::OperationKind::Query);
    assert!(op.shorthand);
    assert!(op.name.is_none());
    assert!(op.variable_definitions.is_empty());
}

#[test]
fn named_operations_of_each_kind() {
    let doc = parse_ok(
        "query Q { a } mutation M { b } subscription S { c }",
    );
    let kinds: Vec<_> = doc
        .operations()
        .map(|op| (op.operation, op.name_str().map(str::to_string)))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ast::OperationKind::Query, Some("Q".to_string())),
            (ast::OperationKind::Mutation, Some("M".to_string())),
            (ast::OperationKind::Subscription, Some("S".to_string())),
        ],
    );
    assert!(doc.operations().all(|op| !op.shorthand));
}

#[test]
fn anonymous_operation_with_keyword() {
    let doc = parse_ok("query { a }");
    let op = doc.operations().next().unwrap();
    assert!(op.name.is_none());
    assert!(!op.shorthand);
}

#[test]
fn variable_definitions_with_defaults_and_directives() {
    let doc = parse_ok(
        "query Q($id: ID!, $limit: Int = 10 @deprecated, $tags: [String!]! = [\"a\"]) { a }",
    );
    let op = doc.operations().next().unwrap();
    let vars = &op.variable_definitions;
    assert_eq!(vars.len(), 3);

    assert_eq!(vars[0].variable.as_str(), "id");
    assert_eq!(vars[0].var_type.to_string(), "ID!");
    assert!(vars[0].default_value.is_none());

    assert_eq!(vars[1].variable.as_str(), "limit");
    assert_eq!(vars[1].var_type.to_string(), "Int");
    assert_eq!(
        vars[1].default_value.as_ref().and_then(ast::Value::as_i64),
        Some(10),
    );
    assert_eq!(vars[1].directives[0].name.as_str(), "deprecated");

    assert_eq!(vars[2].var_type.to_string(), "[String!]!");
    assert!(vars[2].var_type.is_non_null());
    assert_eq!(vars[2].var_type.innermost_name().as_str(), "String");
}

#[test]
fn nested_list_types() {
    let doc = parse_ok("query ($m: [[Int]!]) { a }");
    let ty = &doc.operations().next().unwrap().variable_definitions[0].var_type;
    assert_eq!(ty.to_string(), "[[Int]!]");
    let ast::TypeAnnotation::List(outer) = ty else {
        panic!("expected a list type, got {ty:?}");
    };
    assert_eq!(outer.nullability, ast::Nullability::Nullable);
    assert_eq!(outer.element_type.nullability(), ast::Nullability::NonNull);
}

#[test]
fn fragment_definition() {
    let doc = parse_ok("fragment F on User @skip(if: false) { id }");
    let fragment = doc.fragments().next().unwrap();
    assert_eq!(fragment.name.as_str(), "F");
    assert_eq!(fragment.type_condition.as_str(), "User");
    assert_eq!(fragment.directives.len(), 1);
    assert!(fragment.variable_definitions.is_empty());
}

#[test]
fn fragment_with_variable_definitions() {
    let doc = parse_ok("fragment F($size: Int = 50) on User { avatar(size: $size) }");
    let fragment = doc.fragments().next().unwrap();
    assert_eq!(fragment.variable_definitions.len(), 1);
    assert_eq!(fragment.variable_definitions[0].variable.as_str(), "size");
}

/// Keywords are contextual: they are valid names elsewhere.
#[test]
fn keywords_usable_as_names() {
    let doc = parse_ok(
        "query query { fragment: on { query type null true } } fragment on_ on on { a }",
    );
    assert_eq!(doc.definitions.len(), 2);
    assert_eq!(
        doc.operations().next().unwrap().name_str(),
        Some("query"),
    );
    assert_eq!(doc.fragments().next().unwrap().type_condition.as_str(), "on");
}

#[test]
fn definitions_keep_source_order() {
    let doc = parse_ok("fragment A on T { a } { b } fragment B on T { c }");
    let shapes: Vec<_> = doc
        .definitions
        .iter()
        .map(|def| matches!(def, ast::Definition::Operation(_)))
        .collect();
    assert_eq!(shapes, vec![false, true, false]);
}

#[test]
fn spans_cover_their_nodes() {
    let source = "query Q {\n  hero { name }\n}";
    let doc = parse_ok(source);
    let op = doc.operations().next().unwrap();
    let mut text = String::new();
    op.append_source(&mut text, source);
    assert_eq!(text, source);

    let field = match &op.selection_set.selections[0] {
        ast::Selection::Field(field) => field,
        other => panic!("expected a field, got {other:?}"),
    };
    assert_eq!(field.location(), ast::AstPos { line: 2, column: 3 });
    let mut field_text = String::new();
    field.append_source(&mut field_text, source);
    assert_eq!(field_text, "hero { name }");
}
