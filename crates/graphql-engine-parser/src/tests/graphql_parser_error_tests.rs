//! Tests for syntax faults: each must abort the parse with a located
//! error of the right kind.

use crate::GraphQLErrorNoteKind;
use crate::GraphQLParseErrorKind;
use crate::InvalidValueReason;
use crate::ast::AstPos;
use crate::tests::utils::parse_err;
use crate::tests::utils::parse_ok;

#[test]
fn empty_document() {
    let err = parse_err("   # just a comment\n");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { construct } if construct == "document"
    ));
}

#[test]
fn unclosed_selection_set_points_at_opening_brace() {
    let err = parse_err("{\n  hero {\n    name\n");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::UnclosedDelimiter { delimiter } if delimiter == "{"
    ));
    let note = &err.notes()[0];
    assert_eq!(note.kind, GraphQLErrorNoteKind::General);
    assert_eq!(
        note.span.as_ref().map(|span| span.start_pos()),
        Some(AstPos { line: 2, column: 8 }),
    );
}

#[test]
fn unexpected_token_reports_expected_and_found() {
    let err = parse_err("{ a(b 1) }");
    assert_eq!(err.message(), "expected `:`, found `1`");
    assert_eq!(err.location(), AstPos { line: 1, column: 7 });
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::UnexpectedToken { expected, found }
            if expected == &vec![":".to_string()] && found == "`1`"
    ));
}

#[test]
fn type_system_definition_is_rejected() {
    let err = parse_err("type Query { a: Int }");
    assert!(matches!(err.kind(), GraphQLParseErrorKind::UnexpectedToken { .. }));
    assert!(
        err.notes()
            .iter()
            .any(|note| note.message.contains("type system definitions"))
    );
}

#[test]
fn unknown_operation_keyword_is_rejected() {
    let err = parse_err("queryy { a }");
    assert!(matches!(err.kind(), GraphQLParseErrorKind::UnexpectedToken { .. }));
    assert_eq!(err.location(), AstPos { line: 1, column: 1 });
}

#[test]
fn empty_selection_set_is_rejected() {
    let err = parse_err("{ a {} }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { construct } if construct == "selection set"
    ));
}

#[test]
fn empty_argument_list_is_rejected() {
    let err = parse_err("{ a() }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { construct } if construct == "argument list"
    ));
}

#[test]
fn empty_variable_definitions_are_rejected() {
    let err = parse_err("query Q() { a }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidEmptyConstruct { .. }
    ));
}

#[test]
fn fragment_named_on_is_reserved() {
    let err = parse_err("fragment on on User { a }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::ReservedName { name } if name == "on"
    ));
}

#[test]
fn fragment_requires_type_condition() {
    let err = parse_err("fragment F { a }");
    assert_eq!(err.message(), "expected `on`, found `{`");
}

#[test]
fn variable_in_default_value_is_rejected() {
    let err = parse_err("query ($a: Int = $b) { f }");
    assert_eq!(err.kind(), &GraphQLParseErrorKind::InvalidSyntax);
    assert_eq!(err.location(), AstPos { line: 1, column: 18 });
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    let err = parse_err("{ a(n: 01) }");
    assert_eq!(err.kind(), &GraphQLParseErrorKind::LexerError);
    assert!(err.message().contains("leading zeros"));
    assert!(
        err.notes()
            .iter()
            .any(|note| note.kind == GraphQLErrorNoteKind::Spec)
    );
}

#[test]
fn infinite_float_is_rejected() {
    let err = parse_err("{ a(n: 1e400) }");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidValue(InvalidValueReason::FloatNotFinite(_))
    ));
}

#[test]
fn bad_string_escape_is_rejected() {
    let err = parse_err(r#"{ a(s: "\x") }"#);
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::InvalidValue(InvalidValueReason::String(_))
    ));
}

#[test]
fn unexpected_end_of_input() {
    let err = parse_err("query Q");
    assert!(matches!(err.kind(), GraphQLParseErrorKind::UnexpectedEof { .. }));
    assert_eq!(err.message(), "expected `{`, found end of input");
}

/// `{ a { a ... x } }` with `depth` selection sets.
fn nested_selections(depth: usize) -> String {
    format!("{}x{}", "{ a ".repeat(depth), " }".repeat(depth))
}

/// Runs `parse_nested` on a thread with the 2 MiB stack that test, rayon
/// and tokio worker threads get by default.
fn on_small_stack<T: Send + 'static>(parse_nested: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(parse_nested)
        .expect("thread spawns")
        .join()
        .expect("parse does not overflow the stack")
}

#[test]
fn recursion_limit_on_selection_sets() {
    let err = on_small_stack(|| parse_err(&nested_selections(100)));
    assert_eq!(err.kind(), &GraphQLParseErrorKind::RecursionLimitExceeded);
}

/// Nesting just under the limit parses without exhausting a small stack.
#[test]
fn nesting_within_limit_fits_small_stack() {
    let doc = on_small_stack(|| parse_ok(&nested_selections(63)));
    assert_eq!(doc.operations().count(), 1);

    let within = on_small_stack(|| {
        let source = format!("{{ f(a: {}1{}) }}", "[".repeat(62), "]".repeat(62));
        parse_ok(&source)
    });
    assert_eq!(within.operations().count(), 1);
}

#[test]
fn recursion_limit_on_list_values() {
    let depth = 200;
    let source = format!("{{ f(a: {}1{}) }}", "[".repeat(depth), "]".repeat(depth));
    let err = parse_err(&source);
    assert_eq!(err.kind(), &GraphQLParseErrorKind::RecursionLimitExceeded);
}

#[test]
fn missing_closing_paren_in_arguments() {
    let err = parse_err("{ a(b: 1");
    assert!(matches!(
        err.kind(),
        GraphQLParseErrorKind::UnclosedDelimiter { delimiter } if delimiter == "("
    ));
}
