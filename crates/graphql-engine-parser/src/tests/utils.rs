//! Shared helpers for parser tests.

use crate::GraphQLParseError;
use crate::GraphQLParser;
use crate::ast;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;

pub fn parse(source: &str) -> Result<ast::Document, GraphQLParseError> {
    GraphQLParser::new(source).parse_executable_document()
}

/// Parses `source`, panicking with the formatted error if it fails.
pub fn parse_ok(source: &str) -> ast::Document {
    match parse(source) {
        Ok(doc) => doc,
        Err(err) => panic!("expected `{source}` to parse, got: {err}"),
    }
}

pub fn parse_err(source: &str) -> GraphQLParseError {
    match parse(source) {
        Ok(doc) => panic!("expected `{source}` to fail, got: {doc:?}"),
        Err(err) => err,
    }
}

/// The first operation's top-level selections.
pub fn first_operation_selections(doc: &ast::Document) -> &[ast::Selection] {
    &doc.operations()
        .next()
        .expect("document has an operation")
        .selection_set
        .selections
}

pub fn first_field(doc: &ast::Document) -> &ast::Field {
    match &first_operation_selections(doc)[0] {
        ast::Selection::Field(field) => field,
        other => panic!("expected a field, got {other:?}"),
    }
}

/// The value of argument `arg` on the first top-level field.
pub fn first_field_argument(source: &str, arg: &str) -> ast::Value {
    let doc = parse_ok(source);
    first_field(&doc)
        .argument(arg)
        .unwrap_or_else(|| panic!("missing argument `{arg}`"))
        .value
        .clone()
}

pub fn token_kinds(source: &str) -> Vec<GraphQLTokenKind<'_>> {
    StrGraphQLTokenSource::new(source)
        .map(|token| token.kind)
        .collect()
}
