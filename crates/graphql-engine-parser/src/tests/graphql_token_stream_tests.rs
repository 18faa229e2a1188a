//! Tests for `GraphQLTokenStream` lookahead.

use crate::GraphQLTokenStream;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;
use std::borrow::Cow;

fn stream(source: &str) -> GraphQLTokenStream<'_, StrGraphQLTokenSource<'_>> {
    GraphQLTokenStream::new(StrGraphQLTokenSource::new(source))
}

#[test]
fn peek_does_not_consume() {
    let mut tokens = stream("a b");
    assert_eq!(
        tokens.peek().map(|token| token.kind.clone()),
        Some(GraphQLTokenKind::Name(Cow::Borrowed("a"))),
    );
    assert_eq!(
        tokens.consume().map(|token| token.kind),
        Some(GraphQLTokenKind::Name(Cow::Borrowed("a"))),
    );
}

#[test]
fn peek_nth_looks_ahead_without_consuming() {
    let mut tokens = stream("a b c");
    assert_eq!(
        tokens.peek_nth(2).map(|token| token.kind.clone()),
        Some(GraphQLTokenKind::Name(Cow::Borrowed("c"))),
    );
    assert_eq!(
        tokens.consume().map(|token| token.kind),
        Some(GraphQLTokenKind::Name(Cow::Borrowed("a"))),
    );
    assert!(tokens.peek_nth(10).is_none());
}

#[test]
fn is_at_end_on_eof_and_after() {
    let mut tokens = stream("a");
    assert!(!tokens.is_at_end());
    tokens.consume();
    assert!(tokens.is_at_end());
    assert_eq!(tokens.consume().map(|token| token.kind), Some(GraphQLTokenKind::Eof));
    assert!(tokens.is_at_end());
    assert!(tokens.consume().is_none());
}
