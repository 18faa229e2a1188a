use crate::token::GraphQLToken;

/// Marker trait for lexers: any iterator of [`GraphQLToken`]s.
///
/// A lexer skips ignored tokens (whitespace, commas, byte-order marks and
/// comments), reports malformed lexemes as
/// [`GraphQLTokenKind::Error`](crate::token::GraphQLTokenKind::Error)
/// tokens and finishes with exactly one
/// [`GraphQLTokenKind::Eof`](crate::token::GraphQLTokenKind::Eof).
/// Lookahead is the job of [`GraphQLTokenStream`](crate::GraphQLTokenStream).
pub trait GraphQLTokenSource<'src>: Iterator<Item = GraphQLToken<'src>> {}

impl<'src, T> GraphQLTokenSource<'src> for T where
    T: Iterator<Item = GraphQLToken<'src>>
{
}
