//! Bounded lookahead over a [`GraphQLTokenSource`].

use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use std::collections::VecDeque;

/// Buffers tokens pulled from a lexer so the parser can `peek()` (or
/// `peek_nth()`) before it `consume()`s.
///
/// Unconsumed tokens sit in a [`VecDeque`]: lookahead pushes at the back,
/// `consume()` pops from the front.
pub struct GraphQLTokenStream<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_source: TTokenSource,
    buffer: VecDeque<GraphQLToken<'src>>,
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>>
    GraphQLTokenStream<'src, TTokenSource>
{
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
        }
    }

    /// Removes and returns the next token. `None` once the lexer is
    /// exhausted (after `Eof` was consumed).
    pub fn consume(&mut self) -> Option<GraphQLToken<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.pop_front()
    }

    #[inline]
    pub fn peek(&mut self) -> Option<&GraphQLToken<'src>> {
        self.peek_nth(0)
    }

    /// `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&mut self, n: usize) -> Option<&GraphQLToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek()
            .is_none_or(|token| matches!(token.kind, GraphQLTokenKind::Eof))
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            match self.token_source.next() {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
    }
}
