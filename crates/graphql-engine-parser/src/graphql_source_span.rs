use crate::SourcePosition;
use crate::ast::AstPos;

/// A half-open `[start_inclusive, end_exclusive)` range of source text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphQLSourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
}

impl GraphQLSourceSpan {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
        }
    }

    /// A zero-width span located at `pos`.
    pub fn empty_at(pos: SourcePosition) -> Self {
        Self {
            start_inclusive: pos.clone(),
            end_exclusive: pos,
        }
    }

    /// The 1-based position of the first character of this span.
    pub fn start_pos(&self) -> AstPos {
        self.start_inclusive.to_ast_pos()
    }
}
