use crate::GraphQLSourceSpan;
use crate::ast::AstPos;

/// Implemented by every AST node.
///
/// Node types implement this with `#[inherent]`, so the methods are also
/// callable without importing the trait.
pub trait AstNode {
    fn span(&self) -> &GraphQLSourceSpan;

    /// 1-based position of the node's first character.
    fn location(&self) -> AstPos;

    /// Appends the exact source text this node was parsed from.
    fn append_source(&self, sink: &mut String, source: &str);
}

pub(crate) fn append_span_source_slice(
    span: &GraphQLSourceSpan,
    sink: &mut String,
    source: &str,
) {
    let start = span.start_inclusive.byte_offset();
    let end = span.end_exclusive.byte_offset().min(source.len());
    if start <= end {
        sink.push_str(&source[start..end]);
    }
}

/// Implements [`AstNode`] for node types that keep their span in a `span`
/// field.
macro_rules! impl_ast_node {
    ($($node:ty),+ $(,)?) => {
        $(
            #[inherent::inherent]
            impl $crate::ast::AstNode for $node {
                pub fn span(&self) -> &$crate::GraphQLSourceSpan {
                    &self.span
                }

                pub fn location(&self) -> $crate::ast::AstPos {
                    self.span.start_pos()
                }

                pub fn append_source(&self, sink: &mut String, source: &str) {
                    $crate::ast::ast_node::append_span_source_slice(
                        &self.span, sink, source,
                    )
                }
            }
        )+
    };
}

pub(crate) use impl_ast_node;
