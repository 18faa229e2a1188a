use crate::GraphQLSourceSpan;
use crate::ast::ast_node::impl_ast_node;

/// A GraphQL name (`/[_A-Za-z][_0-9A-Za-z]*/`) and where it appeared.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub value: String,
    pub span: GraphQLSourceSpan,
}

impl Name {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl_ast_node!(Name);
