use crate::GraphQLSourceSpan;
use crate::ast::Name;
use crate::ast::Value;
use crate::ast::ast_node::impl_ast_node;

/// `@name(arg: value, ...)` applied to a selection, fragment, operation or
/// variable definition.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub span: GraphQLSourceSpan,
}

impl DirectiveAnnotation {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name.value == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
    pub span: GraphQLSourceSpan,
}

impl_ast_node!(DirectiveAnnotation, Argument);
