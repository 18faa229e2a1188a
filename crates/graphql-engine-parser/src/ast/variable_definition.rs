use crate::GraphQLSourceSpan;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::ast::ast_node::impl_ast_node;

/// `$name: Type = default @directives`. `variable` holds the name without
/// the `$`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub variable: Name,
    pub var_type: TypeAnnotation,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: GraphQLSourceSpan,
}

impl_ast_node!(VariableDefinition);
