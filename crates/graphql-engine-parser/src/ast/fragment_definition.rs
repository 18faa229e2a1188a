use crate::GraphQLSourceSpan;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::ast::VariableDefinition;
use crate::ast::ast_node::impl_ast_node;

/// `fragment Name($vars) on Type @directives { ... }`
///
/// The variable list is the experimental fragment-variables syntax and is
/// empty for ordinary fragments.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: Name,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

impl_ast_node!(FragmentDefinition);
