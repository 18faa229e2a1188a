use crate::GraphQLSourceSpan;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::ast::VariableDefinition;
use crate::ast::ast_node::impl_ast_node;

/// `query`, `mutation` or `subscription`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub operation: OperationKind,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    /// `true` for the `{ ... }` query shorthand.
    pub shorthand: bool,
    pub span: GraphQLSourceSpan,
}

impl OperationDefinition {
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().map(|name| name.as_str())
    }
}

impl_ast_node!(OperationDefinition);
