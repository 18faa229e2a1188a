use crate::GraphQLSourceSpan;
use crate::ast::AstPos;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::ast_node::impl_ast_node;

/// A parsed executable document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub span: GraphQLSourceSpan,
}

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            Definition::Operation(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

impl Definition {
    pub fn location(&self) -> AstPos {
        match self {
            Definition::Operation(op) => op.location(),
            Definition::Fragment(frag) => frag.location(),
        }
    }
}

impl_ast_node!(Document);
