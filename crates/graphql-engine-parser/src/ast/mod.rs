//! An owned AST for executable GraphQL documents.
//!
//! Every node carries the [`GraphQLSourceSpan`](crate::GraphQLSourceSpan)
//! it was parsed from. The tree is never mutated after parsing: later passes
//! (validation, selection-set resolution) build their own side tables.

mod ast_node;
mod directive_annotation;
mod document;
mod fragment_definition;
mod name;
mod operation_definition;
mod selection;
mod type_annotation;
mod value;
mod variable_definition;

pub use ast_node::AstNode;
pub use directive_annotation::Argument;
pub use directive_annotation::DirectiveAnnotation;
pub use document::Definition;
pub use document::Document;
pub use fragment_definition::FragmentDefinition;
pub use name::Name;
pub use operation_definition::OperationDefinition;
pub use operation_definition::OperationKind;
pub use selection::Field;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub use selection::SelectionSet;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::Nullability;
pub use type_annotation::TypeAnnotation;
pub use value::ObjectField;
pub use value::Value;
pub use variable_definition::VariableDefinition;

/// A 1-based `{line, column}` location, as reported in GraphQL error
/// `locations`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct AstPos {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for AstPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
