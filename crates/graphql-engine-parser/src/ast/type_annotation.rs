use crate::GraphQLSourceSpan;
use crate::ast::AstPos;
use crate::ast::Name;
use crate::ast::ast_node::impl_ast_node;

/// Whether a type reference ends in `!`.
///
/// Nullability is a property of each annotation node rather than a wrapper
/// variant, so `T!!` cannot be represented. `[String!]!` is a non-null
/// list whose element annotation is itself non-null.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nullability {
    NonNull,
    Nullable,
}

/// A type reference: `Name`, `[Type]`, either optionally followed by `!`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    Named(NamedTypeAnnotation),
    List(ListTypeAnnotation),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub name: Name,
    pub nullability: Nullability,
    pub span: GraphQLSourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub element_type: Box<TypeAnnotation>,
    pub nullability: Nullability,
    pub span: GraphQLSourceSpan,
}

impl TypeAnnotation {
    pub fn nullability(&self) -> Nullability {
        match self {
            TypeAnnotation::Named(named) => named.nullability,
            TypeAnnotation::List(list) => list.nullability,
        }
    }

    pub fn is_non_null(&self) -> bool {
        self.nullability() == Nullability::NonNull
    }

    /// The name at the bottom of any list wrapping.
    pub fn innermost_name(&self) -> &Name {
        match self {
            TypeAnnotation::Named(named) => &named.name,
            TypeAnnotation::List(list) => list.element_type.innermost_name(),
        }
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        match self {
            TypeAnnotation::Named(named) => &named.span,
            TypeAnnotation::List(list) => &list.span,
        }
    }

    /// 1-based position of the annotation's first character.
    pub fn location(&self) -> AstPos {
        self.span().start_pos()
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(named) => write!(f, "{}", named.name)?,
            TypeAnnotation::List(list) => write!(f, "[{}]", list.element_type)?,
        }
        if self.is_non_null() {
            f.write_str("!")?;
        }
        Ok(())
    }
}

impl_ast_node!(NamedTypeAnnotation, ListTypeAnnotation);
