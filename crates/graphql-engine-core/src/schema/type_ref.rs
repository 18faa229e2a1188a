use graphql_engine_parser::ast;

/// A reference to a type in the schema, possibly wrapped in `List` and
/// `NonNull`.
///
/// Named types are referenced by name and looked up in the [`Schema`]
/// on use, which keeps the (possibly cyclic) type graph free of
/// self-references.
///
/// [`Schema`]: crate::schema::Schema
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// `name!`
    pub fn named_non_null(name: impl Into<String>) -> Self {
        TypeRef::NonNull(Box::new(TypeRef::Named(name.into())))
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Wraps `inner` in `NonNull` unless it already is.
    pub fn non_null(inner: TypeRef) -> Self {
        match inner {
            TypeRef::NonNull(_) => inner,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// The type with any outer `NonNull` removed.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner,
            other => other,
        }
    }

    /// The name at the bottom of all wrapping.
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.innermost_name(),
        }
    }

    /// `List` element type, looking through an outer `NonNull`.
    pub fn list_item(&self) -> Option<&TypeRef> {
        match self.nullable() {
            TypeRef::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Converts a parsed type annotation (from a variable definition).
    pub fn from_ast(annotation: &ast::TypeAnnotation) -> Self {
        let base = match annotation {
            ast::TypeAnnotation::Named(named) => TypeRef::Named(named.name.value.clone()),
            ast::TypeAnnotation::List(list) => TypeRef::list(Self::from_ast(&list.element_type)),
        };
        if annotation.is_non_null() {
            TypeRef::NonNull(Box::new(base))
        } else {
            base
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
