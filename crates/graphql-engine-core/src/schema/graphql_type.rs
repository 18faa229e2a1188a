use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::UnionType;
use indexmap::IndexMap;

/// A named type in the schema. `List` and `NonNull` are wrappers expressed
/// by [`TypeRef`](crate::schema::TypeRef), never by this enum.
#[derive(Clone, Debug)]
pub enum GraphQLType {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    InputObject(InputObjectType),
}

impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Scalar(t) => t.name(),
            GraphQLType::Enum(t) => t.name(),
            GraphQLType::Object(t) => t.name(),
            GraphQLType::Interface(t) => t.name(),
            GraphQLType::Union(t) => t.name(),
            GraphQLType::InputObject(t) => t.name(),
        }
    }

    pub fn kind(&self) -> GraphQLTypeKind {
        self.into()
    }

    /// Object, interface or union: types a selection set applies to.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_),
        )
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    /// Scalar or enum.
    pub fn is_leaf(&self) -> bool {
        matches!(self, GraphQLType::Scalar(_) | GraphQLType::Enum(_))
    }

    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            GraphQLType::Scalar(_) | GraphQLType::Enum(_) | GraphQLType::InputObject(_),
        )
    }

    pub fn is_output_type(&self) -> bool {
        !matches!(self, GraphQLType::InputObject(_))
    }

    /// The fields of an object or interface type.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            GraphQLType::Object(t) => Some(t.fields()),
            GraphQLType::Interface(t) => Some(t.fields()),
            GraphQLType::Scalar(_)
            | GraphQLType::Enum(_)
            | GraphQLType::Union(_)
            | GraphQLType::InputObject(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            GraphQLType::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            GraphQLType::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            GraphQLType::Union(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            GraphQLType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            GraphQLType::Scalar(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            GraphQLType::InputObject(t) => Some(t),
            _ => None,
        }
    }
}

impl From<ScalarType> for GraphQLType {
    fn from(value: ScalarType) -> Self {
        GraphQLType::Scalar(value)
    }
}

impl From<EnumType> for GraphQLType {
    fn from(value: EnumType) -> Self {
        GraphQLType::Enum(value)
    }
}

impl From<ObjectType> for GraphQLType {
    fn from(value: ObjectType) -> Self {
        GraphQLType::Object(value)
    }
}

impl From<InterfaceType> for GraphQLType {
    fn from(value: InterfaceType) -> Self {
        GraphQLType::Interface(value)
    }
}

impl From<UnionType> for GraphQLType {
    fn from(value: UnionType) -> Self {
        GraphQLType::Union(value)
    }
}

impl From<InputObjectType> for GraphQLType {
    fn from(value: InputObjectType) -> Self {
        GraphQLType::InputObject(value)
    }
}

/// Similar to [`GraphQLType`] except without the corresponding type
/// metadata.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphQLTypeKind {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
    InputObject,
}

impl GraphQLTypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Object => "object",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::InputObject => "input object",
        }
    }
}

impl From<&GraphQLType> for GraphQLTypeKind {
    fn from(value: &GraphQLType) -> Self {
        match value {
            GraphQLType::Scalar(_) => GraphQLTypeKind::Scalar,
            GraphQLType::Enum(_) => GraphQLTypeKind::Enum,
            GraphQLType::Object(_) => GraphQLTypeKind::Object,
            GraphQLType::Interface(_) => GraphQLTypeKind::Interface,
            GraphQLType::Union(_) => GraphQLTypeKind::Union,
            GraphQLType::InputObject(_) => GraphQLTypeKind::InputObject,
        }
    }
}
