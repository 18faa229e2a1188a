use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::GraphQLType;
use crate::schema::ObjectType;
use crate::schema::SchemaBuilder;
use crate::schema::TypeRef;
use graphql_engine_parser::ast::OperationKind;
use indexmap::IndexMap;

/// The type graph requests are validated and executed against.
///
/// Built once with a [`SchemaBuilder`] and then shared read-only (it is
/// `Send + Sync`) across any number of concurrent requests.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) types: IndexMap<String, GraphQLType>,
    pub(crate) directives: IndexMap<String, DirectiveDefinition>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
    pub(crate) subscription_type: Option<String>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.types.values()
    }

    pub fn get_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name).and_then(GraphQLType::as_object)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.directives.values()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    pub fn query_type_name(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(self.query_type.as_str()),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// The root object type for `kind`, if the schema defines one.
    pub fn root_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        self.root_type_name(kind).and_then(|name| self.object_type(name))
    }

    /// Looks up a field on an object or interface type. `__typename` is
    /// implicitly defined on every composite type and is not returned here.
    pub fn field_definition(&self, type_name: &str, field_name: &str) -> Option<&FieldDefinition> {
        self.types.get(type_name)?.fields()?.get(field_name)
    }

    /// The object types a value of `type_name` may be at runtime, in
    /// schema registration order.
    pub fn possible_types(&self, type_name: &str) -> Vec<&ObjectType> {
        match self.types.get(type_name) {
            Some(GraphQLType::Object(object)) => vec![object],
            Some(GraphQLType::Interface(iface)) => self
                .types
                .values()
                .filter_map(GraphQLType::as_object)
                .filter(|object| object.implements_interface(iface.name()))
                .collect(),
            Some(GraphQLType::Union(union_)) => union_
                .members
                .iter()
                .filter_map(|member| self.object_type(member))
                .collect(),
            _ => vec![],
        }
    }

    pub fn is_possible_type(&self, abstract_type: &str, object_type: &str) -> bool {
        self.possible_types(abstract_type)
            .iter()
            .any(|object| object.name() == object_type)
    }

    /// Whether `sub` is `sup` itself, a member of union `sup`, or a type
    /// that implements interface `sup`.
    pub fn is_sub_type(&self, sup: &str, sub: &str) -> bool {
        if sup == sub {
            return true;
        }
        match self.types.get(sup) {
            Some(GraphQLType::Union(union_)) => union_.has_member(sub),
            Some(GraphQLType::Interface(_)) => match self.types.get(sub) {
                Some(GraphQLType::Object(object)) => object.implements_interface(sup),
                Some(GraphQLType::Interface(iface)) => {
                    iface.data.interfaces.iter().any(|name| name == sup)
                },
                _ => false,
            },
            _ => false,
        }
    }

    /// Covariant subtyping over wrapped types: `sub` may be used where
    /// `sup` is declared as an output type.
    pub fn is_type_sub_type_of(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        match (sub, sup) {
            (TypeRef::NonNull(sub_inner), TypeRef::NonNull(sup_inner)) => {
                self.is_type_sub_type_of(sub_inner, sup_inner)
            },
            (_, TypeRef::NonNull(_)) => false,
            (TypeRef::NonNull(sub_inner), _) => self.is_type_sub_type_of(sub_inner, sup),
            (TypeRef::List(sub_item), TypeRef::List(sup_item)) => {
                self.is_type_sub_type_of(sub_item, sup_item)
            },
            (TypeRef::List(_), _) | (_, TypeRef::List(_)) => false,
            (TypeRef::Named(sub_name), TypeRef::Named(sup_name)) => {
                self.is_sub_type(sup_name, sub_name)
            },
        }
    }

    /// Whether some object type is a possible type of both `a` and `b`.
    pub fn types_overlap(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        let b_types = self.possible_types(b);
        self.possible_types(a)
            .iter()
            .any(|object| b_types.iter().any(|other| other.name() == object.name()))
    }
}
