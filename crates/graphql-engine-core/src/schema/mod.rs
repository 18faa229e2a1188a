//! The type graph: named types, their fields and resolvers, directives and
//! root operation types.

mod directive_definition;
mod enum_type;
mod field_definition;
mod graphql_type;
mod input_object_type;
mod input_value_definition;
mod interface_type;
mod object_or_interface_type_data;
mod object_type;
mod scalar_type;
#[allow(clippy::module_inception)]
mod schema;
mod schema_build_error;
mod schema_builder;
mod type_ref;
mod type_validators;
mod union_type;

pub use directive_definition::DirectiveDefinition;
pub use directive_definition::DirectiveLocation;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field_definition::FieldDefinition;
pub use graphql_type::GraphQLType;
pub use graphql_type::GraphQLTypeKind;
pub use input_object_type::InputObjectType;
pub use input_value_definition::InputValueDefinition;
pub use interface_type::InterfaceType;
pub(crate) use object_or_interface_type_data::ObjectOrInterfaceTypeData;
pub use object_type::ObjectType;
pub use scalar_type::ScalarKind;
pub use scalar_type::ScalarParser;
pub use scalar_type::ScalarSerializer;
pub use scalar_type::ScalarType;
pub use schema::Schema;
pub use schema_build_error::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_ref::TypeRef;
use type_validators::InputObjectTypeValidator;
use type_validators::ObjectOrInterfaceTypeValidator;
use type_validators::UnionTypeValidator;
pub use union_type::UnionType;
