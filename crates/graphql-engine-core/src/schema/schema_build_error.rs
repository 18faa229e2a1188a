use graphql_engine_parser::ast::OperationKind;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("Duplicate type definition: `{type_name}`")]
    DuplicateTypeDefinition { type_name: String },

    #[error("Duplicate directive definition: `@{directive_name}`")]
    DuplicateDirectiveDefinition { directive_name: String },

    #[error("Type names beginning with `__` are reserved: `{type_name}`")]
    InvalidDunderPrefixedTypeName { type_name: String },

    #[error("No query root type was specified")]
    NoQueryType,

    #[error("The {operation} root type `{type_name}` is not defined")]
    RootTypeNotDefined {
        operation: OperationKind,
        type_name: String,
    },

    #[error("The {operation} root type `{type_name}` must be an object type")]
    RootTypeNotObject {
        operation: OperationKind,
        type_name: String,
    },

    #[error("`{referenced_from}` refers to undefined type `{undefined_type_name}`")]
    UndefinedTypeName {
        referenced_from: String,
        undefined_type_name: String,
    },

    #[error("`{referenced_from}` must be an input type, but `{type_name}` is not")]
    OutputTypeInInputPosition {
        referenced_from: String,
        type_name: String,
    },

    #[error("`{referenced_from}` must be an output type, but `{type_name}` is an input object")]
    InputTypeInOutputPosition {
        referenced_from: String,
        type_name: String,
    },

    #[error("`{type_name}` defines no fields")]
    NoFields { type_name: String },

    #[error("`{type_name}` implements undefined interface `{interface_name}`")]
    ImplementsUndefinedInterface {
        type_name: String,
        interface_name: String,
    },

    #[error("`{type_name}` implements `{non_interface_type_name}`, which is not an interface")]
    ImplementsNonInterfaceType {
        type_name: String,
        non_interface_type_name: String,
    },

    #[error(
        "`{type_name}` implements `{interface_name}` but does not define its \
         field `{field_name}`"
    )]
    MissingInterfaceSpecifiedField {
        type_name: String,
        interface_name: String,
        field_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` has type `{found}`, which is not a valid \
         implementation of `{interface_name}.{field_name}: {expected}`"
    )]
    InvalidInterfaceFieldType {
        type_name: String,
        interface_name: String,
        field_name: String,
        expected: String,
        found: String,
    },

    #[error(
        "`{type_name}.{field_name}` does not accept argument `{argument_name}` \
         declared by `{interface_name}`"
    )]
    MissingInterfaceSpecifiedArgument {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "`{type_name}` implements `{interface_name}` and so must also implement \
         `{missing_interface_name}`"
    )]
    MissingRecursiveInterfaceImplementation {
        type_name: String,
        interface_name: String,
        missing_interface_name: String,
    },

    #[error("Member `{member_type_name}` of union `{union_type_name}` is not an object type")]
    InvalidUnionMemberTypeKind {
        union_type_name: String,
        member_type_name: String,
    },
}
