use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::GraphQLType;
use crate::schema::InputObjectType;
use crate::schema::InputValueDefinition;
use crate::schema::ObjectOrInterfaceTypeData;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::TypeRef;
use crate::schema::UnionType;

/// Checks that `ty` names a defined type usable in an input position.
fn check_input_type_ref(
    schema: &Schema,
    ty: &TypeRef,
    referenced_from: String,
    errors: &mut Vec<SchemaBuildError>,
) {
    let type_name = ty.innermost_name();
    match schema.get_type(type_name) {
        None => errors.push(SchemaBuildError::UndefinedTypeName {
            referenced_from,
            undefined_type_name: type_name.to_string(),
        }),
        Some(named) if !named.is_input_type() => {
            errors.push(SchemaBuildError::OutputTypeInInputPosition {
                referenced_from,
                type_name: type_name.to_string(),
            })
        },
        Some(_) => (),
    }
}

fn check_arguments<'a>(
    schema: &Schema,
    owner: &str,
    arguments: impl Iterator<Item = &'a InputValueDefinition>,
    errors: &mut Vec<SchemaBuildError>,
) {
    for argument in arguments {
        check_input_type_ref(
            schema,
            &argument.ty,
            format!("{owner}({}:)", argument.name),
            errors,
        );
    }
}

pub(super) struct ObjectOrInterfaceTypeValidator<'a> {
    errors: Vec<SchemaBuildError>,
    schema: &'a Schema,
    type_: &'a ObjectOrInterfaceTypeData,
}

impl<'a> ObjectOrInterfaceTypeValidator<'a> {
    pub fn new(type_: &'a ObjectOrInterfaceTypeData, schema: &'a Schema) -> Self {
        Self {
            errors: vec![],
            schema,
            type_,
        }
    }

    pub fn validate(mut self) -> Vec<SchemaBuildError> {
        let type_name = self.type_.name.as_str();
        if self.type_.fields.is_empty() {
            self.errors.push(SchemaBuildError::NoFields {
                type_name: type_name.to_string(),
            });
        }

        for field in self.type_.fields.values() {
            self.validate_field(field);
        }

        for iface_name in &self.type_.interfaces {
            // Verify that this implemented interface name is actually a
            // defined interface type.
            let iface = match self.schema.get_type(iface_name) {
                Some(GraphQLType::Interface(iface)) => iface,
                Some(other) => {
                    self.errors.push(SchemaBuildError::ImplementsNonInterfaceType {
                        type_name: type_name.to_string(),
                        non_interface_type_name: other.name().to_string(),
                    });
                    continue;
                },
                None => {
                    self.errors.push(SchemaBuildError::ImplementsUndefinedInterface {
                        type_name: type_name.to_string(),
                        interface_name: iface_name.to_string(),
                    });
                    continue;
                },
            };

            // Interfaces implemented by the interface must be declared here
            // too.
            for transitive in &iface.data.interfaces {
                if !self.type_.interfaces.contains(transitive) {
                    self.errors.push(
                        SchemaBuildError::MissingRecursiveInterfaceImplementation {
                            type_name: type_name.to_string(),
                            interface_name: iface_name.to_string(),
                            missing_interface_name: transitive.to_string(),
                        },
                    );
                }
            }

            for (field_name, iface_field) in iface.fields() {
                let Some(type_field) = self.type_.fields.get(field_name) else {
                    self.errors.push(SchemaBuildError::MissingInterfaceSpecifiedField {
                        type_name: type_name.to_string(),
                        interface_name: iface_name.to_string(),
                        field_name: field_name.to_string(),
                    });
                    continue;
                };

                if !self.schema.is_type_sub_type_of(&type_field.ty, &iface_field.ty) {
                    self.errors.push(SchemaBuildError::InvalidInterfaceFieldType {
                        type_name: type_name.to_string(),
                        interface_name: iface_name.to_string(),
                        field_name: field_name.to_string(),
                        expected: iface_field.ty.to_string(),
                        found: type_field.ty.to_string(),
                    });
                }

                for argument_name in iface_field.arguments.keys() {
                    if !type_field.arguments.contains_key(argument_name) {
                        self.errors.push(
                            SchemaBuildError::MissingInterfaceSpecifiedArgument {
                                type_name: type_name.to_string(),
                                interface_name: iface_name.to_string(),
                                field_name: field_name.to_string(),
                                argument_name: argument_name.to_string(),
                            },
                        );
                    }
                }
            }
        }

        self.errors
    }

    fn validate_field(&mut self, field: &FieldDefinition) {
        let owner = format!("{}.{}", self.type_.name, field.name);
        let field_type_name = field.ty.innermost_name();
        match self.schema.get_type(field_type_name) {
            None => self.errors.push(SchemaBuildError::UndefinedTypeName {
                referenced_from: owner.clone(),
                undefined_type_name: field_type_name.to_string(),
            }),
            Some(named) if !named.is_output_type() => {
                self.errors.push(SchemaBuildError::InputTypeInOutputPosition {
                    referenced_from: owner.clone(),
                    type_name: field_type_name.to_string(),
                })
            },
            Some(_) => (),
        }
        check_arguments(self.schema, &owner, field.arguments.values(), &mut self.errors);
    }
}

pub(super) struct UnionTypeValidator<'a> {
    errors: Vec<SchemaBuildError>,
    schema: &'a Schema,
    type_: &'a UnionType,
}

impl<'a> UnionTypeValidator<'a> {
    pub fn new(type_: &'a UnionType, schema: &'a Schema) -> Self {
        Self {
            errors: vec![],
            schema,
            type_,
        }
    }

    pub fn validate(mut self) -> Vec<SchemaBuildError> {
        for member_type_name in &self.type_.members {
            // Member types of a union type can only be object types.
            match self.schema.get_type(member_type_name) {
                None => self.errors.push(SchemaBuildError::UndefinedTypeName {
                    referenced_from: self.type_.name.to_string(),
                    undefined_type_name: member_type_name.to_string(),
                }),
                Some(GraphQLType::Object(_)) => (),
                Some(_) => self.errors.push(SchemaBuildError::InvalidUnionMemberTypeKind {
                    union_type_name: self.type_.name.to_string(),
                    member_type_name: member_type_name.to_string(),
                }),
            }
        }
        self.errors
    }
}

pub(super) struct InputObjectTypeValidator<'a> {
    errors: Vec<SchemaBuildError>,
    schema: &'a Schema,
    type_: &'a InputObjectType,
}

impl<'a> InputObjectTypeValidator<'a> {
    pub fn new(type_: &'a InputObjectType, schema: &'a Schema) -> Self {
        Self {
            errors: vec![],
            schema,
            type_,
        }
    }

    pub fn validate(mut self) -> Vec<SchemaBuildError> {
        if self.type_.fields.is_empty() {
            self.errors.push(SchemaBuildError::NoFields {
                type_name: self.type_.name.to_string(),
            });
        }
        for field in self.type_.fields.values() {
            check_input_type_ref(
                self.schema,
                &field.ty,
                format!("{}.{}", self.type_.name, field.name),
                &mut self.errors,
            );
        }
        self.errors
    }
}

pub(super) fn validate_directive(
    directive: &DirectiveDefinition,
    schema: &Schema,
) -> Vec<SchemaBuildError> {
    let mut errors = vec![];
    check_arguments(
        schema,
        &format!("@{}", directive.name),
        directive.arguments.values(),
        &mut errors,
    );
    errors
}
