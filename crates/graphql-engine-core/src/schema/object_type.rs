use crate::schema::FieldDefinition;
use crate::schema::ObjectOrInterfaceTypeData;
use indexmap::IndexMap;
use std::any::Any;
use std::any::TypeId;

/// An object type: a concrete, field-bearing output type.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub(crate) data: ObjectOrInterfaceTypeData,
    pub(crate) backing_type: Option<TypeId>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data: ObjectOrInterfaceTypeData::new(name.into()),
            backing_type: None,
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.data.add_field(field);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.data.description = Some(description.into());
        self
    }

    pub fn implements(mut self, interface_name: impl Into<String>) -> Self {
        self.data.add_interface(interface_name.into());
        self
    }

    /// Declares the Rust type whose values represent this object, so values
    /// of an abstract type can be matched to it without a type resolver.
    pub fn backed_by<T: Any>(mut self) -> Self {
        self.backing_type = Some(TypeId::of::<T>());
        self
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn description(&self) -> Option<&str> {
        self.data.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.data.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.data.fields.get(name)
    }

    /// Names of the interfaces this type implements, in declaration order.
    pub fn interface_names(&self) -> Vec<&str> {
        self.data.interface_names()
    }

    pub fn implements_interface(&self, interface_name: &str) -> bool {
        self.data.interfaces.iter().any(|name| name == interface_name)
    }

    pub fn backing_type(&self) -> Option<TypeId> {
        self.backing_type
    }
}
