use crate::resolver::FieldValue;
use crate::resolver::TypeResolver;
use crate::schema::FieldDefinition;
use crate::schema::ObjectOrInterfaceTypeData;
use indexmap::IndexMap;
use std::sync::Arc;

/// An interface type. Its possible types are the object types that
/// declare they implement it.
#[derive(Clone)]
pub struct InterfaceType {
    pub(crate) data: ObjectOrInterfaceTypeData,
    pub(crate) type_resolver: Option<TypeResolver>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data: ObjectOrInterfaceTypeData::new(name.into()),
            type_resolver: None,
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

    /// Sets the callback that names the concrete object type of a value.
    pub fn resolve_type<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.type_resolver = Some(Arc::new(resolver));
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

    pub fn interface_names(&self) -> Vec<&str> {
        self.data.interface_names()
    }

    pub fn type_resolver(&self) -> Option<&TypeResolver> {
        self.type_resolver.as_ref()
    }
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType")
            .field("data", &self.data)
            .field("has_type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}
