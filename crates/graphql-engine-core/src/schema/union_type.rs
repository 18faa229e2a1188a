use crate::resolver::FieldValue;
use crate::resolver::TypeResolver;
use std::sync::Arc;

/// A union of object types.
#[derive(Clone)]
pub struct UnionType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) members: Vec<String>,
    pub(crate) type_resolver: Option<TypeResolver>,
}

impl UnionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: vec![],
            type_resolver: None,
        }
    }

    pub fn with_member(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        if !self.members.contains(&type_name) {
            self.members.push(type_name);
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Member type names, in declaration order.
    pub fn member_type_names(&self) -> Vec<&str> {
        self.members.iter().map(String::as_str).collect()
    }

    pub fn has_member(&self, type_name: &str) -> bool {
        self.members.iter().any(|member| member == type_name)
    }

    pub fn type_resolver(&self) -> Option<&TypeResolver> {
        self.type_resolver.as_ref()
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("has_type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}
