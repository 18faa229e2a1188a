use crate::resolver::Arguments;
use crate::resolver::FieldError;
use crate::resolver::FieldValue;
use crate::resolver::ResolveContext;
use crate::resolver::Resolver;
use crate::schema::InputValueDefinition;
use crate::schema::TypeRef;
use indexmap::IndexMap;
use std::sync::Arc;

/// A field of an object or interface type.
///
/// Fields without a resolver read the same-named key from a parent value
/// that is an ordered map.
#[derive(Clone)]
pub struct FieldDefinition {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) ty: TypeRef,
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) resolver: Option<Resolver>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            arguments: IndexMap::new(),
            resolver: None,
        }
    }

    pub fn with_argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn resolve<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&ResolveContext<'_>, &FieldValue, &Arguments) -> Result<FieldValue, FieldError>
            + Send
            + Sync
            + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.get(name)
    }

    pub fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }
}

impl std::fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("arguments", &self.arguments)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}
