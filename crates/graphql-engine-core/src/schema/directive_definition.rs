use crate::resolver::Arguments;
use crate::resolver::DirectiveWrapper;
use crate::resolver::FieldError;
use crate::resolver::FieldValue;
use crate::resolver::ResolveContext;
use crate::schema::InputValueDefinition;
use crate::schema::TypeRef;
use graphql_engine_parser::ast::OperationKind;
use indexmap::IndexMap;
use std::sync::Arc;

/// Where in an executable document a directive may appear.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
}

impl DirectiveLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }
}

impl From<OperationKind> for DirectiveLocation {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Query => DirectiveLocation::Query,
            OperationKind::Mutation => DirectiveLocation::Mutation,
            OperationKind::Subscription => DirectiveLocation::Subscription,
        }
    }
}

impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive the schema accepts in executable documents.
///
/// A directive with a wrapper takes part in field execution: the wrapper
/// runs around the field's resolver and may short-circuit it.
#[derive(Clone)]
pub struct DirectiveDefinition {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) locations: Vec<DirectiveLocation>,
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) wrapper: Option<DirectiveWrapper>,
}

impl DirectiveDefinition {
    pub fn new(
        name: impl Into<String>,
        locations: impl IntoIterator<Item = DirectiveLocation>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.into_iter().collect(),
            arguments: IndexMap::new(),
            wrapper: None,
        }
    }

    /// `@skip(if: Boolean!)`
    pub fn skip() -> Self {
        Self::conditional(
            "skip",
            "Directs the executor to skip this field or fragment when the `if` \
             argument is true.",
        )
    }

    /// `@include(if: Boolean!)`
    pub fn include() -> Self {
        Self::conditional(
            "include",
            "Directs the executor to include this field or fragment only when \
             the `if` argument is true.",
        )
    }

    fn conditional(name: &str, description: &str) -> Self {
        Self::new(
            name,
            [
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
        )
        .with_description(description)
        .with_argument(InputValueDefinition::new("if", TypeRef::named_non_null("Boolean")))
    }

    pub fn with_argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.insert(argument.name.clone(), argument);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function that wraps resolution of fields this directive is
    /// applied to.
    pub fn wrap<F>(mut self, wrapper: F) -> Self
    where
        F: Fn(
                &Arguments,
                &ResolveContext<'_>,
                &dyn Fn() -> Result<FieldValue, FieldError>,
            ) -> Result<FieldValue, FieldError>
            + Send
            + Sync
            + 'static,
    {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        &self.locations
    }

    pub fn is_valid_at(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn wrapper(&self) -> Option<&DirectiveWrapper> {
        self.wrapper.as_ref()
    }
}

impl std::fmt::Debug for DirectiveDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveDefinition")
            .field("name", &self.name)
            .field("locations", &self.locations)
            .field("arguments", &self.arguments)
            .field("has_wrapper", &self.wrapper.is_some())
            .finish()
    }
}
