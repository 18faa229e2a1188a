use crate::Value;
use graphql_engine_parser::GraphQLParseError;
use graphql_engine_parser::ast::AstPos;
use indexmap::IndexMap;

/// One step of a response path: a response key or a list index.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Field(value.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        PathSegment::Index(value)
    }
}

/// A GraphQL error as it appears in a response's `errors` list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, thiserror::Error)]
#[error("{message}")]
pub struct GraphQLError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<AstPos>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
            extensions: IndexMap::new(),
        }
    }

    pub fn with_location(mut self, location: AstPos) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_locations(mut self, locations: impl IntoIterator<Item = AstPos>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

impl From<GraphQLParseError> for GraphQLError {
    fn from(err: GraphQLParseError) -> Self {
        let mut message = format!("Syntax Error: {}", err.message());
        for note in err.notes() {
            if note.kind == graphql_engine_parser::GraphQLErrorNoteKind::Help {
                message.push_str(&format!(" ({})", note.message));
            }
        }
        GraphQLError::new(message).with_location(err.location())
    }
}

/// An ordered collection of [`GraphQLError`]s. Validation and execution both
/// accumulate into one of these instead of stopping at the first fault.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct MultiError(Vec<GraphQLError>);

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: GraphQLError) {
        self.0.push(error);
    }

    pub fn errors(&self) -> &[GraphQLError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<GraphQLError> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphQLError> {
        self.0.iter()
    }
}

impl std::fmt::Display for MultiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|err| err.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for MultiError {}

impl From<Vec<GraphQLError>> for MultiError {
    fn from(errors: Vec<GraphQLError>) -> Self {
        Self(errors)
    }
}

impl From<GraphQLError> for MultiError {
    fn from(error: GraphQLError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for MultiError {
    type Item = GraphQLError;
    type IntoIter = std::vec::IntoIter<GraphQLError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a GraphQLError;
    type IntoIter = std::slice::Iter<'a, GraphQLError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<GraphQLError> for MultiError {
    fn extend<T: IntoIterator<Item = GraphQLError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
