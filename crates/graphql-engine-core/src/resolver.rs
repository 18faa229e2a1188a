//! The host-facing side of execution: what resolvers receive and return.

use crate::PathSegment;
use crate::Value;
use crate::execution::ExecutionContext;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::any::Any;
use std::any::TypeId;
use std::sync::Arc;

/// Coerced field arguments, in declaration order of the schema field.
pub type Arguments = IndexMap<String, Value>;

/// Resolves one field: `(context, parent value, arguments) -> value`.
pub type Resolver = Arc<
    dyn Fn(&ResolveContext<'_>, &FieldValue, &Arguments) -> Result<FieldValue, FieldError>
        + Send
        + Sync,
>;

/// Picks the concrete object type name for a value of an abstract type.
/// `None` falls back to matching the value's backing Rust type.
pub type TypeResolver = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Wraps a field's resolution. Receives the directive's coerced arguments
/// and a `next` callback that runs the rest of the chain; may return
/// [`FieldValue::Skip`] without calling `next` to veto the field.
pub type DirectiveWrapper = Arc<
    dyn Fn(
            &Arguments,
            &ResolveContext<'_>,
            &dyn Fn() -> Result<FieldValue, FieldError>,
        ) -> Result<FieldValue, FieldError>
        + Send
        + Sync,
>;

/// A host value of arbitrary Rust type, shared with the executor.
#[derive(Clone)]
pub struct HostObject(Arc<dyn Any + Send + Sync>);

impl HostObject {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// `TypeId` of the wrapped value (not of the `Arc`).
    pub fn backing_type_id(&self) -> TypeId {
        (*self.0).type_id()
    }
}

impl std::fmt::Debug for HostObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HostObject({:?})", self.backing_type_id())
    }
}

/// What a resolver returns.
#[derive(Clone, Debug)]
pub enum FieldValue {
    Null,
    /// A leaf value, or an object given as an ordered map whose keys are
    /// read by fields that have no resolver of their own.
    Value(Value),
    List(Vec<FieldValue>),
    /// An opaque host object, handed to child resolvers as their parent.
    Object(HostObject),
    /// Names the concrete object type of `value` for abstract-type
    /// resolution.
    Typed {
        type_name: String,
        value: Box<FieldValue>,
    },
    /// The field is intentionally left out of the response (a directive
    /// vetoed it). Not an error.
    Skip,
}

impl FieldValue {
    pub fn value(value: impl Into<Value>) -> Self {
        FieldValue::Value(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = FieldValue>) -> Self {
        FieldValue::List(items.into_iter().collect())
    }

    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        FieldValue::Object(HostObject::new(value))
    }

    pub fn with_type(self, type_name: impl Into<String>) -> Self {
        FieldValue::Typed {
            type_name: type_name.into(),
            value: Box::new(self),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Null | FieldValue::Value(Value::Null) => true,
            FieldValue::Typed { value, .. } => value.is_null(),
            _ => false,
        }
    }

    /// The value with any [`FieldValue::Typed`] wrappers removed.
    pub fn untyped(&self) -> &FieldValue {
        match self {
            FieldValue::Typed { value, .. } => value.untyped(),
            other => other,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self.untyped() {
            FieldValue::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self.untyped() {
            FieldValue::Object(host) => host.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// An explicit concrete type name: from a `Typed` wrapper or a
    /// `__typename` key of a map value.
    pub(crate) fn type_name_hint(&self) -> Option<&str> {
        match self {
            FieldValue::Typed { type_name, .. } => Some(type_name),
            FieldValue::Value(Value::Object(fields)) => {
                fields.get("__typename").and_then(Value::as_str)
            },
            _ => None,
        }
    }

    pub(crate) fn backing_type_id(&self) -> Option<TypeId> {
        match self.untyped() {
            FieldValue::Object(host) => Some(host.backing_type_id()),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

/// A resolver failure. Becomes one [`GraphQLError`](crate::GraphQLError)
/// located at the failing field.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
    extensions: IndexMap<String, Value>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: IndexMap::new(),
        }
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn extensions(&self) -> &IndexMap<String, Value> {
        &self.extensions
    }

    pub(crate) fn into_parts(self) -> (String, IndexMap<String, Value>) {
        (self.message, self.extensions)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

/// Per-call context handed to resolvers and directive wrappers.
pub struct ResolveContext<'a> {
    pub(crate) execution: &'a ExecutionContext,
    pub(crate) schema: &'a Schema,
    pub(crate) parent_type: &'a str,
    pub(crate) field_name: &'a str,
    pub(crate) path: &'a [PathSegment],
}

impl<'a> ResolveContext<'a> {
    pub fn execution(&self) -> &'a ExecutionContext {
        self.execution
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Name of the object type the field is being resolved on.
    pub fn parent_type_name(&self) -> &'a str {
        self.parent_type
    }

    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    /// Response path of the field being resolved.
    pub fn path(&self) -> &'a [PathSegment] {
        self.path
    }

    /// The request's host data, if it is a `T`.
    pub fn data<T: Any>(&self) -> Option<&'a T> {
        self.execution.data::<T>()
    }
}
