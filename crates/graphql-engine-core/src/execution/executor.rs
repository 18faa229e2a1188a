use crate::GraphQLError;
use crate::MultiError;
use crate::PathSegment;
use crate::Value;
use crate::execution::ExecutionContext;
use crate::execution::ExecutionOptions;
use crate::execution::ExecutionStrategy;
use crate::resolver::Arguments;
use crate::resolver::DirectiveWrapper;
use crate::resolver::FieldError;
use crate::resolver::FieldValue;
use crate::resolver::ResolveContext;
use crate::schema::FieldDefinition;
use crate::schema::GraphQLType;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::selection::DirectiveError;
use crate::selection::Selection;
use crate::selection::SelectionSet;
use crate::selection::flatten_for_type;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// A value was nulled by an error that has already been recorded. The null
/// travels up to the nearest nullable ancestor.
struct Bubble;

type Completion = Result<Value, Bubble>;

/// A response path plus the query-order position of each segment, used to
/// put errors back in query order.
#[derive(Clone, Default)]
struct ResponsePath {
    segments: Vec<PathSegment>,
    order: Vec<usize>,
}

impl ResponsePath {
    fn field(&self, response_key: &str, position: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment::Field(response_key.to_string()));
        path.order.push(position);
        path
    }

    fn index(&self, idx: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(PathSegment::Index(idx));
        path.order.push(idx);
        path
    }
}

/// Executes `selection_set` on `root_value` as an instance of `root_type`.
///
/// Returns the response data (null when a non-null violation reached the
/// root) and every error raised along the way, in query order. Root fields
/// of the mutation type always run one after another.
pub fn execute(
    ctx: &ExecutionContext,
    schema: &Schema,
    root_type: &ObjectType,
    root_value: &FieldValue,
    selection_set: &SelectionSet,
    options: &ExecutionOptions,
) -> (Value, MultiError) {
    let executor = Executor {
        ctx,
        schema,
        strategy: options.strategy,
        errors: Mutex::new(vec![]),
        cancel_reported: AtomicBool::new(false),
    };
    let serial_root = schema.mutation_type_name() == Some(root_type.name());
    tracing::debug!(
        root_type = root_type.name(),
        strategy = ?options.strategy,
        "executing operation",
    );

    let data = executor
        .execute_selection_set(
            root_type,
            root_value,
            selection_set,
            &ResponsePath::default(),
            serial_root,
        )
        .unwrap_or(Value::Null);

    let mut errors = executor
        .errors
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    errors.sort_by(|(a, _), (b, _)| a.cmp(b));
    tracing::debug!(errors = errors.len(), "execution finished");
    let errors: Vec<GraphQLError> = errors.into_iter().map(|(_, error)| error).collect();
    (data, errors.into())
}

struct Executor<'a> {
    ctx: &'a ExecutionContext,
    schema: &'a Schema,
    strategy: ExecutionStrategy,
    errors: Mutex<Vec<(Vec<usize>, GraphQLError)>>,
    cancel_reported: AtomicBool,
}

impl<'a> Executor<'a> {
    fn record(&self, path: &ResponsePath, error: GraphQLError) {
        let error = error.with_path(path.segments.clone());
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path.order.clone(), error));
    }

    fn record_at(&self, path: &ResponsePath, selection: &Selection, message: String) {
        self.record(path, GraphQLError::new(message).with_location(selection.location));
    }

    fn parallel(&self) -> bool {
        self.strategy == ExecutionStrategy::Parallel
    }

    fn execute_selection_set(
        &self,
        object_type: &ObjectType,
        parent: &FieldValue,
        selection_set: &SelectionSet,
        path: &ResponsePath,
        serial: bool,
    ) -> Completion {
        let selections = match flatten_for_type(self.schema, selection_set, object_type.name()) {
            Ok(selections) => selections,
            Err(DirectiveError { field, error }) => {
                match field {
                    Some((response_key, position)) => {
                        self.record(&path.field(&response_key, position), error);
                    },
                    None => self.record(path, error),
                }
                return Err(Bubble);
            },
        };

        let execute_one = |(position, selection): (usize, &Selection)| {
            let field_path = path.field(&selection.alias, position);
            self.execute_field(object_type, parent, selection, &field_path)
        };
        let results: Vec<Result<Option<Value>, Bubble>> = if self.parallel() && !serial {
            selections.par_iter().enumerate().map(execute_one).collect()
        } else {
            selections.iter().enumerate().map(execute_one).collect()
        };

        let mut object = IndexMap::new();
        let mut bubbled = false;
        for (selection, result) in selections.iter().zip(results) {
            match result {
                Ok(Some(value)) => {
                    object.insert(selection.alias.clone(), value);
                },
                Ok(None) => (),
                Err(Bubble) => bubbled = true,
            }
        }
        if bubbled { Err(Bubble) } else { Ok(Value::Object(object)) }
    }

    /// `Ok(None)` when a directive left the field out of the response.
    fn execute_field(
        &self,
        object_type: &ObjectType,
        parent: &FieldValue,
        selection: &Selection,
        path: &ResponsePath,
    ) -> Result<Option<Value>, Bubble> {
        if selection.name == "__typename" {
            return Ok(Some(Value::String(object_type.name().to_string())));
        }
        let Some(definition) = object_type.field(&selection.name) else {
            self.record_at(
                path,
                selection,
                format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    selection.name,
                    object_type.name(),
                ),
            );
            return Ok(Some(Value::Null));
        };
        let nullable = |completion: Completion| match completion {
            Ok(value) => Ok(Some(value)),
            Err(Bubble) if !definition.ty().is_non_null() => Ok(Some(Value::Null)),
            Err(bubble) => Err(bubble),
        };

        if self.ctx.is_cancelled() {
            if !self.cancel_reported.swap(true, Ordering::SeqCst) {
                tracing::debug!(field = %selection.name, "execution cancelled");
                self.record_at(path, selection, "execution cancelled".to_string());
            }
            return nullable(Err(Bubble));
        }

        let resolve_ctx = ResolveContext {
            execution: self.ctx,
            schema: self.schema,
            parent_type: object_type.name(),
            field_name: &selection.name,
            path: &path.segments,
        };
        let value = match self.call_resolver(definition, parent, selection, &resolve_ctx) {
            Ok(FieldValue::Skip) => return Ok(None),
            Ok(value) => value,
            Err(err) => {
                let (message, extensions) = err.into_parts();
                let mut error = GraphQLError::new(message).with_location(selection.location);
                error.extensions = extensions;
                self.record(path, error);
                return nullable(Err(Bubble));
            },
        };

        nullable(self.complete_value(definition.ty(), object_type, selection, &value, path))
    }

    /// Runs the field's resolver inside its directive wrappers, turning a
    /// panic into a field error.
    fn call_resolver(
        &self,
        definition: &FieldDefinition,
        parent: &FieldValue,
        selection: &Selection,
        resolve_ctx: &ResolveContext<'_>,
    ) -> Result<FieldValue, FieldError> {
        let base = || match definition.resolver() {
            Some(resolver) => resolver(resolve_ctx, parent, &selection.args),
            None => Ok(default_resolve(parent, &selection.name)),
        };
        let wrappers: Vec<(&DirectiveWrapper, &Arguments)> = selection
            .directives
            .iter()
            .filter_map(|directive| {
                let wrapper = self.schema.directive(&directive.name)?.wrapper()?;
                Some((wrapper, &directive.args))
            })
            .collect();

        match std::panic::catch_unwind(AssertUnwindSafe(|| {
            run_wrapped(&wrappers, resolve_ctx, &base)
        })) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(&*payload);
                tracing::warn!(
                    parent_type = resolve_ctx.parent_type,
                    field = %selection.name,
                    %message,
                    "resolver panicked",
                );
                Err(FieldError::new(format!("resolver panicked: {message}"))
                    .with_extension("stacktrace", Backtrace::force_capture().to_string()))
            },
        }
    }

    fn complete_value(
        &self,
        ty: &TypeRef,
        parent_type: &ObjectType,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
    ) -> Completion {
        match ty {
            TypeRef::NonNull(inner) => {
                let completed = self.complete_value(inner, parent_type, selection, value, path)?;
                if completed.is_null() {
                    self.record_at(
                        path,
                        selection,
                        format!(
                            "Cannot return null for non-null field {}.{}.",
                            parent_type.name(),
                            selection.name,
                        ),
                    );
                    return Err(Bubble);
                }
                Ok(completed)
            },
            _ if value.is_null() => Ok(Value::Null),
            TypeRef::List(item_type) => {
                self.complete_list(item_type, parent_type, selection, value, path)
            },
            TypeRef::Named(type_name) => {
                self.complete_named(type_name, parent_type, selection, value, path)
            },
        }
    }

    fn complete_list(
        &self,
        item_type: &TypeRef,
        parent_type: &ObjectType,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
    ) -> Completion {
        let converted: Vec<FieldValue>;
        let items: &[FieldValue] = match value.untyped() {
            FieldValue::List(items) => items,
            FieldValue::Value(Value::List(values)) => {
                converted = values.iter().cloned().map(FieldValue::Value).collect();
                &converted
            },
            other => {
                self.record_at(
                    path,
                    selection,
                    format!(
                        "Expected a list for field \"{}.{}\", found {}.",
                        parent_type.name(),
                        selection.name,
                        describe(other),
                    ),
                );
                return Err(Bubble);
            },
        };

        // A failed element is null unless the element type is non-null, in
        // which case the whole list fails.
        let complete_item = |(idx, item): (usize, &FieldValue)| {
            let item_path = path.index(idx);
            match self.complete_value(item_type, parent_type, selection, item, &item_path) {
                Err(Bubble) if !item_type.is_non_null() => Ok(Value::Null),
                other => other,
            }
        };
        let completed: Vec<Completion> = if self.parallel() && items.len() > 1 {
            items.par_iter().enumerate().map(complete_item).collect()
        } else {
            items.iter().enumerate().map(complete_item).collect()
        };
        completed.into_iter().collect::<Result<Vec<_>, _>>().map(Value::List)
    }

    fn complete_named(
        &self,
        type_name: &str,
        parent_type: &ObjectType,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
    ) -> Completion {
        let Some(named) = self.schema.get_type(type_name) else {
            self.record_at(path, selection, format!("Unknown type \"{type_name}\"."));
            return Err(Bubble);
        };
        match named {
            GraphQLType::Scalar(scalar) => {
                self.complete_leaf(type_name, selection, value, path, |v| scalar.serialize(v))
            },
            GraphQLType::Enum(enum_type) => {
                self.complete_leaf(type_name, selection, value, path, |v| enum_type.serialize(v))
            },
            GraphQLType::Object(object) => self.complete_object(object, selection, value, path),
            GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                let object = self.resolve_abstract_type(named, parent_type, selection, value, path)?;
                self.complete_object(object, selection, value, path)
            },
            GraphQLType::InputObject(_) => {
                self.record_at(
                    path,
                    selection,
                    format!(
                        "Input type \"{type_name}\" cannot be returned from field \"{}.{}\".",
                        parent_type.name(),
                        selection.name,
                    ),
                );
                Err(Bubble)
            },
        }
    }

    fn complete_leaf(
        &self,
        type_name: &str,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
        serialize: impl Fn(&Value) -> Result<Value, String>,
    ) -> Completion {
        let Some(raw) = value.as_value() else {
            self.record_at(
                path,
                selection,
                format!("{type_name} cannot represent {}.", describe(value.untyped())),
            );
            return Err(Bubble);
        };
        serialize(raw).map_err(|message| {
            self.record_at(path, selection, message);
            Bubble
        })
    }

    fn complete_object(
        &self,
        object: &ObjectType,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
    ) -> Completion {
        let empty = SelectionSet::default();
        let selection_set = selection.selection_set.as_ref().unwrap_or(&empty);
        self.execute_selection_set(object, value.untyped(), selection_set, path, false)
    }

    /// Picks the concrete object type of `value`: the abstract type's own
    /// resolver first, then an explicit type name on the value, then the
    /// backing Rust type of a host object.
    fn resolve_abstract_type(
        &self,
        abstract_type: &GraphQLType,
        parent_type: &ObjectType,
        selection: &Selection,
        value: &FieldValue,
        path: &ResponsePath,
    ) -> Result<&'a ObjectType, Bubble> {
        let abstract_name = abstract_type.name();
        let type_resolver = match abstract_type {
            GraphQLType::Interface(interface) => interface.type_resolver(),
            GraphQLType::Union(union_) => union_.type_resolver(),
            _ => None,
        };
        let resolved = type_resolver
            .and_then(|resolve| resolve(value))
            .or_else(|| value.type_name_hint().map(str::to_string))
            .or_else(|| {
                let backing = value.backing_type_id()?;
                self.schema
                    .possible_types(abstract_name)
                    .into_iter()
                    .find(|object| object.backing_type() == Some(backing))
                    .map(|object| object.name().to_string())
            });

        let Some(type_name) = resolved else {
            self.record_at(
                path,
                selection,
                format!(
                    "Abstract type \"{abstract_name}\" must resolve to an Object type at runtime \
                     for field \"{}.{}\".",
                    parent_type.name(),
                    selection.name,
                ),
            );
            return Err(Bubble);
        };
        match self.schema.object_type(&type_name) {
            Some(object) if self.schema.is_possible_type(abstract_name, &type_name) => Ok(object),
            _ => {
                self.record_at(
                    path,
                    selection,
                    format!(
                        "Runtime Object type \"{type_name}\" is not a possible type for \
                         \"{abstract_name}\"."
                    ),
                );
                Err(Bubble)
            },
        }
    }
}

fn run_wrapped(
    wrappers: &[(&DirectiveWrapper, &Arguments)],
    resolve_ctx: &ResolveContext<'_>,
    base: &dyn Fn() -> Result<FieldValue, FieldError>,
) -> Result<FieldValue, FieldError> {
    match wrappers.split_first() {
        None => base(),
        Some(((wrapper, args), rest)) => {
            wrapper(args, resolve_ctx, &|| run_wrapped(rest, resolve_ctx, base))
        },
    }
}

/// Reads the same-named key of a map parent.
fn default_resolve(parent: &FieldValue, field_name: &str) -> FieldValue {
    match parent.untyped() {
        FieldValue::Value(Value::Object(fields)) => {
            fields.get(field_name).cloned().map_or(FieldValue::Null, FieldValue::Value)
        },
        _ => FieldValue::Null,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Value(value) => format!("{} {value}", value.kind_str()),
        FieldValue::List(_) => "a list".to_string(),
        FieldValue::Object(_) => "an object".to_string(),
        FieldValue::Null => "null".to_string(),
        FieldValue::Typed { value, .. } => describe(value),
        FieldValue::Skip => "a skipped value".to_string(),
    }
}
