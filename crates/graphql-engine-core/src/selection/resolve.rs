use crate::GraphQLError;
use crate::MultiError;
use crate::Value;
use crate::coercion::Variables;
use crate::coercion::coerce_arguments;
use crate::coercion::coerce_variables;
use crate::coercion::literal_to_value;
use crate::resolver::Arguments;
use crate::schema::GraphQLType;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::selection::Directive;
use crate::selection::FragmentDefinition;
use crate::selection::FragmentSpread;
use crate::selection::Selection;
use crate::selection::SelectionSet;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use graphql_engine_parser::ast::OperationKind;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

enum FragmentState {
    Visiting,
    Resolved(Arc<FragmentDefinition>),
}

/// Picks the operation to run, coerces `variables` against it and resolves
/// its selection set.
///
/// Fragment cycles, unused fragments (in single-operation documents) and
/// conflicting selections that only appear once fragments are expanded are
/// reported here as well.
pub fn apply_selection_set(
    schema: &Schema,
    document: &ast::Document,
    operation_name: Option<&str>,
    variables: &Variables,
) -> Result<(OperationKind, SelectionSet), MultiError> {
    let operation = select_operation(document, operation_name)?;
    let variables = coerce_variables(schema, &operation.variable_definitions, variables)?;

    let mut fragments = IndexMap::new();
    for fragment in document.fragments() {
        if let Entry::Vacant(entry) = fragments.entry(fragment.name.as_str()) {
            entry.insert(fragment);
        }
    }

    let mut resolver = SelectionResolver {
        schema,
        variables,
        fragments,
        states: HashMap::new(),
        resolving: vec![],
    };
    let root_type = schema.root_type_name(operation.operation);
    let selection_set = resolver.resolve_selection_set(root_type, &operation.selection_set)?;

    let mut errors = MultiError::new();
    if document.operations().count() == 1 {
        for fragment in document.fragments() {
            if !resolver.states.contains_key(fragment.name.as_str()) {
                errors.push(
                    GraphQLError::new(format!("Fragment \"{}\" is never used.", fragment.name))
                        .with_location(fragment.location()),
                );
            }
        }
    }

    errors.extend(overlap_errors(schema, root_type, &selection_set));

    if !errors.is_empty() {
        return Err(errors);
    }
    tracing::trace!(
        operation = operation.name_str().unwrap_or("<anonymous>"),
        "resolved selection set",
    );
    Ok((operation.operation, selection_set))
}

fn select_operation<'d>(
    document: &'d ast::Document,
    operation_name: Option<&str>,
) -> Result<&'d ast::OperationDefinition, GraphQLError> {
    match operation_name {
        Some(name) => document
            .operations()
            .find(|operation| operation.name_str() == Some(name))
            .ok_or_else(|| GraphQLError::new(format!("Unknown operation named \"{name}\"."))),
        None => {
            let mut operations = document.operations();
            match (operations.next(), operations.next()) {
                (Some(operation), None) => Ok(operation),
                (None, _) => Err(GraphQLError::new("Must provide an operation.")),
                (Some(_), Some(_)) => Err(GraphQLError::new(
                    "Must provide operation name if query contains multiple operations.",
                )),
            }
        },
    }
}

/// A literal with variables substituted. `None` for an unset variable;
/// unset variables inside an input object drop that field.
fn resolve_value(literal: &ast::Value, variables: &Variables) -> Option<Value> {
    match literal {
        ast::Value::Variable { name, .. } => variables.get(name.as_str()).cloned(),
        ast::Value::List { values, .. } => Some(Value::List(
            values
                .iter()
                .map(|value| resolve_value(value, variables).unwrap_or(Value::Null))
                .collect(),
        )),
        ast::Value::Object { fields, .. } => Some(Value::Object(
            fields
                .iter()
                .filter_map(|field| {
                    resolve_value(&field.value, variables)
                        .map(|value| (field.name.value.clone(), value))
                })
                .collect(),
        )),
        _ => Some(literal_to_value(literal, None)),
    }
}

fn resolve_arguments(arguments: &[ast::Argument], variables: &Variables) -> Arguments {
    arguments
        .iter()
        .filter_map(|argument| {
            resolve_value(&argument.value, variables)
                .map(|value| (argument.name.value.clone(), value))
        })
        .collect()
}

/// Coerces `arguments` to their definitions when those are known; otherwise
/// only substitutes variables.
fn bind_arguments(
    schema: &Schema,
    definitions: Option<&IndexMap<String, InputValueDefinition>>,
    arguments: &[ast::Argument],
    variables: &Variables,
    location: AstPos,
) -> Result<Arguments, GraphQLError> {
    match definitions {
        Some(definitions) => coerce_arguments(schema, definitions, arguments, variables)
            .map_err(|err| GraphQLError::new(err.to_string()).with_location(location)),
        None => Ok(resolve_arguments(arguments, variables)),
    }
}

struct SelectionResolver<'a> {
    schema: &'a Schema,
    variables: Variables,
    fragments: IndexMap<&'a str, &'a ast::FragmentDefinition>,
    states: HashMap<&'a str, FragmentState>,
    /// Names of the fragments currently being resolved, outermost first.
    resolving: Vec<&'a str>,
}

impl<'a> SelectionResolver<'a> {
    fn resolve_directives(
        &self,
        directives: &[ast::DirectiveAnnotation],
    ) -> Result<Vec<Directive>, GraphQLError> {
        directives
            .iter()
            .map(|directive| {
                let definition = self.schema.directive(directive.name.as_str());
                Ok(Directive {
                    name: directive.name.value.clone(),
                    args: bind_arguments(
                        self.schema,
                        definition.map(|def| def.arguments()),
                        &directive.arguments,
                        &self.variables,
                        directive.location(),
                    )?,
                    location: directive.location(),
                })
            })
            .collect()
    }

    fn resolve_selection_set(
        &mut self,
        parent_type: Option<&'a str>,
        selection_set: &'a ast::SelectionSet,
    ) -> Result<SelectionSet, GraphQLError> {
        let mut resolved = SelectionSet::default();
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => {
                    let definition = parent_type.and_then(|parent| {
                        self.schema.field_definition(parent, field.name.as_str())
                    });
                    let nested = match &field.selection_set {
                        Some(nested) => {
                            let field_type = definition.map(|def| def.ty().innermost_name());
                            Some(self.resolve_selection_set(field_type, nested)?)
                        },
                        None => None,
                    };
                    resolved.selections.push(Selection {
                        alias: field.response_key().to_string(),
                        name: field.name.value.clone(),
                        args: bind_arguments(
                            self.schema,
                            definition.map(|def| def.arguments()),
                            &field.arguments,
                            &self.variables,
                            field.location(),
                        )?,
                        directives: self.resolve_directives(&field.directives)?,
                        selection_set: nested,
                        location: field.location(),
                    });
                },
                ast::Selection::FragmentSpread(spread) => {
                    let fragment = self.resolve_fragment(spread)?;
                    resolved.fragments.push(FragmentSpread {
                        fragment,
                        directives: self.resolve_directives(&spread.directives)?,
                        position: resolved.selections.len(),
                        location: spread.location(),
                    });
                },
                ast::Selection::InlineFragment(inline) => {
                    let condition = match &inline.type_condition {
                        Some(name) => Some(name.as_str()),
                        None => parent_type,
                    };
                    let selection_set =
                        self.resolve_selection_set(condition, &inline.selection_set)?;
                    resolved.fragments.push(FragmentSpread {
                        fragment: Arc::new(FragmentDefinition {
                            name: None,
                            type_condition: inline
                                .type_condition
                                .as_ref()
                                .map(|name| name.value.clone()),
                            selection_set,
                            location: inline.location(),
                        }),
                        directives: self.resolve_directives(&inline.directives)?,
                        position: resolved.selections.len(),
                        location: inline.location(),
                    });
                },
            }
        }
        Ok(resolved)
    }

    fn resolve_fragment(
        &mut self,
        spread: &'a ast::FragmentSpread,
    ) -> Result<Arc<FragmentDefinition>, GraphQLError> {
        let name = spread.name.as_str();
        match self.states.get(name) {
            Some(FragmentState::Resolved(fragment)) => return Ok(Arc::clone(fragment)),
            Some(FragmentState::Visiting) => return Err(self.cycle_error(spread)),
            None => (),
        }
        let Some(definition) = self.fragments.get(name).copied() else {
            return Err(GraphQLError::new(format!("Unknown fragment \"{name}\"."))
                .with_location(spread.location()));
        };

        self.states.insert(name, FragmentState::Visiting);
        self.resolving.push(name);

        // Fragment-local variable definitions shadow the operation's.
        let saved_variables = if definition.variable_definitions.is_empty() {
            None
        } else {
            let locals =
                coerce_variables(self.schema, &definition.variable_definitions, &Variables::new())
                    .map_err(|errors| {
                        errors.into_iter().next().unwrap_or_else(|| {
                            GraphQLError::new(format!("Invalid variables in fragment \"{name}\"."))
                        })
                    })?;
            let saved = self.variables.clone();
            self.variables.extend(locals);
            Some(saved)
        };

        let selection_set = self.resolve_selection_set(
            Some(definition.type_condition.as_str()),
            &definition.selection_set,
        );

        if let Some(saved) = saved_variables {
            self.variables = saved;
        }
        self.resolving.pop();

        let resolved = Arc::new(FragmentDefinition {
            name: Some(name.to_string()),
            type_condition: Some(definition.type_condition.value.clone()),
            selection_set: selection_set?,
            location: definition.location(),
        });
        self.states.insert(name, FragmentState::Resolved(Arc::clone(&resolved)));
        Ok(resolved)
    }

    fn cycle_error(&self, spread: &ast::FragmentSpread) -> GraphQLError {
        let name = spread.name.as_str();
        let start = self
            .resolving
            .iter()
            .position(|resolving| *resolving == name)
            .unwrap_or_default();
        let via: Vec<String> = self.resolving[start + 1..]
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect();
        let message = if via.is_empty() {
            format!("Cannot spread fragment \"{name}\" within itself.")
        } else {
            format!("Cannot spread fragment \"{name}\" within itself via {}.", via.join(", "))
        };
        GraphQLError::new(message).with_location(spread.location())
    }
}

/// Response-key conflicts in the resolved tree, where every fragment is
/// expanded.
fn overlap_errors(
    schema: &Schema,
    root_type: Option<&str>,
    selection_set: &SelectionSet,
) -> Vec<GraphQLError> {
    let mut overlaps = OverlapChecker {
        schema,
        reported: HashSet::new(),
        checked: HashSet::new(),
        errors: vec![],
    };
    overlaps.check(root_type, selection_set);
    overlaps.errors
}

struct OverlapChecker<'a> {
    schema: &'a Schema,
    reported: HashSet<(usize, usize)>,
    /// Nested sets already checked, keyed by parent type and address. A set
    /// inside a shared fragment is reached once per path to it.
    checked: HashSet<(Option<&'a str>, usize)>,
    errors: Vec<GraphQLError>,
}

impl<'a> OverlapChecker<'a> {
    fn check(&mut self, parent_type: Option<&'a str>, selection_set: &'a SelectionSet) {
        let id = std::ptr::from_ref(selection_set) as usize;
        if !self.checked.insert((parent_type, id)) {
            return;
        }
        let mut grouped: IndexMap<&'a str, Vec<(Option<&'a str>, &'a Selection)>> =
            IndexMap::new();
        collect_selections(parent_type, selection_set, &mut grouped, &mut HashSet::new());

        for (response_key, candidates) in &grouped {
            for (idx, (parent_a, a)) in candidates.iter().enumerate() {
                for (parent_b, b) in &candidates[idx + 1..] {
                    self.compare(response_key, (*parent_a, *a), (*parent_b, *b));
                }
            }
        }

        for (parent, selection) in grouped.values().flatten() {
            if let Some(nested) = &selection.selection_set {
                let field_type = parent
                    .and_then(|parent| self.schema.field_definition(parent, &selection.name))
                    .map(|definition| definition.ty().innermost_name());
                self.check(field_type, nested);
            }
        }
    }

    fn compare(
        &mut self,
        response_key: &str,
        (parent_a, a): (Option<&str>, &Selection),
        (parent_b, b): (Option<&str>, &Selection),
    ) {
        let is_object = |name: Option<&str>| {
            name.and_then(|name| self.schema.get_type(name))
                .is_some_and(|ty| matches!(ty, GraphQLType::Object(_)))
        };
        if parent_a != parent_b && is_object(parent_a) && is_object(parent_b) {
            return;
        }

        let reason = if a.name != b.name {
            format!("\"{}\" and \"{}\" are different fields", a.name, b.name)
        } else if a.args != b.args {
            "they have differing arguments".to_string()
        } else {
            return;
        };

        let id_a = std::ptr::from_ref(a) as usize;
        let id_b = std::ptr::from_ref(b) as usize;
        if !self.reported.insert((id_a.min(id_b), id_a.max(id_b))) {
            return;
        }
        self.errors.push(
            GraphQLError::new(format!(
                "Fields \"{response_key}\" conflict because {reason}. Use different aliases on \
                 the fields to fetch both if this was intentional."
            ))
            .with_locations([a.location, b.location]),
        );
    }
}

/// Groups the selections of `selection_set` and its spreads by response key.
/// A fragment spread more than once contributes its selections once.
fn collect_selections<'s>(
    parent_type: Option<&'s str>,
    selection_set: &'s SelectionSet,
    grouped: &mut IndexMap<&'s str, Vec<(Option<&'s str>, &'s Selection)>>,
    expanded: &mut HashSet<*const FragmentDefinition>,
) {
    for selection in &selection_set.selections {
        grouped
            .entry(selection.alias.as_str())
            .or_default()
            .push((parent_type, selection));
    }
    for spread in &selection_set.fragments {
        if !expanded.insert(Arc::as_ptr(&spread.fragment)) {
            continue;
        }
        let condition = spread.fragment.type_condition.as_deref().or(parent_type);
        collect_selections(condition, &spread.fragment.selection_set, grouped, expanded);
    }
}
