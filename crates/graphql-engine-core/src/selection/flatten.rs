use crate::GraphQLError;
use crate::Value;
use crate::schema::Schema;
use crate::selection::Directive;
use crate::selection::FragmentDefinition;
use crate::selection::FragmentSpread;
use crate::selection::Selection;
use crate::selection::SelectionSet;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::HashSet;
use std::sync::Arc;

/// Evaluates `@skip` and `@include`. Skip is checked first and wins.
pub fn should_include(directives: &[Directive]) -> Result<bool, GraphQLError> {
    for (name, keep_when) in [("skip", false), ("include", true)] {
        for directive in directives.iter().filter(|d| d.name == name) {
            match directive.argument("if") {
                Some(Value::Boolean(condition)) => {
                    if *condition != keep_when {
                        return Ok(false);
                    }
                },
                _ => {
                    return Err(GraphQLError::new(format!(
                        "Directive \"@{name}\" requires a Boolean \"if\" argument."
                    ))
                    .with_location(directive.location));
                },
            }
        }
    }
    Ok(true)
}

/// A `@skip`/`@include` whose condition could not be evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveError {
    /// Response key of the field carrying the directive and its position
    /// among the flattened keys. `None` for a directive on a fragment.
    pub field: Option<(String, usize)>,
    pub error: GraphQLError,
}

/// Merges every selection sharing a response key, including the ones
/// contributed by fragment spreads, into one selection whose
/// sub-selections are concatenated. Keys keep their first-seen order;
/// selections and spreads excluded by `@skip`/`@include` are dropped.
pub fn flatten(selection_set: &SelectionSet) -> Result<Vec<Selection>, GraphQLError> {
    let mut collector = Collector::new(None);
    collector.collect(selection_set).map_err(|err| err.error)?;
    Ok(collector.grouped.into_values().collect())
}

/// [`flatten`] for an object of type `object_type`. Untyped inline fragments
/// always apply; a typed fragment applies when its condition is the type
/// itself or an abstract type covering it.
pub fn flatten_for_type(
    schema: &Schema,
    selection_set: &SelectionSet,
    object_type: &str,
) -> Result<Vec<Selection>, DirectiveError> {
    let mut collector = Collector::new(Some((schema, object_type)));
    collector.collect(selection_set)?;
    Ok(collector.grouped.into_values().collect())
}

struct Collector<'s> {
    runtime_type: Option<(&'s Schema, &'s str)>,
    grouped: IndexMap<String, Selection>,
    /// Fragments already expanded into `grouped`. Named fragments share one
    /// `Arc`, and expanding one twice would only repeat its selections.
    expanded: HashSet<*const FragmentDefinition>,
}

impl<'s> Collector<'s> {
    fn new(runtime_type: Option<(&'s Schema, &'s str)>) -> Self {
        Collector {
            runtime_type,
            grouped: IndexMap::new(),
            expanded: HashSet::new(),
        }
    }

    fn collect(&mut self, selection_set: &SelectionSet) -> Result<(), DirectiveError> {
        let mut fragments = selection_set.fragments.iter().peekable();
        for (idx, selection) in selection_set.selections.iter().enumerate() {
            while let Some(spread) = fragments.next_if(|spread| spread.position <= idx) {
                self.collect_spread(spread)?;
            }
            match should_include(&selection.directives) {
                Ok(true) => merge(&mut self.grouped, selection),
                Ok(false) => (),
                Err(error) => {
                    let position = self
                        .grouped
                        .get_index_of(&selection.alias)
                        .unwrap_or(self.grouped.len());
                    return Err(DirectiveError {
                        field: Some((selection.alias.clone(), position)),
                        error,
                    });
                },
            }
        }
        for spread in fragments {
            self.collect_spread(spread)?;
        }
        Ok(())
    }

    fn collect_spread(&mut self, spread: &FragmentSpread) -> Result<(), DirectiveError> {
        let fragment = &spread.fragment;
        if let (Some((schema, object_type)), Some(condition)) =
            (self.runtime_type, fragment.type_condition.as_deref())
            && !schema.is_sub_type(condition, object_type)
        {
            return Ok(());
        }
        let included = should_include(&spread.directives)
            .map_err(|error| DirectiveError { field: None, error })?;
        if included && self.expanded.insert(Arc::as_ptr(fragment)) {
            self.collect(&fragment.selection_set)?;
        }
        Ok(())
    }
}

fn merge(grouped: &mut IndexMap<String, Selection>, selection: &Selection) {
    match grouped.entry(selection.alias.clone()) {
        Entry::Vacant(entry) => {
            entry.insert(selection.clone());
        },
        Entry::Occupied(mut entry) => {
            let existing = entry.get_mut();
            existing.selection_set = match (existing.selection_set.take(), &selection.selection_set) {
                (Some(first), Some(second)) => Some(concat(first, second)),
                (first, second) => first.or_else(|| second.clone()),
            };
        },
    }
}

fn concat(mut first: SelectionSet, second: &SelectionSet) -> SelectionSet {
    let offset = first.selections.len();
    first.selections.extend(second.selections.iter().cloned());
    first.fragments.extend(second.fragments.iter().map(|spread| FragmentSpread {
        position: spread.position + offset,
        ..spread.clone()
    }));
    first
}
