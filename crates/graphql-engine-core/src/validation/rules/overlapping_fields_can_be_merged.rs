use crate::schema::FieldDefinition;
use crate::schema::GraphQLType;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Fields sharing a response key must be mergeable: same field name and
/// arguments (unless their parents can never both apply), compatible
/// return shapes, and mergeable subselections.
#[derive(Default)]
pub struct OverlappingFieldsCanBeMerged {
    compared: HashSet<(usize, usize, bool)>,
}

#[derive(Clone, Copy)]
struct FieldAndType<'a> {
    parent_type: Option<&'a GraphQLType>,
    field: &'a ast::Field,
    definition: Option<&'a FieldDefinition>,
}

type FieldMap<'a> = IndexMap<&'a str, Vec<FieldAndType<'a>>>;

enum ConflictReason {
    Message(String),
    Subfields(Vec<(String, ConflictReason)>),
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictReason::Message(message) => f.write_str(message),
            ConflictReason::Subfields(subfields) => {
                for (idx, (key, reason)) in subfields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" and ")?;
                    }
                    write!(f, "subfields \"{key}\" conflict because {reason}")?;
                }
                Ok(())
            },
        }
    }
}

struct Conflict {
    response_key: String,
    reason: ConflictReason,
    locations: Vec<AstPos>,
}

fn collect_fields<'a>(
    ctx: &VisitorContext<'a>,
    parent_type: Option<&'a GraphQLType>,
    selection_set: &'a ast::SelectionSet,
    fields: &mut FieldMap<'a>,
    visited_fragments: &mut HashSet<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                let definition = parent_type
                    .and_then(GraphQLType::fields)
                    .and_then(|defs| defs.get(field.name.as_str()));
                fields.entry(field.response_key()).or_default().push(FieldAndType {
                    parent_type,
                    field,
                    definition,
                });
            },
            ast::Selection::InlineFragment(inline) => {
                let condition = match &inline.type_condition {
                    Some(name) => ctx.schema.get_type(name.as_str()),
                    None => parent_type,
                };
                collect_fields(ctx, condition, &inline.selection_set, fields, visited_fragments);
            },
            ast::Selection::FragmentSpread(spread) => {
                if !visited_fragments.insert(spread.name.as_str()) {
                    continue;
                }
                if let Some(fragment) = ctx.fragment(spread.name.as_str()) {
                    let condition = ctx.schema.get_type(fragment.type_condition.as_str());
                    collect_fields(
                        ctx,
                        condition,
                        &fragment.selection_set,
                        fields,
                        visited_fragments,
                    );
                }
            },
        }
    }
}

fn field_map<'a>(
    ctx: &VisitorContext<'a>,
    parent_type: Option<&'a GraphQLType>,
    selection_set: &'a ast::SelectionSet,
) -> FieldMap<'a> {
    let mut fields = FieldMap::new();
    collect_fields(ctx, parent_type, selection_set, &mut fields, &mut HashSet::new());
    fields
}

fn same_arguments(a: &[ast::Argument], b: &[ast::Argument]) -> bool {
    a.len() == b.len()
        && a.iter().all(|arg_a| {
            b.iter().any(|arg_b| {
                arg_a.name.as_str() == arg_b.name.as_str()
                    && arg_a.value.semantically_eq(&arg_b.value)
            })
        })
}

/// Whether two return types can never produce a mergeable response shape.
fn do_types_conflict(schema: &Schema, a: &TypeRef, b: &TypeRef) -> bool {
    match (a, b) {
        (TypeRef::List(a_item), TypeRef::List(b_item)) => do_types_conflict(schema, a_item, b_item),
        (TypeRef::List(_), _) | (_, TypeRef::List(_)) => true,
        (TypeRef::NonNull(a_inner), TypeRef::NonNull(b_inner)) => {
            do_types_conflict(schema, a_inner, b_inner)
        },
        (TypeRef::NonNull(_), _) | (_, TypeRef::NonNull(_)) => true,
        (TypeRef::Named(a_name), TypeRef::Named(b_name)) => {
            let is_leaf = |name: &str| schema.get_type(name).is_some_and(GraphQLType::is_leaf);
            (is_leaf(a_name) || is_leaf(b_name)) && a_name != b_name
        },
    }
}

fn field_id(field: &ast::Field) -> usize {
    std::ptr::from_ref(field) as usize
}

impl OverlappingFieldsCanBeMerged {
    fn find_conflicts_within<'a>(
        &mut self,
        ctx: &VisitorContext<'a>,
        fields: &FieldMap<'a>,
    ) -> Vec<Conflict> {
        let mut conflicts = vec![];
        for (response_key, candidates) in fields {
            for (idx, a) in candidates.iter().enumerate() {
                for b in &candidates[idx + 1..] {
                    if let Some(conflict) = self.find_conflict(ctx, response_key, a, b, false) {
                        conflicts.push(conflict);
                    }
                }
            }
        }
        conflicts
    }

    fn find_conflict<'a>(
        &mut self,
        ctx: &VisitorContext<'a>,
        response_key: &str,
        a: &FieldAndType<'a>,
        b: &FieldAndType<'a>,
        parents_mutually_exclusive: bool,
    ) -> Option<Conflict> {
        let (id_a, id_b) = (field_id(a.field), field_id(b.field));
        if id_a == id_b {
            return None;
        }
        let key = (id_a.min(id_b), id_a.max(id_b), parents_mutually_exclusive);
        if !self.compared.insert(key) {
            return None;
        }

        let conflict = |reason| Conflict {
            response_key: response_key.to_string(),
            reason,
            locations: vec![a.field.location(), b.field.location()],
        };

        // Distinct object types never both apply to one result.
        let mutually_exclusive = parents_mutually_exclusive
            || match (a.parent_type, b.parent_type) {
                (Some(GraphQLType::Object(pa)), Some(GraphQLType::Object(pb))) => {
                    pa.name() != pb.name()
                },
                _ => false,
            };

        if !mutually_exclusive {
            if a.field.name.as_str() != b.field.name.as_str() {
                return Some(conflict(ConflictReason::Message(format!(
                    "\"{}\" and \"{}\" are different fields",
                    a.field.name, b.field.name,
                ))));
            }
            if !same_arguments(&a.field.arguments, &b.field.arguments) {
                return Some(conflict(ConflictReason::Message(
                    "they have differing arguments".to_string(),
                )));
            }
        }

        if let (Some(def_a), Some(def_b)) = (a.definition, b.definition)
            && do_types_conflict(ctx.schema, def_a.ty(), def_b.ty())
        {
            return Some(conflict(ConflictReason::Message(format!(
                "they return conflicting types \"{}\" and \"{}\"",
                def_a.ty(),
                def_b.ty(),
            ))));
        }

        if let (Some(set_a), Some(set_b)) = (&a.field.selection_set, &b.field.selection_set) {
            let type_a = a.definition.and_then(|def| ctx.schema.get_type(def.ty().innermost_name()));
            let type_b = b.definition.and_then(|def| ctx.schema.get_type(def.ty().innermost_name()));
            let fields_a = field_map(ctx, type_a, set_a);
            let fields_b = field_map(ctx, type_b, set_b);

            let mut subfield_reasons = vec![];
            let mut locations = vec![a.field.location(), b.field.location()];
            for (sub_key, subfields_a) in &fields_a {
                let Some(subfields_b) = fields_b.get(sub_key) else {
                    continue;
                };
                for sub_a in subfields_a {
                    for sub_b in subfields_b {
                        if let Some(sub) =
                            self.find_conflict(ctx, sub_key, sub_a, sub_b, mutually_exclusive)
                        {
                            subfield_reasons.push((sub.response_key, sub.reason));
                            locations.extend(sub.locations);
                        }
                    }
                }
            }
            if !subfield_reasons.is_empty() {
                return Some(Conflict {
                    response_key: response_key.to_string(),
                    reason: ConflictReason::Subfields(subfield_reasons),
                    locations,
                });
            }
        }

        None
    }
}

impl<'a> Visitor<'a> for OverlappingFieldsCanBeMerged {
    fn enter_selection_set(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
        let fields = field_map(ctx, ctx.current_type(), selection_set);
        for conflict in self.find_conflicts_within(ctx, &fields) {
            ctx.report_error(
                conflict.locations,
                format!(
                    "Fields \"{}\" conflict because {}. Use different aliases on the fields to \
                     fetch both if this was intentional.",
                    conflict.response_key, conflict.reason,
                ),
            );
        }
    }
}
