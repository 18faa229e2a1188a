use crate::GraphQLError;
use crate::schema::DirectiveLocation;
use crate::schema::GraphQLType;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::TypeRef;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Shared state while walking a document: the schema, the stack of parent
/// types and the errors reported so far.
pub struct VisitorContext<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) document: &'a ast::Document,
    pub(crate) errors: Vec<GraphQLError>,
    type_stack: Vec<Option<&'a GraphQLType>>,
    fragments: IndexMap<&'a str, &'a ast::FragmentDefinition>,
}

impl<'a> VisitorContext<'a> {
    pub(crate) fn new(schema: &'a Schema, document: &'a ast::Document) -> Self {
        let mut fragments = IndexMap::new();
        for fragment in document.fragments() {
            // First definition wins; duplicates are their own error.
            if let Entry::Vacant(entry) = fragments.entry(fragment.name.as_str()) {
                entry.insert(fragment);
            }
        }
        Self {
            schema,
            document,
            errors: vec![],
            type_stack: vec![],
            fragments,
        }
    }

    pub(crate) fn report_error(&mut self, locations: Vec<AstPos>, message: impl Into<String>) {
        self.errors.push(GraphQLError::new(message).with_locations(locations));
    }

    pub(crate) fn with_type<F: FnMut(&mut VisitorContext<'a>)>(
        &mut self,
        ty: Option<&'a GraphQLType>,
        mut f: F,
    ) {
        self.type_stack.push(ty);
        f(self);
        self.type_stack.pop();
    }

    /// The type whose selection set is being visited, or the output type of
    /// the field being visited.
    pub(crate) fn current_type(&self) -> Option<&'a GraphQLType> {
        self.type_stack.last().copied().flatten()
    }

    /// The type enclosing [`current_type`](Self::current_type).
    pub(crate) fn parent_type(&self) -> Option<&'a GraphQLType> {
        let len = self.type_stack.len();
        if len < 2 {
            return None;
        }
        self.type_stack[len - 2]
    }

    pub(crate) fn fragment(&self, name: &str) -> Option<&'a ast::FragmentDefinition> {
        self.fragments.get(name).copied()
    }

    pub(crate) fn fragments(&self) -> impl Iterator<Item = &'a ast::FragmentDefinition> + '_ {
        self.fragments.values().copied()
    }
}

/// A variable reference found inside an argument value, with the input type
/// expected where it appears.
pub struct VariableUsage<'a> {
    pub name: &'a ast::Name,
    pub expected_type: Option<&'a TypeRef>,
    /// The argument or input field it fills has a default value.
    pub location_has_default: bool,
}

/// Callbacks for each node kind of an executable document. Every method
/// defaults to doing nothing.
pub trait Visitor<'a> {
    fn enter_document(&mut self, _ctx: &mut VisitorContext<'a>, _doc: &'a ast::Document) {}
    fn exit_document(&mut self, _ctx: &mut VisitorContext<'a>, _doc: &'a ast::Document) {}

    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _operation: &'a ast::OperationDefinition,
    ) {
    }
    fn exit_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _operation: &'a ast::OperationDefinition,
    ) {
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment: &'a ast::FragmentDefinition,
    ) {
    }
    fn exit_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment: &'a ast::FragmentDefinition,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a ast::VariableDefinition,
    ) {
    }
    fn exit_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a ast::VariableDefinition,
    ) {
    }

    fn enter_directive(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _directive: &'a ast::DirectiveAnnotation,
        _location: DirectiveLocation,
    ) {
    }
    fn exit_directive(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _directive: &'a ast::DirectiveAnnotation,
        _location: DirectiveLocation,
    ) {
    }

    fn enter_variable_usage(&mut self, _ctx: &mut VisitorContext<'a>, _usage: &VariableUsage<'a>) {}

    fn enter_selection_set(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _selection_set: &'a ast::SelectionSet,
    ) {
    }
    fn exit_selection_set(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _selection_set: &'a ast::SelectionSet,
    ) {
    }

    fn enter_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a ast::Field) {}
    fn exit_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a ast::Field) {}

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a ast::FragmentSpread,
    ) {
    }
    fn exit_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a ast::FragmentSpread,
    ) {
    }

    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a ast::InlineFragment,
    ) {
    }
    fn exit_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a ast::InlineFragment,
    ) {
    }
}

/// Empty visitor; the start of a [`VisitorCons`] chain.
pub struct VisitorNil;

impl VisitorNil {
    pub(crate) const fn with<V>(self, visitor: V) -> VisitorCons<V, Self> {
        VisitorCons(visitor, self)
    }
}

/// Runs `A` and then `B` on every node.
pub struct VisitorCons<A, B>(A, B);

impl<A, B> VisitorCons<A, B> {
    pub(crate) const fn with<V>(self, visitor: V) -> VisitorCons<V, Self> {
        VisitorCons(visitor, self)
    }
}

impl Visitor<'_> for VisitorNil {}

impl<'a, A, B> Visitor<'a> for VisitorCons<A, B>
where
    A: Visitor<'a>,
    B: Visitor<'a>,
{
    fn enter_document(&mut self, ctx: &mut VisitorContext<'a>, doc: &'a ast::Document) {
        self.0.enter_document(ctx, doc);
        self.1.enter_document(ctx, doc);
    }

    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, doc: &'a ast::Document) {
        self.0.exit_document(ctx, doc);
        self.1.exit_document(ctx, doc);
    }

    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        self.0.enter_operation_definition(ctx, operation);
        self.1.enter_operation_definition(ctx, operation);
    }

    fn exit_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        self.0.exit_operation_definition(ctx, operation);
        self.1.exit_operation_definition(ctx, operation);
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        self.0.enter_fragment_definition(ctx, fragment);
        self.1.enter_fragment_definition(ctx, fragment);
    }

    fn exit_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        self.0.exit_fragment_definition(ctx, fragment);
        self.1.exit_fragment_definition(ctx, fragment);
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        self.0.enter_variable_definition(ctx, variable_definition);
        self.1.enter_variable_definition(ctx, variable_definition);
    }

    fn exit_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a ast::VariableDefinition,
    ) {
        self.0.exit_variable_definition(ctx, variable_definition);
        self.1.exit_variable_definition(ctx, variable_definition);
    }

    fn enter_directive(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        location: DirectiveLocation,
    ) {
        self.0.enter_directive(ctx, directive, location);
        self.1.enter_directive(ctx, directive, location);
    }

    fn exit_directive(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        location: DirectiveLocation,
    ) {
        self.0.exit_directive(ctx, directive, location);
        self.1.exit_directive(ctx, directive, location);
    }

    fn enter_variable_usage(&mut self, ctx: &mut VisitorContext<'a>, usage: &VariableUsage<'a>) {
        self.0.enter_variable_usage(ctx, usage);
        self.1.enter_variable_usage(ctx, usage);
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
        self.0.enter_selection_set(ctx, selection_set);
        self.1.enter_selection_set(ctx, selection_set);
    }

    fn exit_selection_set(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
        self.0.exit_selection_set(ctx, selection_set);
        self.1.exit_selection_set(ctx, selection_set);
    }

    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        self.0.enter_field(ctx, field);
        self.1.enter_field(ctx, field);
    }

    fn exit_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        self.0.exit_field(ctx, field);
        self.1.exit_field(ctx, field);
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a ast::FragmentSpread,
    ) {
        self.0.enter_fragment_spread(ctx, fragment_spread);
        self.1.enter_fragment_spread(ctx, fragment_spread);
    }

    fn exit_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a ast::FragmentSpread,
    ) {
        self.0.exit_fragment_spread(ctx, fragment_spread);
        self.1.exit_fragment_spread(ctx, fragment_spread);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        self.0.enter_inline_fragment(ctx, inline_fragment);
        self.1.enter_inline_fragment(ctx, inline_fragment);
    }

    fn exit_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a ast::InlineFragment,
    ) {
        self.0.exit_inline_fragment(ctx, inline_fragment);
        self.1.exit_inline_fragment(ctx, inline_fragment);
    }
}

pub(crate) fn visit<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    doc: &'a ast::Document,
) {
    v.enter_document(ctx, doc);
    for definition in &doc.definitions {
        match definition {
            ast::Definition::Operation(operation) => {
                visit_operation_definition(v, ctx, operation)
            },
            ast::Definition::Fragment(fragment) => visit_fragment_definition(v, ctx, fragment),
        }
    }
    v.exit_document(ctx, doc);
}

fn visit_operation_definition<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    operation: &'a ast::OperationDefinition,
) {
    v.enter_operation_definition(ctx, operation);
    let root_type = ctx
        .schema
        .root_type_name(operation.operation)
        .and_then(|name| ctx.schema.get_type(name));
    ctx.with_type(root_type, |ctx| {
        visit_variable_definitions(v, ctx, &operation.variable_definitions);
        visit_directives(v, ctx, &operation.directives, operation.operation.into());
        visit_selection_set(v, ctx, &operation.selection_set);
    });
    v.exit_operation_definition(ctx, operation);
}

fn visit_fragment_definition<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    fragment: &'a ast::FragmentDefinition,
) {
    v.enter_fragment_definition(ctx, fragment);
    let condition = ctx.schema.get_type(fragment.type_condition.as_str());
    ctx.with_type(condition, |ctx| {
        visit_variable_definitions(v, ctx, &fragment.variable_definitions);
        visit_directives(v, ctx, &fragment.directives, DirectiveLocation::FragmentDefinition);
        visit_selection_set(v, ctx, &fragment.selection_set);
    });
    v.exit_fragment_definition(ctx, fragment);
}

fn visit_variable_definitions<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    variable_definitions: &'a [ast::VariableDefinition],
) {
    for variable_definition in variable_definitions {
        v.enter_variable_definition(ctx, variable_definition);
        visit_directives(
            v,
            ctx,
            &variable_definition.directives,
            DirectiveLocation::VariableDefinition,
        );
        v.exit_variable_definition(ctx, variable_definition);
    }
}

fn visit_directives<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    directives: &'a [ast::DirectiveAnnotation],
    location: DirectiveLocation,
) {
    for directive in directives {
        v.enter_directive(ctx, directive, location);
        let definition = ctx.schema.directive(directive.name.as_str());
        visit_arguments(v, ctx, &directive.arguments, definition.map(|d| &d.arguments));
        v.exit_directive(ctx, directive, location);
    }
}

fn visit_arguments<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    arguments: &'a [ast::Argument],
    definitions: Option<&'a IndexMap<String, InputValueDefinition>>,
) {
    for argument in arguments {
        let definition = definitions.and_then(|defs| defs.get(argument.name.as_str()));
        visit_input_value(v, ctx, &argument.value, definition);
    }
}

/// Reports every variable inside `value` with the type expected at its
/// position.
fn visit_input_value<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    value: &'a ast::Value,
    definition: Option<&'a InputValueDefinition>,
) {
    visit_input_value_of_type(
        v,
        ctx,
        value,
        definition.map(|def| &def.ty),
        definition.is_some_and(|def| def.default_value.is_some()),
    );
}

fn visit_input_value_of_type<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    value: &'a ast::Value,
    expected_type: Option<&'a TypeRef>,
    location_has_default: bool,
) {
    match value {
        ast::Value::Variable { name, .. } => {
            v.enter_variable_usage(
                ctx,
                &VariableUsage {
                    name,
                    expected_type,
                    location_has_default,
                },
            );
        },
        ast::Value::List { values, .. } => {
            let item_type = expected_type.and_then(TypeRef::list_item);
            for item in values {
                visit_input_value_of_type(v, ctx, item, item_type, false);
            }
        },
        ast::Value::Object { fields, .. } => {
            let input_object = expected_type
                .and_then(|ty| ctx.schema.get_type(ty.innermost_name()))
                .and_then(GraphQLType::as_input_object);
            for field in fields {
                let field_def = input_object.and_then(|input| input.field(field.name.as_str()));
                visit_input_value(v, ctx, &field.value, field_def);
            }
        },
        ast::Value::Int { .. }
        | ast::Value::Float { .. }
        | ast::Value::String { .. }
        | ast::Value::Boolean { .. }
        | ast::Value::Null { .. }
        | ast::Value::Enum { .. } => {},
    }
}

fn visit_selection_set<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    selection_set: &'a ast::SelectionSet,
) {
    v.enter_selection_set(ctx, selection_set);
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => visit_field(v, ctx, field),
            ast::Selection::FragmentSpread(spread) => {
                v.enter_fragment_spread(ctx, spread);
                visit_directives(v, ctx, &spread.directives, DirectiveLocation::FragmentSpread);
                v.exit_fragment_spread(ctx, spread);
            },
            ast::Selection::InlineFragment(inline) => visit_inline_fragment(v, ctx, inline),
        }
    }
    v.exit_selection_set(ctx, selection_set);
}

fn visit_field<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    field: &'a ast::Field,
) {
    let parent = ctx.current_type();
    let definition = parent
        .and_then(GraphQLType::fields)
        .and_then(|fields| fields.get(field.name.as_str()));
    let output_type = match definition {
        Some(def) => ctx.schema.get_type(def.ty.innermost_name()),
        None if field.name.as_str() == "__typename" => ctx.schema.get_type("String"),
        None => None,
    };

    ctx.with_type(output_type, |ctx| {
        v.enter_field(ctx, field);
        visit_arguments(v, ctx, &field.arguments, definition.map(|d| &d.arguments));
        visit_directives(v, ctx, &field.directives, DirectiveLocation::Field);
        if let Some(selection_set) = &field.selection_set {
            visit_selection_set(v, ctx, selection_set);
        }
        v.exit_field(ctx, field);
    });
}

fn visit_inline_fragment<'a, V: Visitor<'a>>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    inline: &'a ast::InlineFragment,
) {
    let condition = match &inline.type_condition {
        Some(name) => ctx.schema.get_type(name.as_str()),
        None => ctx.current_type(),
    };
    ctx.with_type(condition, |ctx| {
        v.enter_inline_fragment(ctx, inline);
        visit_directives(v, ctx, &inline.directives, DirectiveLocation::InlineFragment);
        visit_selection_set(v, ctx, &inline.selection_set);
        v.exit_inline_fragment(ctx, inline);
    });
}
