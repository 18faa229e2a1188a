use crate::coercion::coerce_literal;
use crate::schema::DirectiveLocation;
use crate::schema::InputValueDefinition;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use indexmap::IndexMap;

/// What a list of arguments is applied to.
enum ArgumentOwner<'a> {
    Field { type_name: &'a str, field_name: &'a str },
    Directive { name: &'a str },
}

impl ArgumentOwner<'_> {
    fn unknown_argument(&self, argument: &str) -> String {
        match self {
            ArgumentOwner::Field {
                type_name,
                field_name,
            } => format!("Unknown argument \"{argument}\" on field \"{type_name}.{field_name}\"."),
            ArgumentOwner::Directive { name } => {
                format!("Unknown argument \"{argument}\" on directive \"@{name}\".")
            },
        }
    }

    fn missing_argument(&self, definition: &InputValueDefinition) -> String {
        let owner = match self {
            ArgumentOwner::Field { field_name, .. } => format!("Field \"{field_name}\""),
            ArgumentOwner::Directive { name } => format!("Directive \"@{name}\""),
        };
        format!(
            "{owner} argument \"{}\" of type \"{}\" is required, but it was not provided.",
            definition.name(),
            definition.ty(),
        )
    }
}

/// Arguments of fields and directives: names are unique and known, every
/// required argument is given, and every literal fits its type.
pub struct ValidArguments;

fn check_arguments<'a>(
    ctx: &mut VisitorContext<'a>,
    owner: ArgumentOwner<'a>,
    definitions: &'a IndexMap<String, InputValueDefinition>,
    arguments: &'a [ast::Argument],
    owner_location: AstPos,
) {
    for (idx, argument) in arguments.iter().enumerate() {
        let name = argument.name.as_str();
        if let Some(first) = arguments[..idx].iter().find(|prev| prev.name.as_str() == name) {
            ctx.report_error(
                vec![first.name.location(), argument.name.location()],
                format!("There can be only one argument named \"{name}\"."),
            );
            continue;
        }

        let Some(definition) = definitions.get(name) else {
            ctx.report_error(vec![argument.location()], owner.unknown_argument(name));
            continue;
        };

        if let Err(err) = coerce_literal(ctx.schema, definition.ty(), &argument.value, None, name) {
            ctx.report_error(
                vec![argument.value.location()],
                format!("Argument \"{name}\" has invalid value {}: {err}", argument.value),
            );
        }
    }

    for definition in definitions.values() {
        let provided = arguments.iter().any(|arg| arg.name.as_str() == definition.name());
        if !provided && definition.is_required() {
            ctx.report_error(vec![owner_location], owner.missing_argument(definition));
        }
    }
}

impl<'a> Visitor<'a> for ValidArguments {
    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a ast::Field) {
        let Some(parent_type) = ctx.parent_type() else {
            return;
        };
        let Some(definition) = parent_type
            .fields()
            .and_then(|fields| fields.get(field.name.as_str()))
        else {
            return;
        };
        check_arguments(
            ctx,
            ArgumentOwner::Field {
                type_name: parent_type.name(),
                field_name: field.name.as_str(),
            },
            &definition.arguments,
            &field.arguments,
            field.location(),
        );
    }

    fn enter_directive(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        _location: DirectiveLocation,
    ) {
        let Some(definition) = ctx.schema.directive(directive.name.as_str()) else {
            return;
        };
        check_arguments(
            ctx,
            ArgumentOwner::Directive {
                name: directive.name.as_str(),
            },
            &definition.arguments,
            &directive.arguments,
            directive.location(),
        );
    }
}
