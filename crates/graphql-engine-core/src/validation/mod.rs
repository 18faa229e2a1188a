//! Static checks of an executable document against a schema.
//!
//! Every rule runs over the whole document and every violation is reported;
//! validation never stops at the first error (except for the depth limit,
//! which is checked first and short-circuits).

mod rules;
mod utils;
mod visitor;

use crate::GraphQLError;
use crate::coercion::Variables;
use crate::coercion::coerce_variables;
use crate::schema::Schema;
use graphql_engine_parser::ast;
use rules::*;
use visitor::VisitorContext;
use visitor::VisitorNil;
use visitor::visit;

/// Limits applied during validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Deepest field nesting allowed, root fields counting as depth 1.
    /// `None` (or `0`) disables the check.
    pub max_depth: Option<usize>,
}

/// Validates `document` against `schema`, returning every error found.
///
/// When `variables` are given and the document holds exactly one
/// operation, they are also checked against that operation's variable
/// definitions.
pub fn validate(
    schema: &Schema,
    document: &ast::Document,
    variables: Option<&Variables>,
    options: &ValidationOptions,
) -> Vec<GraphQLError> {
    let mut ctx = VisitorContext::new(schema, document);

    if let Some(max_depth) = options.max_depth.filter(|depth| *depth > 0) {
        let errors = check_max_depth(&ctx, max_depth);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), max_depth, "document exceeds depth limit");
            return errors;
        }
    }

    let mut visitor = VisitorNil
        .with(UniqueOperationNames::default())
        .with(LoneAnonymousOperation::default())
        .with(KnownOperationTypes)
        .with(SingleFieldSubscriptions)
        .with(KnownTypeNames)
        .with(FragmentsOnCompositeTypes)
        .with(VariablesAreInputTypes)
        .with(ScalarLeafs)
        .with(FieldsOnCorrectType)
        .with(UniqueFragmentNames::default())
        .with(KnownFragmentNames)
        .with(NoUnusedFragments)
        .with(PossibleFragmentSpreads)
        .with(NoFragmentCycles)
        .with(UniqueVariableNames::default())
        .with(NoUndefinedVariables::default())
        .with(NoUnusedVariables::default())
        .with(KnownDirectives)
        .with(UniqueDirectivesPerLocation)
        .with(ValidArguments)
        .with(DefaultValuesOfCorrectType)
        .with(VariablesInAllowedPosition::default())
        .with(OverlappingFieldsCanBeMerged::default());
    visit(&mut visitor, &mut ctx, document);

    let mut errors = ctx.errors;
    if let Some(variables) = variables {
        let mut operations = document.operations();
        if let (Some(operation), None) = (operations.next(), operations.next())
            && let Err(variable_errors) =
                coerce_variables(schema, &operation.variable_definitions, variables)
        {
            errors.extend(variable_errors);
        }
    }

    tracing::debug!(errors = errors.len(), "validated document");
    errors
}
