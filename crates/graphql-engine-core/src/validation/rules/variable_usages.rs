use crate::schema::TypeRef;
use crate::validation::utils::fragment_spreads;
use crate::validation::visitor::VariableUsage;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashMap;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Scope<'a> {
    /// Index among the document's operations.
    Operation(usize),
    Fragment(&'a str),
}

#[derive(Clone, Copy)]
pub(crate) struct RecordedUsage<'a> {
    pub name: &'a ast::Name,
    pub expected_type: Option<&'a TypeRef>,
    pub location_has_default: bool,
}

/// Records variable usages per operation and per fragment, and answers
/// which usages an operation reaches through its fragment spreads.
///
/// Usages of a variable a fragment declares itself stay local to that
/// fragment.
#[derive(Default)]
pub(crate) struct VariableUsages<'a> {
    current: Option<Scope<'a>>,
    operation_count: usize,
    fragment_locals: HashSet<&'a str>,
    usages: HashMap<Scope<'a>, Vec<RecordedUsage<'a>>>,
}

impl<'a> VariableUsages<'a> {
    pub(crate) fn enter_operation(&mut self) {
        self.current = Some(Scope::Operation(self.operation_count));
        self.operation_count += 1;
        self.fragment_locals.clear();
    }

    pub(crate) fn enter_fragment(&mut self, fragment: &'a ast::FragmentDefinition) {
        self.current = Some(Scope::Fragment(fragment.name.as_str()));
        self.fragment_locals = fragment
            .variable_definitions
            .iter()
            .map(|def| def.variable.as_str())
            .collect();
    }

    pub(crate) fn record(&mut self, usage: &VariableUsage<'a>) {
        let Some(scope) = self.current else {
            return;
        };
        if matches!(scope, Scope::Fragment(_))
            && self.fragment_locals.contains(usage.name.as_str())
        {
            return;
        }
        self.usages.entry(scope).or_default().push(RecordedUsage {
            name: usage.name,
            expected_type: usage.expected_type,
            location_has_default: usage.location_has_default,
        });
    }

    /// Usages within the `index`th operation and every fragment it
    /// transitively spreads, in document order per scope.
    pub(crate) fn for_operation(
        &self,
        ctx: &VisitorContext<'a>,
        index: usize,
        operation: &'a ast::OperationDefinition,
    ) -> Vec<RecordedUsage<'a>> {
        let mut collected = self.scope_usages(Scope::Operation(index));
        let mut visited: HashSet<&str> = HashSet::new();
        let mut pending = fragment_spreads(&operation.selection_set);
        pending.reverse();
        while let Some(spread) = pending.pop() {
            let name = spread.name.as_str();
            if !visited.insert(name) {
                continue;
            }
            collected.extend(self.scope_usages(Scope::Fragment(name)));
            if let Some(fragment) = ctx.fragment(name) {
                let mut nested = fragment_spreads(&fragment.selection_set);
                nested.reverse();
                pending.extend(nested);
            }
        }
        collected
    }

    fn scope_usages(&self, scope: Scope<'a>) -> Vec<RecordedUsage<'a>> {
        self.usages.get(&scope).cloned().unwrap_or_default()
    }
}
