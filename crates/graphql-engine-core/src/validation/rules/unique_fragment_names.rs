use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use graphql_engine_parser::ast::AstPos;
use std::collections::HashMap;

#[derive(Default)]
pub struct UniqueFragmentNames<'a> {
    names: HashMap<&'a str, AstPos>,
}

impl<'a> Visitor<'a> for UniqueFragmentNames<'a> {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        let name = &fragment.name;
        match self.names.get(name.as_str()) {
            Some(first) => ctx.report_error(
                vec![*first, name.location()],
                format!("There can be only one fragment named \"{name}\"."),
            ),
            None => {
                self.names.insert(name.as_str(), name.location());
            },
        }
    }
}
