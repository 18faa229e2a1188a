use crate::validation::utils::fragment_spreads;
use crate::validation::visitor::Visitor;
use crate::validation::visitor::VisitorContext;
use graphql_engine_parser::ast;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    /// On the current DFS path, at this index of the spread path.
    Visiting(usize),
    Visited,
}

/// No fragment may spread itself, directly or through other fragments.
///
/// Depth-first over the fragment graph; each cycle is reported once, with
/// every spread along it.
pub struct NoFragmentCycles;

struct CycleDetector<'a, 'ctx> {
    ctx: &'ctx VisitorContext<'a>,
    states: HashMap<&'a str, VisitState>,
    spread_path: Vec<&'a ast::FragmentSpread>,
    cycles: Vec<Vec<&'a ast::FragmentSpread>>,
}

impl<'a> CycleDetector<'a, '_> {
    fn detect(&mut self, fragment: &'a ast::FragmentDefinition) {
        let name = fragment.name.as_str();
        if self.states.contains_key(name) {
            return;
        }
        self.states.insert(name, VisitState::Visiting(self.spread_path.len()));

        for spread in fragment_spreads(&fragment.selection_set) {
            let target = spread.name.as_str();
            self.spread_path.push(spread);
            match self.states.get(target).copied() {
                Some(VisitState::Visiting(cycle_start)) => {
                    self.cycles.push(self.spread_path[cycle_start..].to_vec());
                },
                Some(VisitState::Visited) => (),
                None => {
                    if let Some(target_fragment) = self.ctx.fragment(target) {
                        self.detect(target_fragment);
                    }
                },
            }
            self.spread_path.pop();
        }

        self.states.insert(name, VisitState::Visited);
    }
}

impl<'a> Visitor<'a> for NoFragmentCycles {
    fn enter_document(&mut self, ctx: &mut VisitorContext<'a>, _doc: &'a ast::Document) {
        let fragments: Vec<_> = ctx.fragments().collect();
        let mut detector = CycleDetector {
            ctx,
            states: HashMap::new(),
            spread_path: vec![],
            cycles: vec![],
        };
        for fragment in fragments {
            detector.detect(fragment);
        }
        let cycles = detector.cycles;

        for cycle in cycles {
            let Some(last) = cycle.last() else {
                continue;
            };
            let via: Vec<String> = cycle[..cycle.len() - 1]
                .iter()
                .map(|spread| format!("\"{}\"", spread.name))
                .collect();
            let message = if via.is_empty() {
                format!("Cannot spread fragment \"{}\" within itself.", last.name)
            } else {
                format!(
                    "Cannot spread fragment \"{}\" within itself via {}.",
                    last.name,
                    via.join(", "),
                )
            };
            ctx.report_error(cycle.iter().map(|spread| spread.location()).collect(), message);
        }
    }
}
