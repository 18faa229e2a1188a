//! The resolved execution IR: selection sets with variables substituted
//! and fragment spreads bound to their (shared) resolved definitions.
//!
//! Selections and fragment spreads are kept side by side rather than merged
//! so the same response key may appear more than once; [`flatten`] merges
//! them right before a selection set is executed.

mod flatten;
mod resolve;

pub use flatten::DirectiveError;
pub use flatten::flatten;
pub use flatten::flatten_for_type;
pub use flatten::should_include;
pub use resolve::apply_selection_set;

use crate::resolver::Arguments;
use graphql_engine_parser::ast::AstPos;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    /// Sorted by [`FragmentSpread::position`].
    pub fragments: Vec<FragmentSpread>,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.fragments.is_empty()
    }
}

/// A field selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// The response key: the alias if one was given, otherwise the name.
    pub alias: String,
    pub name: String,
    /// Argument values with variables substituted. Arguments bound to an
    /// unset variable are absent.
    pub args: Arguments,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
    pub location: AstPos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub args: Arguments,
    pub location: AstPos,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&crate::Value> {
        self.args.get(name)
    }
}

/// A named fragment spread or an inline fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub fragment: Arc<FragmentDefinition>,
    pub directives: Vec<Directive>,
    /// How many of the enclosing set's selections precede this spread.
    pub position: usize,
    pub location: AstPos,
}

/// A fragment definition with its selection set resolved. Inline fragments
/// resolve to anonymous definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Option<String>,
    /// `None` for an inline fragment without a type condition.
    pub type_condition: Option<String>,
    pub selection_set: SelectionSet,
    pub location: AstPos,
}
