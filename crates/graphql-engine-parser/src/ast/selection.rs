use crate::GraphQLSourceSpan;
use crate::ast::Argument;
use crate::ast::AstPos;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::ast_node::impl_ast_node;

/// The `{ ... }` block of selections at one nesting level.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub span: GraphQLSourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(inline) => &inline.directives,
        }
    }

    pub fn location(&self) -> AstPos {
        match self {
            Selection::Field(field) => field.location(),
            Selection::FragmentSpread(spread) => spread.location(),
            Selection::InlineFragment(inline) => inline.location(),
        }
    }
}

/// `alias: name(args) @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
    pub span: GraphQLSourceSpan,
}

impl Field {
    /// The key this field occupies in the response: its alias if present,
    /// otherwise its name.
    pub fn response_key(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).as_str()
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name.value == name)
    }
}

/// `...Name @directives`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: GraphQLSourceSpan,
}

/// `... on Type @directives { ... }`; the type condition is optional.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<Name>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: GraphQLSourceSpan,
}

impl_ast_node!(SelectionSet, Field, FragmentSpread, InlineFragment);
