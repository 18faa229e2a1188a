use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::SourcePosition;
use crate::ast;
use crate::InvalidValueReason;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;

/// Errors are boxed so that every production's `Result` stays small; deeply
/// nested documents recurse through these frames.
type Result<T> = std::result::Result<T, Box<GraphQLParseError>>;

const EXECUTABLE_DEFINITION_STARTS: &[&str] =
    &["query", "mutation", "subscription", "fragment", "{"];

const TYPE_SYSTEM_KEYWORDS: &[&str] = &[
    "directive",
    "enum",
    "extend",
    "input",
    "interface",
    "scalar",
    "schema",
    "type",
    "union",
];

/// Whether a value literal may reference variables.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ConstContext {
    /// Arguments of fields and directives inside selection sets.
    AllowVariables,
    /// Variable default values and directives on variable definitions.
    VariableDefinition,
}

/// Delimited constructs, named in "unclosed" diagnostics.
#[derive(Clone, Copy, Debug)]
enum DelimiterContext {
    Arguments,
    ListType,
    ListValue,
    ObjectValue,
    SelectionSet,
    VariableDefinitions,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            DelimiterContext::Arguments => "argument list",
            DelimiterContext::ListType => "list type",
            DelimiterContext::ListValue => "list value",
            DelimiterContext::ObjectValue => "object value",
            DelimiterContext::SelectionSet => "selection set",
            DelimiterContext::VariableDefinitions => "variable definitions",
        }
    }
}

/// A recursive-descent parser for executable GraphQL documents.
///
/// There is one method per grammar production. The first fault aborts the
/// parse; no error recovery is attempted.
///
/// ```rust
/// use graphql_engine_parser::GraphQLParser;
///
/// let doc = GraphQLParser::new("query Q($id: ID!) { node(id: $id) { id } }")
///     .parse_executable_document()
///     .unwrap();
/// assert_eq!(doc.operations().count(), 1);
/// ```
pub struct GraphQLParser<'src, TTokenSource = StrGraphQLTokenSource<'src>>
where
    TTokenSource: GraphQLTokenSource<'src>,
{
    token_stream: GraphQLTokenStream<'src, TTokenSource>,
    /// End of the most recently consumed token; anchors EOF diagnostics and
    /// the end of node spans.
    last_end_position: Option<SourcePosition>,
    recursion_depth: usize,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    pub fn new(source: &'src str) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::new(source))
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Nesting deeper than this many selection sets, list/object values or
    /// list types is rejected.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            last_end_position: None,
            recursion_depth: 0,
        }
    }

    // =========================================================================
    // Document
    // =========================================================================

    pub fn parse_executable_document(
        mut self,
    ) -> std::result::Result<ast::Document, GraphQLParseError> {
        self.parse_document().map_err(|error| *error)
    }

    fn parse_document(&mut self) -> Result<ast::Document> {
        let start = self.peek_token()?.span.clone();
        let mut definitions = Vec::new();
        while !self.token_stream.is_at_end() {
            definitions.push(self.parse_definition()?);
        }
        if definitions.is_empty() {
            let mut error = GraphQLParseError::new(
                "expected at least one operation or fragment definition, \
                 found end of input",
                self.eof_span(),
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "document".to_string(),
                },
            );
            error.add_spec("https://spec.graphql.org/October2021/#Document");
            return Err(Box::new(error));
        }
        Ok(ast::Document {
            definitions,
            span: self.make_span(start),
        })
    }

    fn parse_definition(&mut self) -> Result<ast::Definition> {
        let token = self.peek_token()?.clone();
        match &token.kind {
            GraphQLTokenKind::CurlyBraceOpen => self
                .parse_operation_definition()
                .map(ast::Definition::Operation),
            GraphQLTokenKind::Name(name)
                if ast::OperationKind::from_keyword(name).is_some() =>
            {
                self.parse_operation_definition()
                    .map(ast::Definition::Operation)
            },
            GraphQLTokenKind::Name(name) if *name == "fragment" => self
                .parse_fragment_definition()
                .map(ast::Definition::Fragment),
            GraphQLTokenKind::Name(name)
                if TYPE_SYSTEM_KEYWORDS.contains(&&**name) =>
            {
                let mut error =
                    self.unexpected_token_error(EXECUTABLE_DEFINITION_STARTS, &token);
                error.add_note(
                    "type system definitions are not allowed in an \
                     executable document",
                );
                Err(error)
            },
            _ => Err(self.unexpected_token_error(
                EXECUTABLE_DEFINITION_STARTS,
                &token,
            )),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// `OperationType Name? VariableDefinitions? Directives? SelectionSet`,
    /// or a bare `SelectionSet` (the query shorthand).
    fn parse_operation_definition(
        &mut self,
    ) -> Result<ast::OperationDefinition> {
        if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            let selection_set = self.parse_selection_set()?;
            return Ok(ast::OperationDefinition {
                operation: ast::OperationKind::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                span: selection_set.span.clone(),
                selection_set,
                shorthand: true,
            });
        }

        let keyword = self.expect_ast_name()?;
        let operation = ast::OperationKind::from_keyword(&keyword.value)
            .ok_or_else(|| {
                GraphQLParseError::new(
                    format!(
                        "expected `query`, `mutation` or `subscription`, found \
                         `{}`",
                        keyword.value,
                    ),
                    keyword.span.clone(),
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec![
                            "query".to_string(),
                            "mutation".to_string(),
                            "subscription".to_string(),
                        ],
                        found: keyword.value.clone(),
                    },
                )
            })?;

        let name = if self.peek_is_name() {
            Some(self.expect_ast_name()?)
        } else {
            None
        };
        let variable_definitions = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::OperationDefinition {
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
            shorthand: false,
            span: self.make_span(keyword.span),
        })
    }

    fn parse_variable_definitions(
        &mut self,
    ) -> Result<Vec<ast::VariableDefinition>> {
        let open = self.expect(&GraphQLTokenKind::ParenOpen)?.span;
        let mut definitions = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            self.check_unclosed(&open, "(", DelimiterContext::VariableDefinitions)?;
            definitions.push(self.parse_variable_definition()?);
        }
        let close = self.expect(&GraphQLTokenKind::ParenClose)?.span;
        if definitions.is_empty() {
            return Err(self.empty_construct_error(
                close,
                "variable definitions",
                "remove the empty `()` or declare at least one variable",
            ));
        }
        Ok(definitions)
    }

    /// `$name: Type (= DefaultValue)? Directives?`
    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition> {
        let dollar = self.expect(&GraphQLTokenKind::Dollar)?.span;
        let variable = self.expect_ast_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;
        let default_value = if self.peek_is(&GraphQLTokenKind::Equals) {
            self.consume_token();
            Some(self.parse_value(ConstContext::VariableDefinition)?)
        } else {
            None
        };
        let directives =
            self.parse_directive_annotations(ConstContext::VariableDefinition)?;
        Ok(ast::VariableDefinition {
            variable,
            var_type,
            default_value,
            directives,
            span: self.make_span(dollar),
        })
    }

    // =========================================================================
    // Type references
    // =========================================================================

    /// `Name`, `[Type]`, each optionally followed by `!`. The `!` is checked
    /// only after the wrapped type has been fully parsed, so in `[T!]!` the
    /// inner `!` belongs to `T` and the outer one to the list.
    fn parse_type_annotation(&mut self) -> Result<ast::TypeAnnotation> {
        self.enter_recursion()?;
        let result = self.parse_type_annotation_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_annotation_impl(&mut self) -> Result<ast::TypeAnnotation> {
        if self.peek_is(&GraphQLTokenKind::SquareBracketOpen) {
            let open = self.expect(&GraphQLTokenKind::SquareBracketOpen)?.span;
            self.check_unclosed(&open, "[", DelimiterContext::ListType)?;
            let element_type = self.parse_type_annotation()?;
            self.check_unclosed(&open, "[", DelimiterContext::ListType)?;
            self.expect(&GraphQLTokenKind::SquareBracketClose)?;
            let nullability = self.parse_nullability();
            return Ok(ast::TypeAnnotation::List(ast::ListTypeAnnotation {
                element_type: Box::new(element_type),
                nullability,
                span: self.make_span(open),
            }));
        }

        let name = self.expect_ast_name()?;
        let start = name.span.clone();
        let nullability = self.parse_nullability();
        Ok(ast::TypeAnnotation::Named(ast::NamedTypeAnnotation {
            name,
            nullability,
            span: self.make_span(start),
        }))
    }

    fn parse_nullability(&mut self) -> ast::Nullability {
        if self.peek_is(&GraphQLTokenKind::Bang) {
            self.consume_token();
            ast::Nullability::NonNull
        } else {
            ast::Nullability::Nullable
        }
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl();
        self.exit_recursion();
        result
    }

    fn parse_selection_set_impl(&mut self) -> Result<ast::SelectionSet> {
        let open = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?.span;
        let mut selections = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            self.check_unclosed(&open, "{", DelimiterContext::SelectionSet)?;
            selections.push(self.parse_selection()?);
        }
        let close = self.expect(&GraphQLTokenKind::CurlyBraceClose)?.span;
        if selections.is_empty() {
            return Err(self.empty_construct_error(
                close,
                "selection set",
                "select at least one field",
            ));
        }
        Ok(ast::SelectionSet {
            selections,
            span: self.make_span(open),
        })
    }

    /// After `...`: a name other than `on` starts a fragment spread; `on`
    /// starts an inline fragment with a type condition; anything else is an
    /// inline fragment without one.
    fn parse_selection(&mut self) -> Result<ast::Selection> {
        if !self.peek_is(&GraphQLTokenKind::Ellipsis) {
            return self.parse_field().map(ast::Selection::Field);
        }

        let ellipsis = self.expect(&GraphQLTokenKind::Ellipsis)?.span;
        if self.peek_is_name() && !self.peek_is_keyword("on") {
            let name = self.expect_ast_name()?;
            let directives =
                self.parse_directive_annotations(ConstContext::AllowVariables)?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                name,
                directives,
                span: self.make_span(ellipsis),
            }));
        }

        let type_condition = if self.peek_is_keyword("on") {
            self.consume_token();
            Some(self.expect_ast_name()?)
        } else {
            None
        };
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selection_set,
            span: self.make_span(ellipsis),
        }))
    }

    /// `(Alias :)? Name Arguments? Directives? SelectionSet?`
    fn parse_field(&mut self) -> Result<ast::Field> {
        let first = self.expect_ast_name()?;
        let start = first.span.clone();
        let (alias, name) = if self.peek_is(&GraphQLTokenKind::Colon) {
            self.consume_token();
            (Some(first), self.expect_ast_name()?)
        } else {
            (None, first)
        };

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_arguments(ConstContext::AllowVariables)?
        } else {
            Vec::new()
        };
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            span: self.make_span(start),
        })
    }

    fn parse_arguments(
        &mut self,
        context: ConstContext,
    ) -> Result<Vec<ast::Argument>> {
        let open = self.expect(&GraphQLTokenKind::ParenOpen)?.span;
        let mut arguments = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::ParenClose) {
                break;
            }
            self.check_unclosed(&open, "(", DelimiterContext::Arguments)?;
            let name = self.expect_ast_name()?;
            let start = name.span.clone();
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            arguments.push(ast::Argument {
                name,
                value,
                span: self.make_span(start),
            });
        }
        let close = self.expect(&GraphQLTokenKind::ParenClose)?.span;
        if arguments.is_empty() {
            return Err(self.empty_construct_error(
                close,
                "argument list",
                "remove the empty `()` or pass at least one argument",
            ));
        }
        Ok(arguments)
    }

    fn parse_directive_annotations(
        &mut self,
        context: ConstContext,
    ) -> Result<Vec<ast::DirectiveAnnotation>> {
        let mut directives = Vec::new();
        while self.peek_is(&GraphQLTokenKind::At) {
            let at = self.expect(&GraphQLTokenKind::At)?.span;
            let name = self.expect_ast_name()?;
            let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
                self.parse_arguments(context)?
            } else {
                Vec::new()
            };
            directives.push(ast::DirectiveAnnotation {
                name,
                arguments,
                span: self.make_span(at),
            });
        }
        Ok(directives)
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    /// `fragment Name VariableDefinitions? on Type Directives? SelectionSet`
    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition> {
        let keyword = self.expect_keyword("fragment")?;
        let name = self.expect_ast_name()?;
        if name.value == "on" {
            let mut error = GraphQLParseError::new(
                "a fragment may not be named `on`",
                name.span.clone(),
                GraphQLParseErrorKind::ReservedName {
                    name: name.value.clone(),
                },
            );
            error.add_help("`on` introduces a type condition; choose another name");
            error.add_spec("https://spec.graphql.org/October2021/#FragmentName");
            return Err(Box::new(error));
        }
        let variable_definitions = if self.peek_is(&GraphQLTokenKind::ParenOpen) {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };
        self.expect_keyword("on")?;
        let type_condition = self.expect_ast_name()?;
        let directives = self.parse_directive_annotations(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            variable_definitions,
            directives,
            selection_set,
            span: self.make_span(keyword),
        })
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, context: ConstContext) -> Result<ast::Value> {
        self.enter_recursion()?;
        let result = self.parse_value_impl(context);
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self, context: ConstContext) -> Result<ast::Value> {
        let token = self.peek_token()?.clone();
        match &token.kind {
            GraphQLTokenKind::Dollar => {
                if context == ConstContext::VariableDefinition {
                    let mut error = GraphQLParseError::new(
                        "variables are not allowed in default values",
                        token.span.clone(),
                        GraphQLParseErrorKind::InvalidSyntax,
                    );
                    error.add_help("use a constant literal instead");
                    return Err(Box::new(error));
                }
                let dollar = self.expect(&GraphQLTokenKind::Dollar)?.span;
                let name = self.expect_ast_name()?;
                Ok(ast::Value::Variable {
                    name,
                    span: self.make_span(dollar),
                })
            },
            GraphQLTokenKind::IntValue(_)
            | GraphQLTokenKind::FloatValue(_)
            | GraphQLTokenKind::StringValue(_)
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Name(_) => {
                let token = self.consume_required()?;
                Self::scalar_value_from_token(token)
            },
            GraphQLTokenKind::SquareBracketOpen => self.parse_list_value(context),
            GraphQLTokenKind::CurlyBraceOpen => self.parse_object_value(context),
            _ => Err(self.unexpected_token_error(&["value"], &token)),
        }
    }

    fn scalar_value_from_token(token: GraphQLToken<'src>) -> Result<ast::Value> {
        let span = token.span;
        let value = match token.kind {
            // Range checks belong to the type the literal is coerced to.
            GraphQLTokenKind::IntValue(raw) => ast::Value::Int {
                raw: raw.into_owned(),
                span,
            },
            GraphQLTokenKind::FloatValue(raw) => {
                if !raw.parse::<f64>().is_ok_and(f64::is_finite) {
                    return Err(Box::new(GraphQLParseError::new(
                        format!("float literal `{raw}` is out of range"),
                        span,
                        GraphQLParseErrorKind::InvalidValue(
                            InvalidValueReason::FloatNotFinite(raw.into_owned()),
                        ),
                    )));
                }
                ast::Value::Float {
                    raw: raw.into_owned(),
                    span,
                }
            },
            GraphQLTokenKind::StringValue(ref raw) => {
                let block = raw.starts_with("\"\"\"");
                match token.kind.parse_string_value() {
                    Some(Ok(value)) => ast::Value::String { value, block, span },
                    Some(Err(err)) => {
                        return Err(Box::new(GraphQLParseError::new(
                            err.to_string(),
                            span,
                            GraphQLParseErrorKind::InvalidValue(err.into()),
                        )));
                    },
                    None => unreachable!("token is a StringValue"),
                }
            },
            GraphQLTokenKind::True => ast::Value::Boolean { value: true, span },
            GraphQLTokenKind::False => ast::Value::Boolean { value: false, span },
            GraphQLTokenKind::Null => ast::Value::Null { span },
            GraphQLTokenKind::Name(name) => ast::Value::Enum {
                value: name.into_owned(),
                span,
            },
            other => {
                return Err(Box::new(GraphQLParseError::new(
                    format!("expected value, found {}", other.display()),
                    span,
                    GraphQLParseErrorKind::UnexpectedToken {
                        expected: vec!["value".to_string()],
                        found: other.display(),
                    },
                )));
            },
        };
        Ok(value)
    }

    fn parse_list_value(&mut self, context: ConstContext) -> Result<ast::Value> {
        let open = self.expect(&GraphQLTokenKind::SquareBracketOpen)?.span;
        let mut values = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::SquareBracketClose) {
                break;
            }
            self.check_unclosed(&open, "[", DelimiterContext::ListValue)?;
            values.push(self.parse_value(context)?);
        }
        self.expect(&GraphQLTokenKind::SquareBracketClose)?;
        Ok(ast::Value::List {
            values,
            span: self.make_span(open),
        })
    }

    fn parse_object_value(&mut self, context: ConstContext) -> Result<ast::Value> {
        let open = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?.span;
        let mut fields = Vec::new();
        loop {
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose) {
                break;
            }
            self.check_unclosed(&open, "{", DelimiterContext::ObjectValue)?;
            let name = self.expect_ast_name()?;
            let start = name.span.clone();
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            fields.push(ast::ObjectField {
                name,
                value,
                span: self.make_span(start),
            });
        }
        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(ast::Value::Object {
            fields,
            span: self.make_span(open),
        })
    }

    // =========================================================================
    // Token expectation helpers
    // =========================================================================

    /// Peeks at the next token, turning lexer errors and exhaustion into
    /// parse errors.
    fn peek_token(&mut self) -> Result<&GraphQLToken<'src>> {
        let eof_span = self.eof_span();
        match self.token_stream.peek() {
            None => Err(Box::new(GraphQLParseError::new(
                "unexpected end of input",
                eof_span,
                GraphQLParseErrorKind::UnexpectedEof { expected: vec![] },
            ))),
            Some(GraphQLToken {
                kind: GraphQLTokenKind::Error { message, error_notes },
                span,
            }) => Err(Box::new(GraphQLParseError::from_lexer_error(
                message.clone(),
                span.clone(),
                error_notes.clone(),
            ))),
            Some(token) => Ok(token),
        }
    }

    fn consume_required(&mut self) -> Result<GraphQLToken<'src>> {
        self.peek_token()?;
        match self.consume_token() {
            Some(token) => Ok(token),
            None => Err(Box::new(GraphQLParseError::new(
                "unexpected end of input",
                self.eof_span(),
                GraphQLParseErrorKind::UnexpectedEof { expected: vec![] },
            ))),
        }
    }

    fn expect(&mut self, expected_kind: &GraphQLTokenKind) -> Result<GraphQLToken<'src>> {
        let token = self.peek_token()?.clone();
        if Self::token_kinds_match(&token.kind, expected_kind) {
            return self.consume_required();
        }
        let expected = Self::token_kind_display(expected_kind);
        Err(self.unexpected_token_error(&[expected.as_str()], &token))
    }

    /// Accepts `true`, `false` and `null` as names: they match the Name
    /// grammar even though the lexer gives them their own token kinds.
    fn expect_ast_name(&mut self) -> Result<ast::Name> {
        if !self.peek_is_name() {
            let token = self.peek_token()?.clone();
            return Err(self.unexpected_token_error(&["name"], &token));
        }
        let token = self.consume_required()?;
        let value = match token.kind {
            GraphQLTokenKind::Name(name) => name.into_owned(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            _ => unreachable!("peek_is_name() checked the token kind"),
        };
        Ok(ast::Name {
            value,
            span: token.span,
        })
    }

    /// Structural keywords are `Name` tokens; `true`/`false`/`null` never
    /// match here.
    fn expect_keyword(&mut self, keyword: &str) -> Result<GraphQLSourceSpan> {
        if self.peek_is_keyword(keyword) {
            return Ok(self.consume_required()?.span);
        }
        let token = self.peek_token()?.clone();
        Err(self.unexpected_token_error(&[keyword], &token))
    }

    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        matches!(
            self.token_stream.peek(),
            Some(GraphQLToken { kind: GraphQLTokenKind::Name(name), .. })
                if *name == keyword
        )
    }

    fn peek_is_name(&mut self) -> bool {
        matches!(
            self.token_stream.peek().map(|token| &token.kind),
            Some(
                GraphQLTokenKind::Name(_)
                    | GraphQLTokenKind::True
                    | GraphQLTokenKind::False
                    | GraphQLTokenKind::Null
            )
        )
    }

    fn peek_is(&mut self, kind: &GraphQLTokenKind) -> bool {
        self.token_stream
            .peek()
            .is_some_and(|token| Self::token_kinds_match(&token.kind, kind))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(token) = &token {
            self.last_end_position = Some(token.span.end_exclusive.clone());
        }
        token
    }

    fn eof_span(&self) -> GraphQLSourceSpan {
        GraphQLSourceSpan::empty_at(self.last_end_position.clone().unwrap_or_default())
    }

    /// A span from the start of `start` to the end of the last consumed
    /// token.
    fn make_span(&self, start: GraphQLSourceSpan) -> GraphQLSourceSpan {
        let end = self
            .last_end_position
            .clone()
            .unwrap_or_else(|| start.end_exclusive.clone());
        GraphQLSourceSpan::new(start.start_inclusive, end)
    }

    /// Fails with an "unclosed delimiter" error when the input ends inside
    /// the construct opened at `open`.
    fn check_unclosed(
        &mut self,
        open: &GraphQLSourceSpan,
        delimiter: &str,
        context: DelimiterContext,
    ) -> Result<()> {
        if !self.token_stream.is_at_end() {
            return Ok(());
        }
        let closing = match delimiter {
            "{" => "}",
            "[" => "]",
            _ => ")",
        };
        let mut error = GraphQLParseError::new(
            format!("expected `{closing}`, found end of input"),
            self.eof_span(),
            GraphQLParseErrorKind::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            },
        );
        error.add_note_with_span(
            format!("opening `{delimiter}` of {} here", context.description()),
            open.clone(),
        );
        Err(Box::new(error))
    }

    fn empty_construct_error(
        &self,
        close: GraphQLSourceSpan,
        construct: &str,
        help: &str,
    ) -> Box<GraphQLParseError> {
        let mut error = GraphQLParseError::new(
            format!("{construct} may not be empty"),
            close,
            GraphQLParseErrorKind::InvalidEmptyConstruct {
                construct: construct.to_string(),
            },
        );
        error.add_help(help);
        Box::new(error)
    }

    fn unexpected_token_error(
        &self,
        expected: &[&str],
        found: &GraphQLToken<'src>,
    ) -> Box<GraphQLParseError> {
        let expected_list = expected
            .iter()
            .map(|e| format!("`{e}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let expected_owned = expected.iter().map(|e| e.to_string()).collect();
        if matches!(found.kind, GraphQLTokenKind::Eof) {
            return Box::new(GraphQLParseError::new(
                format!("expected {expected_list}, found end of input"),
                found.span.clone(),
                GraphQLParseErrorKind::UnexpectedEof {
                    expected: expected_owned,
                },
            ));
        }
        let found_display = found.kind.display();
        Box::new(GraphQLParseError::new(
            format!("expected {expected_list}, found {found_display}"),
            found.span.clone(),
            GraphQLParseErrorKind::UnexpectedToken {
                expected: expected_owned,
                found: found_display,
            },
        ))
    }

    fn token_kind_display(kind: &GraphQLTokenKind) -> String {
        match kind {
            GraphQLTokenKind::Name(_) => "name".to_string(),
            GraphQLTokenKind::IntValue(_) => "integer".to_string(),
            GraphQLTokenKind::FloatValue(_) => "float".to_string(),
            GraphQLTokenKind::StringValue(_) => "string".to_string(),
            GraphQLTokenKind::True => "true".to_string(),
            GraphQLTokenKind::False => "false".to_string(),
            GraphQLTokenKind::Null => "null".to_string(),
            GraphQLTokenKind::Eof => "end of input".to_string(),
            GraphQLTokenKind::Error { message, .. } => message.clone(),
            punct => punct.as_punctuator_str().unwrap_or("?").to_string(),
        }
    }

    /// Compares token kinds by variant, ignoring payloads. The match on
    /// `actual` is exhaustive so that new token kinds must be handled here.
    fn token_kinds_match(actual: &GraphQLTokenKind, expected: &GraphQLTokenKind) -> bool {
        match actual {
            GraphQLTokenKind::Name(_) => matches!(expected, GraphQLTokenKind::Name(_)),
            GraphQLTokenKind::IntValue(_) => matches!(expected, GraphQLTokenKind::IntValue(_)),
            GraphQLTokenKind::FloatValue(_) => {
                matches!(expected, GraphQLTokenKind::FloatValue(_))
            },
            GraphQLTokenKind::StringValue(_) => {
                matches!(expected, GraphQLTokenKind::StringValue(_))
            },
            GraphQLTokenKind::Error { .. } => matches!(expected, GraphQLTokenKind::Error { .. }),
            GraphQLTokenKind::Ampersand
            | GraphQLTokenKind::At
            | GraphQLTokenKind::Bang
            | GraphQLTokenKind::Colon
            | GraphQLTokenKind::CurlyBraceClose
            | GraphQLTokenKind::CurlyBraceOpen
            | GraphQLTokenKind::Dollar
            | GraphQLTokenKind::Ellipsis
            | GraphQLTokenKind::Equals
            | GraphQLTokenKind::ParenClose
            | GraphQLTokenKind::ParenOpen
            | GraphQLTokenKind::Pipe
            | GraphQLTokenKind::SquareBracketClose
            | GraphQLTokenKind::SquareBracketOpen
            | GraphQLTokenKind::True
            | GraphQLTokenKind::False
            | GraphQLTokenKind::Null
            | GraphQLTokenKind::Eof => actual == expected,
        }
    }

    fn enter_recursion(&mut self) -> Result<()> {
        if self.recursion_depth >= Self::MAX_RECURSION_DEPTH {
            let span = self
                .token_stream
                .peek()
                .map(|token| token.span.clone())
                .unwrap_or_else(|| self.eof_span());
            return Err(Box::new(GraphQLParseError::new(
                format!(
                    "maximum nesting depth of {} exceeded",
                    Self::MAX_RECURSION_DEPTH,
                ),
                span,
                GraphQLParseErrorKind::RecursionLimitExceeded,
            )));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }
}
