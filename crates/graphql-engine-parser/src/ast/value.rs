use crate::GraphQLSourceSpan;
use crate::ast::AstPos;
use crate::ast::Name;
use crate::ast::ast_node::impl_ast_node;

/// A value literal.
///
/// `Int` and `Float` keep the literal's source text so range checks can be
/// made against the type expected where the value is used. `String` holds
/// the decoded content.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable { name: Name, span: GraphQLSourceSpan },
    Int { raw: String, span: GraphQLSourceSpan },
    Float { raw: String, span: GraphQLSourceSpan },
    String { value: String, block: bool, span: GraphQLSourceSpan },
    Boolean { value: bool, span: GraphQLSourceSpan },
    Null { span: GraphQLSourceSpan },
    Enum { value: String, span: GraphQLSourceSpan },
    List { values: Vec<Value>, span: GraphQLSourceSpan },
    Object { fields: Vec<ObjectField>, span: GraphQLSourceSpan },
}

/// `name: value` inside an object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Value,
    pub span: GraphQLSourceSpan,
}

impl_ast_node!(ObjectField);

impl Value {
    pub fn span(&self) -> &GraphQLSourceSpan {
        match self {
            Value::Variable { span, .. }
            | Value::Int { span, .. }
            | Value::Float { span, .. }
            | Value::String { span, .. }
            | Value::Boolean { span, .. }
            | Value::Null { span }
            | Value::Enum { span, .. }
            | Value::List { span, .. }
            | Value::Object { span, .. } => span,
        }
    }

    pub fn location(&self) -> AstPos {
        self.span().start_pos()
    }

    /// The literal as an `i64`, or `None` if it is not an `Int` literal or
    /// does not fit.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int { raw, .. } => raw.parse().ok(),
            _ => None,
        }
    }

    /// Like [`Value::as_i64`], wide enough for unsigned 64-bit literals.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int { raw, .. } => raw.parse().ok(),
            _ => None,
        }
    }

    /// `Int` and `Float` literals as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int { raw, .. } | Value::Float { raw, .. } => {
                raw.parse().ok()
            },
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Value::Variable { .. })
    }

    /// Calls `visit` for every variable reference inside this value,
    /// including those nested in lists and objects.
    pub fn for_each_variable<'a>(&'a self, visit: &mut impl FnMut(&'a Name)) {
        match self {
            Value::Variable { name, .. } => visit(name),
            Value::List { values, .. } => {
                for value in values {
                    value.for_each_variable(visit);
                }
            },
            Value::Object { fields, .. } => {
                for field in fields {
                    field.value.for_each_variable(visit);
                }
            },
            Value::Int { .. }
            | Value::Float { .. }
            | Value::String { .. }
            | Value::Boolean { .. }
            | Value::Null { .. }
            | Value::Enum { .. } => {},
        }
    }

    /// Structural equality that ignores source locations. Object fields
    /// compare without regard to order.
    pub fn semantically_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Variable { name: a, .. }, Value::Variable { name: b, .. }) => {
                a.value == b.value
            },
            (Value::Int { raw: a, .. }, Value::Int { raw: b, .. })
            | (Value::Float { raw: a, .. }, Value::Float { raw: b, .. }) => a == b,
            (Value::String { value: a, .. }, Value::String { value: b, .. })
            | (Value::Enum { value: a, .. }, Value::Enum { value: b, .. }) => a == b,
            (Value::Boolean { value: a, .. }, Value::Boolean { value: b, .. }) => a == b,
            (Value::Null { .. }, Value::Null { .. }) => true,
            (Value::List { values: a, .. }, Value::List { values: b, .. }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.semantically_eq(y))
            },
            (Value::Object { fields: a, .. }, Value::Object { fields: b, .. }) => {
                a.len() == b.len()
                    && a.iter().all(|fa| {
                        b.iter().any(|fb| {
                            fa.name.value == fb.name.value
                                && fa.value.semantically_eq(&fb.value)
                        })
                    })
            },
            _ => false,
        }
    }
}

/// Prints the value back as a GraphQL literal, e.g. `{a: [1, "x"]}`.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Variable { name, .. } => write!(f, "${name}"),
            Value::Int { raw, .. } | Value::Float { raw, .. } => f.write_str(raw),
            Value::String { value, .. } => write!(f, "{value:?}"),
            Value::Boolean { value, .. } => write!(f, "{value}"),
            Value::Null { .. } => f.write_str("null"),
            Value::Enum { value, .. } => f.write_str(value),
            Value::List { values, .. } => {
                f.write_str("[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            },
            Value::Object { fields, .. } => {
                f.write_str("{")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                f.write_str("}")
            },
        }
    }
}
