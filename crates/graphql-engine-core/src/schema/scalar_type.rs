use crate::Value;
use std::sync::Arc;

/// Converts a resolved value to its serialized form, or explains why it
/// cannot be.
pub type ScalarSerializer = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Converts an input value (from a literal or a variable) to its internal
/// form.
pub type ScalarParser = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// The representation a scalar's values take. Integer kinds each enforce
/// their own range on input and output.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    /// 32-bit signed, the GraphQL `Int`.
    Int,
    Int8,
    Int16,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Float32,
    String,
    Boolean,
    ID,
    /// Opaque; values pass through the scalar's own callbacks unchanged
    /// when none are registered.
    Custom,
}

impl ScalarKind {
    /// Inclusive integer range, for the integer kinds.
    pub fn integer_bounds(&self) -> Option<(i128, i128)> {
        match self {
            ScalarKind::Int => Some((i32::MIN.into(), i32::MAX.into())),
            ScalarKind::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            ScalarKind::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            ScalarKind::Int64 => Some((i64::MIN.into(), i64::MAX.into())),
            ScalarKind::UInt8 => Some((0, u8::MAX.into())),
            ScalarKind::UInt16 => Some((0, u16::MAX.into())),
            ScalarKind::UInt32 => Some((0, u32::MAX.into())),
            ScalarKind::UInt64 => Some((0, u64::MAX.into())),
            ScalarKind::Float
            | ScalarKind::Float32
            | ScalarKind::String
            | ScalarKind::Boolean
            | ScalarKind::ID
            | ScalarKind::Custom => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ScalarKind::Float | ScalarKind::Float32)
    }

    fn float_fits(&self, value: f64) -> bool {
        match self {
            ScalarKind::Float32 => value.is_finite() && value.abs() <= f64::from(f32::MAX),
            _ => value.is_finite(),
        }
    }
}

/// A scalar type and its (de)serialization rules.
#[derive(Clone)]
pub struct ScalarType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) kind: ScalarKind,
    pub(crate) serializer: Option<ScalarSerializer>,
    pub(crate) parser: Option<ScalarParser>,
}

impl ScalarType {
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            serializer: None,
            parser: None,
        }
    }

    /// A [`ScalarKind::Custom`] scalar.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(name, ScalarKind::Custom)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the kind's built-in output coercion.
    pub fn serialize_with<F>(mut self, serializer: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Replaces the kind's built-in input coercion.
    pub fn parse_with<F>(mut self, parser: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Output coercion: turns a resolver's value into response data.
    pub fn serialize(&self, value: &Value) -> Result<Value, String> {
        if let Some(serializer) = &self.serializer {
            return serializer(value);
        }
        let name = &self.name;
        match self.kind {
            ScalarKind::Custom => Ok(value.clone()),
            ScalarKind::String => match value {
                Value::String(s) | Value::Enum(s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                Value::Float(f) => Ok(Value::String(f.to_string())),
                Value::Boolean(b) => Ok(Value::String(b.to_string())),
                other => Err(format!("{name} cannot represent value: {other}")),
            },
            ScalarKind::Boolean => match value {
                Value::Boolean(b) => Ok(Value::Boolean(*b)),
                other => Err(format!("{name} cannot represent a non boolean value: {other}")),
            },
            ScalarKind::ID => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                other => Err(format!("{name} cannot represent value: {other}")),
            },
            ScalarKind::Float | ScalarKind::Float32 => {
                let Some(f) = value.as_f64() else {
                    return Err(format!("{name} cannot represent non numeric value: {value}"));
                };
                if !self.kind.float_fits(f) {
                    return Err(format!("{name} cannot represent value out of range: {value}"));
                }
                Ok(Value::Float(f))
            },
            ScalarKind::Int
            | ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int64
            | ScalarKind::UInt8
            | ScalarKind::UInt16
            | ScalarKind::UInt32
            | ScalarKind::UInt64 => {
                let int = match value {
                    Value::Int(i) => *i,
                    Value::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                        if *f < i128::MIN as f64 || *f > i128::MAX as f64 {
                            return Err(format!(
                                "{name} cannot represent value out of range: {value}"
                            ));
                        }
                        *f as i128
                    },
                    other => {
                        return Err(format!("{name} cannot represent non-integer value: {other}"));
                    },
                };
                self.check_integer_range(int)?;
                Ok(Value::Int(int))
            },
        }
    }

    /// Input coercion for a value already converted from a literal or a
    /// variable.
    pub fn parse_input(&self, value: &Value) -> Result<Value, String> {
        if let Some(parser) = &self.parser {
            return parser(value);
        }
        let name = &self.name;
        match self.kind {
            ScalarKind::Custom => Ok(value.clone()),
            ScalarKind::String => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                other => Err(format!("{name} cannot represent a non string value: {other}")),
            },
            ScalarKind::Boolean => match value {
                Value::Boolean(b) => Ok(Value::Boolean(*b)),
                other => Err(format!("{name} cannot represent a non boolean value: {other}")),
            },
            ScalarKind::ID => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                other => Err(format!("{name} cannot represent value: {other}")),
            },
            ScalarKind::Float | ScalarKind::Float32 => match value {
                Value::Int(_) | Value::Float(_) => {
                    let f = value.as_f64().unwrap_or_default();
                    if !self.kind.float_fits(f) {
                        return Err(format!("{name} cannot represent value out of range: {value}"));
                    }
                    Ok(Value::Float(f))
                },
                other => Err(format!("{name} cannot represent non numeric value: {other}")),
            },
            ScalarKind::Int
            | ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int64
            | ScalarKind::UInt8
            | ScalarKind::UInt16
            | ScalarKind::UInt32
            | ScalarKind::UInt64 => match value {
                Value::Int(i) => {
                    self.check_integer_range(*i)?;
                    Ok(Value::Int(*i))
                },
                other => Err(format!("{name} cannot represent non-integer value: {other}")),
            },
        }
    }

    fn check_integer_range(&self, value: i128) -> Result<(), String> {
        if let Some((min, max)) = self.kind.integer_bounds()
            && !(min..=max).contains(&value)
        {
            return Err(format!(
                "{} cannot represent value out of range: {value}",
                self.name,
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("custom_serializer", &self.serializer.is_some())
            .field("custom_parser", &self.parser.is_some())
            .finish()
    }
}
