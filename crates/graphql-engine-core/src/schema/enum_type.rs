use crate::Value;
use indexmap::IndexMap;

/// One value of an [`EnumType`]: its GraphQL name and the internal value
/// resolvers see and return.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub(crate) name: String,
    pub(crate) value: Value,
}

impl EnumValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) values: IndexMap<String, EnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: IndexMap::new(),
        }
    }

    /// Adds a value whose internal representation is `Value::Enum(name)`.
    pub fn with_value(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let internal = Value::Enum(name.clone());
        self.with_mapped_value(name, internal)
    }

    /// Adds a value with an explicit internal representation.
    pub fn with_mapped_value(mut self, name: impl Into<String>, internal: impl Into<Value>) -> Self {
        let name = name.into();
        self.values.insert(
            name.clone(),
            EnumValue {
                name,
                value: internal.into(),
            },
        );
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn values(&self) -> &IndexMap<String, EnumValue> {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.get(name)
    }

    /// Output coercion: maps an internal value back to its enum name.
    pub fn serialize(&self, internal: &Value) -> Result<Value, String> {
        if let Some(found) = self.values.values().find(|v| &v.value == internal) {
            return Ok(Value::Enum(found.name.clone()));
        }
        // A bare name is accepted for values that keep the default mapping.
        if let Some(name) = internal.as_str()
            && let Some(found) = self.values.get(name)
            && found.value == Value::Enum(found.name.clone())
        {
            return Ok(Value::Enum(found.name.clone()));
        }
        Err(format!(
            "{internal} is not a valid enum value for type \"{}\"",
            self.name,
        ))
    }

    /// Input coercion: maps an enum name to its internal value.
    pub fn parse_input(&self, name: &str) -> Result<Value, String> {
        self.values
            .get(name)
            .map(|found| found.value.clone())
            .ok_or_else(|| {
                format!("Value \"{name}\" does not exist in \"{}\" enum.", self.name)
            })
    }
}
