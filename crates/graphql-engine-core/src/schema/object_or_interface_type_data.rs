use crate::schema::FieldDefinition;
use indexmap::IndexMap;

/// State shared by [`ObjectType`](crate::schema::ObjectType) and
/// [`InterfaceType`](crate::schema::InterfaceType).
#[derive(Clone, Debug)]
pub(crate) struct ObjectOrInterfaceTypeData {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) interfaces: Vec<String>,
}

impl ObjectOrInterfaceTypeData {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            description: None,
            fields: IndexMap::new(),
            interfaces: vec![],
        }
    }

    pub(crate) fn add_field(&mut self, field: FieldDefinition) {
        self.fields.insert(field.name.clone(), field);
    }

    pub(crate) fn add_interface(&mut self, name: String) {
        if !self.interfaces.contains(&name) {
            self.interfaces.push(name);
        }
    }

    pub(crate) fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(String::as_str).collect()
    }
}
