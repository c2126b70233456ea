pub use serde_json::Value;

/// Attribute name to value mapping. Keys iterate in sorted order.
pub type AttributeMap = serde_json::Map<String, Value>;

/// One row of an entity type.
///
/// `attributes` never holds the primary key; it lives in `id` so an unsaved
/// record can be told apart from a persisted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub id: Option<i64>,
    /// Discriminator value for single-table-inheritance hierarchies.
    pub subtype: Option<String>,
    pub attributes: AttributeMap,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder-style attribute assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Assign the subtype, mirroring it into the discriminator column.
    pub fn set_subtype(&mut self, column: &str, subtype: impl Into<String>) {
        let subtype = subtype.into();
        self.attributes
            .insert(column.to_string(), Value::String(subtype.clone()));
        self.subtype = Some(subtype);
    }

    /// Full attribute map including the primary key under `primary_key`.
    pub fn to_attribute_map(&self, primary_key: &str) -> AttributeMap {
        let mut map = self.attributes.clone();
        map.insert(
            primary_key.to_string(),
            self.id.map(Value::from).unwrap_or(Value::Null),
        );
        map
    }
}
