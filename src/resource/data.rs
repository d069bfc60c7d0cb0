//! Attribute store handed to lifecycle operations.
//!
//! [`ResourceData`] mirrors what the host runtime persists for one resource
//! instance: a string identifier slot and a JSON object of attributes. An
//! empty identifier means the resource does not exist.

use crate::error::ProviderResult;
use crate::schema::ResourceSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier and attributes of one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    id: String,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Create an empty, absent resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from host configuration after validating it and applying defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use azuredevops_provider::resource::ResourceData;
    /// use azuredevops_provider::schema::{AttributeDefinition, ResourceSchema};
    /// use serde_json::json;
    ///
    /// let schema = ResourceSchema::new("example", "Example")
    ///     .with_attribute(AttributeDefinition::string("name").required())
    ///     .with_attribute(AttributeDefinition::boolean("enabled").with_default(true));
    ///
    /// let data = ResourceData::from_config(&schema, json!({"name": "pool"})).unwrap();
    /// assert_eq!(data.get_bool("enabled"), Some(true));
    /// assert!(data.is_absent());
    /// ```
    pub fn from_config(schema: &ResourceSchema, mut config: Value) -> ProviderResult<Self> {
        schema.validate(&config)?;
        schema.apply_defaults(&mut config);

        let attributes = match config {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Self {
            id: String::new(),
            attributes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the resource as gone; the host runtime drops it from state.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_absent(&self) -> bool {
        self.id.is_empty()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.attributes.get_mut(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// List attribute elements, empty when unset.
    pub fn get_list(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }
}
