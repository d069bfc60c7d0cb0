//! Core schema type definitions for provider resources.
//!
//! A [`ResourceSchema`] is the declarative description the host runtime uses
//! to validate configuration, fill in defaults and plan replacements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema of one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource type name, e.g. `azuredevops_agent_pool`
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Top-level attribute definitions
    pub attributes: Vec<AttributeDefinition>,
}

impl ResourceSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute definition.
    pub fn with_attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up a top-level attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Definition of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,
    /// Data type of the attribute
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Whether this attribute is required
    pub required: bool,
    /// Value used when the attribute is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Mutability characteristics
    pub mutability: Mutability,
    /// Allowed values for string attributes
    #[serde(default)]
    pub canonical_values: Vec<String>,
    /// Whether canonical values are compared case-sensitively
    pub case_exact: bool,
    /// Reject empty strings
    pub non_empty: bool,
    /// Minimum number of list items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    /// Maximum number of list items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Attributes of each list element
    #[serde(default)]
    pub sub_attributes: Vec<AttributeDefinition>,
    /// Attribute description
    #[serde(default)]
    pub description: String,
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: AttributeType::String,
            required: false,
            default: None,
            mutability: Mutability::ReadWrite,
            canonical_values: Vec::new(),
            case_exact: true,
            non_empty: false,
            min_items: None,
            max_items: None,
            sub_attributes: Vec::new(),
            description: String::new(),
        }
    }
}

impl AttributeDefinition {
    fn typed(name: &str, data_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            ..Default::default()
        }
    }

    /// String attribute.
    pub fn string(name: &str) -> Self {
        Self::typed(name, AttributeType::String)
    }

    /// Boolean attribute.
    pub fn boolean(name: &str) -> Self {
        Self::typed(name, AttributeType::Boolean)
    }

    /// Integer attribute.
    pub fn integer(name: &str) -> Self {
        Self::typed(name, AttributeType::Integer)
    }

    /// List of nested blocks described by `sub_attributes`.
    pub fn list(name: &str, sub_attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            sub_attributes,
            ..Self::typed(name, AttributeType::List)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Changing the value forces the resource to be replaced.
    pub fn immutable(mut self) -> Self {
        self.mutability = Mutability::Immutable;
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Restrict a string to one of `values`.
    pub fn one_of(mut self, values: &[&str], case_exact: bool) -> Self {
        self.canonical_values = values.iter().map(|v| v.to_string()).collect();
        self.case_exact = case_exact;
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Look up a sub-attribute by name.
    pub fn sub_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.sub_attributes.iter().find(|attr| attr.name == name)
    }
}

/// Attribute data types understood by the host runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    /// String value
    #[default]
    String,
    /// Boolean value
    Boolean,
    /// Integer number
    Integer,
    /// Ordered list of nested blocks
    List,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Boolean => "boolean",
            AttributeType::Integer => "integer",
            AttributeType::List => "list",
        }
    }
}

/// Attribute mutability characteristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Updated in place
    #[default]
    ReadWrite,
    /// Set at creation; a change requires replacement
    Immutable,
}
