//! Configuration validation against resource schemas.
//!
//! Validation runs on the raw configuration value the host runtime hands
//! over, before any handler sees it. Defaults are applied separately so a
//! configuration can be checked without being modified.

use super::types::{AttributeDefinition, AttributeType, Mutability, ResourceSchema};
use crate::error::{ValidationError, ValidationResult};
use serde_json::{Map, Value};

impl ResourceSchema {
    /// Validate a configuration object against this schema.
    pub fn validate(&self, config: &Value) -> ValidationResult<()> {
        let obj = config
            .as_object()
            .ok_or_else(|| ValidationError::custom("Configuration must be a JSON object"))?;
        validate_block(&self.attributes, obj, &self.name)
    }

    /// Fill in defaults for omitted attributes, recursing into list elements.
    pub fn apply_defaults(&self, config: &mut Value) {
        if let Some(obj) = config.as_object_mut() {
            apply_block_defaults(&self.attributes, obj);
        }
    }

    /// Names of immutable attributes whose value differs between `prior` and `planned`.
    pub fn requires_replacement(&self, prior: &Value, planned: &Value) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|attr| attr.mutability == Mutability::Immutable)
            .filter(|attr| {
                let before = prior.get(&attr.name).unwrap_or(&Value::Null);
                let after = planned.get(&attr.name).unwrap_or(&Value::Null);
                before != after
            })
            .map(|attr| attr.name.clone())
            .collect()
    }
}

fn validate_block(
    attributes: &[AttributeDefinition],
    obj: &Map<String, Value>,
    schema_name: &str,
) -> ValidationResult<()> {
    for attr_def in attributes {
        validate_attribute(attr_def, obj.get(&attr_def.name), schema_name)?;
    }

    // Strict: every key must be declared
    for field_name in obj.keys() {
        if !attributes.iter().any(|attr| attr.name == *field_name) {
            return Err(ValidationError::UnknownAttribute {
                attribute: field_name.clone(),
                schema: schema_name.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_attribute(
    attr_def: &AttributeDefinition,
    value: Option<&Value>,
    schema_name: &str,
) -> ValidationResult<()> {
    let value = match value {
        None | Some(Value::Null) => {
            if attr_def.required {
                return Err(ValidationError::missing_required(&attr_def.name));
            }
            return Ok(());
        }
        Some(value) => value,
    };

    match attr_def.data_type {
        AttributeType::String => {
            let str_val = value.as_str().ok_or_else(|| {
                ValidationError::invalid_type(
                    &attr_def.name,
                    attr_def.data_type.as_str(),
                    value_type(value),
                )
            })?;

            if str_val.is_empty() && attr_def.non_empty {
                return Err(ValidationError::EmptyString {
                    attribute: attr_def.name.clone(),
                });
            }

            if !attr_def.canonical_values.is_empty()
                && !is_canonical(str_val, &attr_def.canonical_values, attr_def.case_exact)
            {
                return Err(ValidationError::InvalidCanonicalValue {
                    attribute: attr_def.name.clone(),
                    value: str_val.to_string(),
                    allowed: attr_def.canonical_values.clone(),
                });
            }
        }
        AttributeType::Boolean => {
            if !value.is_boolean() {
                return Err(ValidationError::invalid_type(
                    &attr_def.name,
                    attr_def.data_type.as_str(),
                    value_type(value),
                ));
            }
        }
        AttributeType::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                return Err(ValidationError::invalid_type(
                    &attr_def.name,
                    attr_def.data_type.as_str(),
                    value_type(value),
                ));
            }
        }
        AttributeType::List => {
            let items = value.as_array().ok_or_else(|| {
                ValidationError::invalid_type(
                    &attr_def.name,
                    attr_def.data_type.as_str(),
                    value_type(value),
                )
            })?;

            if let Some(min) = attr_def.min_items {
                if items.len() < min {
                    return Err(ValidationError::TooFewItems {
                        attribute: attr_def.name.clone(),
                        min,
                        actual: items.len(),
                    });
                }
            }
            if let Some(max) = attr_def.max_items {
                if items.len() > max {
                    return Err(ValidationError::TooManyItems {
                        attribute: attr_def.name.clone(),
                        max,
                        actual: items.len(),
                    });
                }
            }

            for item in items {
                let block = item.as_object().ok_or_else(|| {
                    ValidationError::invalid_type(&attr_def.name, "block", value_type(item))
                })?;
                validate_block(&attr_def.sub_attributes, block, schema_name)?;
            }
        }
    }

    Ok(())
}

fn apply_block_defaults(attributes: &[AttributeDefinition], obj: &mut Map<String, Value>) {
    for attr_def in attributes {
        let missing = obj.get(&attr_def.name).is_none_or(Value::is_null);
        if missing {
            if let Some(default) = &attr_def.default {
                obj.insert(attr_def.name.clone(), default.clone());
            }
            continue;
        }

        if attr_def.data_type == AttributeType::List {
            if let Some(items) = obj.get_mut(&attr_def.name).and_then(Value::as_array_mut) {
                for item in items.iter_mut().filter_map(Value::as_object_mut) {
                    apply_block_defaults(&attr_def.sub_attributes, item);
                }
            }
        }
    }
}

fn is_canonical(value: &str, allowed: &[String], case_exact: bool) -> bool {
    if case_exact {
        allowed.iter().any(|v| v == value)
    } else {
        allowed.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "decimal",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
