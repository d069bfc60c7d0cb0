//! Error types for provider operations.
//!
//! Every lifecycle operation surfaces a [`ProviderError`] to the host runtime.
//! Remote failures keep the underlying [`ClientError`] as their source so the
//! "not found" condition stays distinguishable from everything else.

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::policy::SettingsError;
use std::num::ParseIntError;

/// Main error type for provider lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Configuration does not conform to the resource schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Stored identifier is not a numeric ID
    #[error("Error parsing {resource_type} ID '{id}': {source}")]
    InvalidId {
        resource_type: String,
        id: String,
        #[source]
        source: ParseIntError,
    },

    /// Import ID does not follow `<project>/<id>`
    #[error("unexpected format of ID ({id}), expected {expected}")]
    InvalidImportId { id: String, expected: String },

    /// Operation needs an identifier but none is stored
    #[error("{resource_type} has no ID; it must be created or imported first")]
    MissingId { resource_type: String },

    /// Settings payload returned by the remote API has an unexpected shape
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Remote call failed
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: ClientError,
    },

    /// Resource type is not registered with the provider
    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// Provider configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors for checking a configuration against its schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute value doesn't match expected type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidDataType {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Attribute must not be an empty string
    #[error("Attribute '{attribute}' cannot be an empty string")]
    EmptyString { attribute: String },

    /// Invalid value for attribute with canonical values
    #[error("Attribute '{attribute}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidCanonicalValue {
        attribute: String,
        value: String,
        allowed: Vec<String>,
    },

    /// List attribute has fewer items than allowed
    #[error("Attribute '{attribute}' requires at least {min} item(s), got {actual}")]
    TooFewItems {
        attribute: String,
        min: usize,
        actual: usize,
    },

    /// List attribute has more items than allowed
    #[error("Attribute '{attribute}' allows at most {max} item(s), got {actual}")]
    TooManyItems {
        attribute: String,
        max: usize,
        actual: usize,
    },

    /// Unknown attribute in configuration
    #[error("Unknown attribute '{attribute}' in schema '{schema}'")]
    UnknownAttribute { attribute: String, schema: String },

    /// General validation error with custom message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

impl ProviderError {
    /// Wrap a remote client error with the operation context.
    pub fn remote(context: impl Into<String>, source: ClientError) -> Self {
        Self::Remote {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid numeric ID error
    pub fn invalid_id(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        source: ParseIntError,
    ) -> Self {
        Self::InvalidId {
            resource_type: resource_type.into(),
            id: id.into(),
            source,
        }
    }

    /// Create a missing ID error
    pub fn missing_id(resource_type: impl Into<String>) -> Self {
        Self::MissingId {
            resource_type: resource_type.into(),
        }
    }

    /// Whether the remote system reported the entity as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { source, .. } if source.is_not_found())
    }
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidDataType {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a custom validation error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

// Result type aliases for convenience
pub type ProviderResult<T> = Result<T, ProviderError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
