//! Remote client error types.
//!
//! The only distinction handlers make is [`ClientError::is_not_found`]
//! versus everything else.

/// Errors from Azure DevOps API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The entity does not exist (HTTP 404)
    #[error("{resource_type} '{id}' was not found")]
    NotFound { resource_type: String, id: String },

    /// The service returned a non-2xx status
    #[error("Azure DevOps {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// HTTP transport error
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be decoded
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Client could not be constructed
    #[error("client configuration error: {message}")]
    Configuration { message: String },
}

impl ClientError {
    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create an API error
    pub fn api(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Whether the remote system reported the entity as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
