//! Provider entry point.
//!
//! [`AzureDevOpsProvider`] registers every resource type, exports their
//! schemas and routes lifecycle calls from the host runtime to the handler
//! for the named type.
//!
//! # Examples
//!
//! ```rust
//! use azuredevops_provider::client::InMemoryClient;
//! use azuredevops_provider::AzureDevOpsProvider;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = AzureDevOpsProvider::new(InMemoryClient::new());
//!
//! let mut pool = provider.plan("azuredevops_agent_pool", json!({"name": "linux"}))?;
//! provider.create("azuredevops_agent_pool", &mut pool).await?;
//! provider.read("azuredevops_agent_pool", &mut pool).await?;
//! assert_eq!(pool.get_str("pool_type"), Some("automation"));
//! # Ok(())
//! # }
//! ```

use crate::client::{AgentPoolClient, PolicyClient, RestClient};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::policy::{
    BuildValidation, CommentResolution, MinReviewers, PolicyResource, build_validation_resource,
    comment_resolution_resource, min_reviewers_resource,
};
use crate::resource::{ResourceData, ResourceHandler};
use crate::resource_handlers::AgentPoolResource;
use crate::schema::ResourceSchema;
use log::{debug, info};
use serde_json::Value;

/// Route `$resource_type` to its handler and evaluate `$body` with it bound to `$handler`.
macro_rules! dispatch {
    ($self:ident, $resource_type:expr, |$handler:ident| $body:expr) => {
        match $resource_type {
            t if t == ResourceHandler::<C>::resource_type(&$self.agent_pool) => {
                let $handler = &$self.agent_pool;
                $body
            }
            t if t == ResourceHandler::<C>::resource_type(&$self.min_reviewers) => {
                let $handler = &$self.min_reviewers;
                $body
            }
            t if t == ResourceHandler::<C>::resource_type(&$self.build_validation) => {
                let $handler = &$self.build_validation;
                $body
            }
            t if t == ResourceHandler::<C>::resource_type(&$self.comment_resolution) => {
                let $handler = &$self.comment_resolution;
                $body
            }
            other => Err(ProviderError::UnsupportedResourceType(other.to_string())),
        }
    };
}

/// Azure DevOps provider bound to one remote client.
#[derive(Debug)]
pub struct AzureDevOpsProvider<C> {
    client: C,
    agent_pool: AgentPoolResource,
    min_reviewers: PolicyResource<MinReviewers>,
    build_validation: PolicyResource<BuildValidation>,
    comment_resolution: PolicyResource<CommentResolution>,
}

impl AzureDevOpsProvider<RestClient> {
    /// Build a provider talking to the organization named in `config`.
    pub fn from_config(config: ProviderConfig) -> ProviderResult<Self> {
        config.validate()?;
        let client = RestClient::new(&config)
            .map_err(|e| ProviderError::remote("Error configuring Azure DevOps client", e))?;
        info!("Configured Azure DevOps provider for {}", config.base_url());
        Ok(Self::new(client))
    }
}

impl<C> AzureDevOpsProvider<C>
where
    C: PolicyClient + AgentPoolClient,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            agent_pool: AgentPoolResource::new(),
            min_reviewers: min_reviewers_resource(),
            build_validation: build_validation_resource(),
            comment_resolution: comment_resolution_resource(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Names of all registered resource types.
    pub fn resource_types(&self) -> Vec<&'static str> {
        vec![
            ResourceHandler::<C>::resource_type(&self.agent_pool),
            ResourceHandler::<C>::resource_type(&self.min_reviewers),
            ResourceHandler::<C>::resource_type(&self.build_validation),
            ResourceHandler::<C>::resource_type(&self.comment_resolution),
        ]
    }

    /// Schemas of all registered resource types.
    pub fn schemas(&self) -> Vec<ResourceSchema> {
        vec![
            ResourceHandler::<C>::schema(&self.agent_pool),
            ResourceHandler::<C>::schema(&self.min_reviewers),
            ResourceHandler::<C>::schema(&self.build_validation),
            ResourceHandler::<C>::schema(&self.comment_resolution),
        ]
    }

    pub fn schema(&self, resource_type: &str) -> ProviderResult<ResourceSchema> {
        dispatch!(self, resource_type, |handler| Ok(
            ResourceHandler::<C>::schema(handler)
        ))
    }

    /// Check a configuration against the schema of `resource_type`.
    pub fn validate_resource_config(&self, resource_type: &str, config: &Value) -> ProviderResult<()> {
        let schema = self.schema(resource_type)?;
        schema.validate(config)?;
        Ok(())
    }

    /// Validate a configuration and turn it into resource data with defaults applied.
    pub fn plan(&self, resource_type: &str, config: Value) -> ProviderResult<ResourceData> {
        let schema = self.schema(resource_type)?;
        ResourceData::from_config(&schema, config)
    }

    /// Immutable attributes that differ between `prior` and `planned`.
    pub fn requires_replacement(
        &self,
        resource_type: &str,
        prior: &Value,
        planned: &Value,
    ) -> ProviderResult<Vec<String>> {
        let schema = self.schema(resource_type)?;
        Ok(schema.requires_replacement(prior, planned))
    }

    pub async fn create(&self, resource_type: &str, data: &mut ResourceData) -> ProviderResult<()> {
        debug!("Dispatching create for {}", resource_type);
        dispatch!(self, resource_type, |handler| {
            ResourceHandler::<C>::create(handler, &self.client, data).await
        })
    }

    pub async fn read(&self, resource_type: &str, data: &mut ResourceData) -> ProviderResult<()> {
        debug!("Dispatching read for {}", resource_type);
        dispatch!(self, resource_type, |handler| {
            ResourceHandler::<C>::read(handler, &self.client, data).await
        })
    }

    pub async fn update(&self, resource_type: &str, data: &mut ResourceData) -> ProviderResult<()> {
        debug!("Dispatching update for {}", resource_type);
        dispatch!(self, resource_type, |handler| {
            ResourceHandler::<C>::update(handler, &self.client, data).await
        })
    }

    pub async fn delete(&self, resource_type: &str, data: &ResourceData) -> ProviderResult<()> {
        debug!("Dispatching delete for {}", resource_type);
        dispatch!(self, resource_type, |handler| {
            ResourceHandler::<C>::delete(handler, &self.client, data).await
        })
    }

    pub async fn import(
        &self,
        resource_type: &str,
        data: &ResourceData,
    ) -> ProviderResult<Vec<ResourceData>> {
        debug!("Dispatching import for {}", resource_type);
        dispatch!(self, resource_type, |handler| {
            ResourceHandler::<C>::import(handler, &self.client, data).await
        })
    }
}
