//! Remote client abstraction for the Azure DevOps API.
//!
//! Handlers never talk HTTP themselves; they call one of the traits below.
//! Two implementations ship with the crate:
//!
//! - [`RestClient`] - `reqwest` client for the Azure DevOps REST API
//! - [`InMemoryClient`] - in-process fake used by tests and local experiments
//!
//! Every operation performs exactly one round trip and never retries; the
//! host runtime owns any retry policy.
//!
//! # Example Usage
//!
//! ```rust
//! use azuredevops_provider::client::{
//!     AddAgentPoolArgs, AgentPoolClient, InMemoryClient, TaskAgentPool,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InMemoryClient::new();
//! let pool = TaskAgentPool {
//!     name: Some("linux".to_string()),
//!     ..Default::default()
//! };
//! let created = client.add_agent_pool(AddAgentPoolArgs { pool }).await?;
//! assert!(created.id.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod models;
pub mod rest;

pub use error::ClientError;
pub use in_memory::InMemoryClient;
pub use models::{
    AddAgentPoolArgs, CreatePolicyConfigurationArgs, DeleteAgentPoolArgs,
    DeletePolicyConfigurationArgs, GetAgentPoolArgs, GetPolicyConfigurationArgs,
    PolicyConfiguration, PolicyTypeRef, TaskAgentPool, TaskAgentPoolType, UpdateAgentPoolArgs,
    UpdatePolicyConfigurationArgs,
};
pub use rest::RestClient;

use std::future::Future;

/// Policy configuration operations.
pub trait PolicyClient: Send + Sync {
    /// Create a policy configuration in a project
    fn create_policy_configuration(
        &self,
        args: CreatePolicyConfigurationArgs,
    ) -> impl Future<Output = Result<PolicyConfiguration, ClientError>> + Send;

    /// Fetch a policy configuration by project and ID
    fn get_policy_configuration(
        &self,
        args: GetPolicyConfigurationArgs,
    ) -> impl Future<Output = Result<PolicyConfiguration, ClientError>> + Send;

    /// Replace a policy configuration
    fn update_policy_configuration(
        &self,
        args: UpdatePolicyConfigurationArgs,
    ) -> impl Future<Output = Result<PolicyConfiguration, ClientError>> + Send;

    /// Delete a policy configuration
    fn delete_policy_configuration(
        &self,
        args: DeletePolicyConfigurationArgs,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Agent pool operations.
pub trait AgentPoolClient: Send + Sync {
    /// Create an agent pool
    fn add_agent_pool(
        &self,
        args: AddAgentPoolArgs,
    ) -> impl Future<Output = Result<TaskAgentPool, ClientError>> + Send;

    /// Fetch an agent pool by ID
    fn get_agent_pool(
        &self,
        args: GetAgentPoolArgs,
    ) -> impl Future<Output = Result<TaskAgentPool, ClientError>> + Send;

    /// Update name, type and auto-provision flag of an agent pool
    fn update_agent_pool(
        &self,
        args: UpdateAgentPoolArgs,
    ) -> impl Future<Output = Result<TaskAgentPool, ClientError>> + Send;

    /// Delete an agent pool
    fn delete_agent_pool(
        &self,
        args: DeleteAgentPoolArgs,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
