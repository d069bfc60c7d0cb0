//! In-memory implementation of the remote client traits.
//!
//! Behaves like the service for the operations the handlers use:
//! server-assigned IDs, revision bumps on update, project-scoped policy
//! lookups and `NotFound` for unknown entities. Tests can inject a one-shot
//! failure and count the remote calls that were issued.
//!
//! # Example Usage
//!
//! ```rust
//! use azuredevops_provider::client::{GetAgentPoolArgs, AgentPoolClient, InMemoryClient};
//!
//! # async fn example() {
//! let client = InMemoryClient::new();
//! let missing = client.get_agent_pool(GetAgentPoolArgs { pool_id: 1 }).await;
//! assert!(missing.unwrap_err().is_not_found());
//! assert_eq!(client.call_count(), 1);
//! # }
//! ```

use super::models::*;
use super::{AgentPoolClient, ClientError, PolicyClient};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    next_policy_id: i32,
    // (project, configuration id) -> configuration
    policies: HashMap<(String, i32), PolicyConfiguration>,
    next_pool_id: i32,
    pools: HashMap<i32, TaskAgentPool>,
    injected_failure: Option<(u16, String)>,
}

/// Thread-safe in-memory Azure DevOps fake.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClient {
    state: Arc<RwLock<State>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryClient {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of remote operations issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make the next remote operation fail with the given status and body.
    pub async fn fail_next(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.write().await;
        state.injected_failure = Some((status, body.into()));
    }

    /// Remove a policy configuration behind the provider's back.
    pub async fn remove_policy(&self, project: &str, id: i32) -> bool {
        let mut state = self.state.write().await;
        state.policies.remove(&(project.to_string(), id)).is_some()
    }

    /// Remove an agent pool behind the provider's back.
    pub async fn remove_pool(&self, id: i32) -> bool {
        let mut state = self.state.write().await;
        state.pools.remove(&id).is_some()
    }

    /// Stored policy configuration, if any.
    pub async fn policy(&self, project: &str, id: i32) -> Option<PolicyConfiguration> {
        let state = self.state.read().await;
        state.policies.get(&(project.to_string(), id)).cloned()
    }

    /// Stored agent pool, if any.
    pub async fn pool(&self, id: i32) -> Option<TaskAgentPool> {
        let state = self.state.read().await;
        state.pools.get(&id).cloned()
    }

    /// Count the call and take the injected failure, if one is pending.
    fn begin(&self, state: &mut State, endpoint: &str) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match state.injected_failure.take() {
            Some((status, body)) => Err(ClientError::api(endpoint, status, body)),
            None => Ok(()),
        }
    }

    fn policy_url(project: &str, id: i32) -> String {
        format!("inmemory://{}/_apis/policy/configurations/{}", project, id)
    }
}

impl PolicyClient for InMemoryClient {
    async fn create_policy_configuration(
        &self,
        args: CreatePolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "POST /policy/configurations")?;

        if args.configuration.policy_type.is_none() {
            return Err(ClientError::api(
                "POST /policy/configurations",
                400,
                "policy type is required",
            ));
        }

        state.next_policy_id += 1;
        let id = state.next_policy_id;
        let mut configuration = args.configuration;
        configuration.id = Some(id);
        configuration.revision = Some(1);
        configuration.is_deleted = Some(false);
        configuration.created_date = Some(Utc::now());
        configuration.url = Some(Self::policy_url(&args.project, id));

        state
            .policies
            .insert((args.project, id), configuration.clone());
        Ok(configuration)
    }

    async fn get_policy_configuration(
        &self,
        args: GetPolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "GET /policy/configurations")?;

        state
            .policies
            .get(&(args.project, args.configuration_id))
            .cloned()
            .ok_or_else(|| {
                ClientError::not_found("policy configuration", args.configuration_id.to_string())
            })
    }

    async fn update_policy_configuration(
        &self,
        args: UpdatePolicyConfigurationArgs,
    ) -> Result<PolicyConfiguration, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "PUT /policy/configurations")?;

        let key = (args.project, args.configuration_id);
        let existing = state.policies.get(&key).cloned().ok_or_else(|| {
            ClientError::not_found("policy configuration", args.configuration_id.to_string())
        })?;

        let mut configuration = args.configuration;
        configuration.id = Some(args.configuration_id);
        configuration.revision = Some(existing.revision.unwrap_or(0) + 1);
        configuration.is_deleted = Some(false);
        configuration.created_date = existing.created_date;
        configuration.url = existing.url;

        state.policies.insert(key, configuration.clone());
        Ok(configuration)
    }

    async fn delete_policy_configuration(
        &self,
        args: DeletePolicyConfigurationArgs,
    ) -> Result<(), ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "DELETE /policy/configurations")?;

        state
            .policies
            .remove(&(args.project, args.configuration_id))
            .map(|_| ())
            .ok_or_else(|| {
                ClientError::not_found("policy configuration", args.configuration_id.to_string())
            })
    }
}

impl AgentPoolClient for InMemoryClient {
    async fn add_agent_pool(&self, args: AddAgentPoolArgs) -> Result<TaskAgentPool, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "POST /distributedtask/pools")?;

        let name = args.pool.name.clone().unwrap_or_default();
        if name.is_empty() {
            return Err(ClientError::api(
                "POST /distributedtask/pools",
                400,
                "agent pool name is required",
            ));
        }
        if state
            .pools
            .values()
            .any(|p| p.name.as_deref() == Some(name.as_str()))
        {
            return Err(ClientError::api(
                "POST /distributedtask/pools",
                409,
                format!("agent pool '{}' already exists", name),
            ));
        }

        state.next_pool_id += 1;
        let id = state.next_pool_id;
        let pool = TaskAgentPool {
            id: Some(id),
            name: Some(name),
            pool_type: Some(args.pool.pool_type.unwrap_or_default()),
            auto_provision: Some(args.pool.auto_provision.unwrap_or(false)),
            is_hosted: Some(false),
            size: Some(0),
        };

        state.pools.insert(id, pool.clone());
        Ok(pool)
    }

    async fn get_agent_pool(&self, args: GetAgentPoolArgs) -> Result<TaskAgentPool, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "GET /distributedtask/pools")?;

        state
            .pools
            .get(&args.pool_id)
            .cloned()
            .ok_or_else(|| ClientError::not_found("agent pool", args.pool_id.to_string()))
    }

    async fn update_agent_pool(
        &self,
        args: UpdateAgentPoolArgs,
    ) -> Result<TaskAgentPool, ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "PATCH /distributedtask/pools")?;

        let pool = state
            .pools
            .get_mut(&args.pool_id)
            .ok_or_else(|| ClientError::not_found("agent pool", args.pool_id.to_string()))?;

        if let Some(name) = args.pool.name {
            pool.name = Some(name);
        }
        if let Some(pool_type) = args.pool.pool_type {
            pool.pool_type = Some(pool_type);
        }
        if let Some(auto_provision) = args.pool.auto_provision {
            pool.auto_provision = Some(auto_provision);
        }

        Ok(pool.clone())
    }

    async fn delete_agent_pool(&self, args: DeleteAgentPoolArgs) -> Result<(), ClientError> {
        let mut state = self.state.write().await;
        self.begin(&mut state, "DELETE /distributedtask/pools")?;

        state
            .pools
            .remove(&args.pool_id)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found("agent pool", args.pool_id.to_string()))
    }
}
