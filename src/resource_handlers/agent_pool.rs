//! Agent pool resource handler.
//!
//! Agent pools live at organization level and are keyed by a numeric ID.
//! Create and update re-read the pool afterwards so state reflects what the
//! service stored.

use crate::client::{
    AddAgentPoolArgs, AgentPoolClient, DeleteAgentPoolArgs, GetAgentPoolArgs, TaskAgentPool,
    TaskAgentPoolType, UpdateAgentPoolArgs,
};
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::resource::{NumericId, ResourceData, ResourceHandler};
use crate::schema::{AttributeDefinition, ResourceSchema};
use log::{debug, info, warn};

pub const RESOURCE_TYPE: &str = "azuredevops_agent_pool";

pub const NAME: &str = "name";
pub const POOL_TYPE: &str = "pool_type";
pub const AUTO_PROVISION: &str = "auto_provision";

const RESOURCE_LABEL: &str = "agent pool";

/// Handler for `azuredevops_agent_pool`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentPoolResource;

impl AgentPoolResource {
    pub fn new() -> Self {
        Self
    }
}

/// Attribute schema of an agent pool.
pub fn agent_pool_schema() -> ResourceSchema {
    let pool_types: Vec<&str> = TaskAgentPoolType::ALL.iter().map(|t| t.as_str()).collect();

    ResourceSchema::new(RESOURCE_TYPE, "Azure DevOps agent pool")
        .with_attribute(
            AttributeDefinition::string(NAME)
                .required()
                .non_empty()
                .describe("Name of the agent pool"),
        )
        .with_attribute(
            AttributeDefinition::string(POOL_TYPE)
                .with_default(TaskAgentPoolType::Automation.as_str())
                .one_of(&pool_types, true)
                .immutable(),
        )
        .with_attribute(AttributeDefinition::boolean(AUTO_PROVISION).with_default(false))
}

/// Build the request pool from attributes.
///
/// Outside of creation the stored identifier is parsed and must be numeric.
pub fn expand(data: &ResourceData, for_create: bool) -> ProviderResult<TaskAgentPool> {
    let name = data
        .get_str(NAME)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ValidationError::missing_required(NAME))?;

    let pool_type = match data.get_str(POOL_TYPE) {
        Some(raw) => raw
            .parse::<TaskAgentPoolType>()
            .map_err(|_| ValidationError::InvalidCanonicalValue {
                attribute: POOL_TYPE.to_string(),
                value: raw.to_string(),
                allowed: TaskAgentPoolType::ALL
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            })?,
        None => TaskAgentPoolType::default(),
    };

    let id = if for_create {
        None
    } else {
        Some(NumericId::parse(RESOURCE_LABEL, data.id())?.value())
    };

    Ok(TaskAgentPool {
        id,
        name: Some(name.to_string()),
        pool_type: Some(pool_type),
        auto_provision: Some(data.get_bool(AUTO_PROVISION).unwrap_or(false)),
        ..Default::default()
    })
}

/// Write a pool returned by the service into attributes.
pub fn flatten(data: &mut ResourceData, pool: &TaskAgentPool) {
    if let Some(id) = pool.id {
        data.set_id(id.to_string());
    }
    data.set(NAME, pool.name.clone().unwrap_or_default());
    data.set(POOL_TYPE, pool.pool_type.unwrap_or_default().as_str());
    data.set(AUTO_PROVISION, pool.auto_provision.unwrap_or_default());
}

impl<C: AgentPoolClient> ResourceHandler<C> for AgentPoolResource {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        agent_pool_schema()
    }

    async fn create(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let pool = expand(data, true)?;
        info!("Creating agent pool {:?}", pool.name);

        let created = client
            .add_agent_pool(AddAgentPoolArgs { pool })
            .await
            .map_err(|e| ProviderError::remote("Error creating agent pool in Azure DevOps", e))?;

        flatten(data, &created);
        self.read(client, data).await
    }

    async fn read(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let id = NumericId::parse(RESOURCE_LABEL, data.id())?;
        debug!("Reading agent pool {}", id);

        match client
            .get_agent_pool(GetAgentPoolArgs { pool_id: id.value() })
            .await
        {
            Ok(pool) => {
                flatten(data, &pool);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!("Agent pool {} no longer exists", id);
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(ProviderError::remote(
                format!("Error looking up agent pool with ID ({})", id),
                e,
            )),
        }
    }

    async fn update(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let expanded = expand(data, false)?;
        let pool_id = expanded.id.ok_or_else(|| ProviderError::missing_id(RESOURCE_TYPE))?;
        info!("Updating agent pool {}", pool_id);

        // Only these fields are updatable
        let pool = TaskAgentPool {
            name: expanded.name,
            pool_type: expanded.pool_type,
            auto_provision: expanded.auto_provision,
            ..Default::default()
        };

        client
            .update_agent_pool(UpdateAgentPoolArgs { pool_id, pool })
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error updating agent pool with ID ({})", pool_id),
                    e,
                )
            })?;

        self.read(client, data).await
    }

    async fn delete(&self, client: &C, data: &ResourceData) -> ProviderResult<()> {
        let pool_id = NumericId::parse(RESOURCE_LABEL, data.id())?;
        info!("Deleting agent pool {}", pool_id);

        client
            .delete_agent_pool(DeleteAgentPoolArgs {
                pool_id: pool_id.value(),
            })
            .await
            .map_err(|e| {
                ProviderError::remote(
                    format!("Error deleting agent pool with ID ({})", pool_id),
                    e,
                )
            })
    }

    async fn import(&self, _client: &C, data: &ResourceData) -> ProviderResult<Vec<ResourceData>> {
        let pool_id = NumericId::parse(RESOURCE_LABEL, data.id())?;
        info!("Importing agent pool {}", pool_id);

        let mut imported = data.clone();
        imported.set_id(pool_id.to_string());
        Ok(vec![imported])
    }
}
