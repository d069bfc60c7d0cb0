//! Generic branch policy resource.
//!
//! Every policy kind shares one lifecycle. What differs is how attributes
//! become a [`PolicyConfiguration`] and back, which each kind provides through
//! a [`PolicyMapper`]. [`PolicyResource`] pairs a [`PolicyKind`] with its
//! mapper and implements [`ResourceHandler`] for any [`PolicyClient`].
//!
//! Attribute layout shared by all kinds:
//!
//! ```text
//! project_id   string, required, forces replacement
//! enabled      bool, default true
//! blocking     bool, default true
//! settings     exactly one block
//!   scope      one or more blocks
//!     repository_id   string, optional (all repositories)
//!     repository_ref  string, optional (all branches)
//!     match_type      "Exact" | "Prefix", default "Exact"
//!   ...        kind-specific settings
//! ```

use super::kind::PolicyKind;
use super::settings::{self, MatchKind, ScopeEntry};
use crate::client::{
    CreatePolicyConfigurationArgs, DeletePolicyConfigurationArgs, GetPolicyConfigurationArgs,
    PolicyClient, PolicyConfiguration, PolicyTypeRef, UpdatePolicyConfigurationArgs,
};
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::resource::{ImportId, NumericId, ResourceData, ResourceHandler};
use crate::schema::{AttributeDefinition, ResourceSchema};
use log::{debug, info, trace, warn};
use serde_json::{Map, Value, json};
use uuid::Uuid;

pub const PROJECT_ID: &str = "project_id";
pub const ENABLED: &str = "enabled";
pub const BLOCKING: &str = "blocking";
pub const SETTINGS: &str = "settings";
pub const SCOPE: &str = "scope";
pub const REPOSITORY_ID: &str = "repository_id";
pub const REPOSITORY_REF: &str = "repository_ref";
pub const MATCH_TYPE: &str = "match_type";

const RESOURCE_LABEL: &str = "Policy configuration";

/// Per-kind conversion between attributes and a policy configuration.
///
/// The default methods handle the attributes every kind shares; kinds with
/// extra settings call [`base_expand`] and [`base_flatten`] and add their own
/// keys on top.
pub trait PolicyMapper: Send + Sync {
    /// Kind-specific attributes of the `settings` block
    fn settings_attributes(&self) -> Vec<AttributeDefinition> {
        Vec::new()
    }

    /// Build the request configuration and owning project from attributes.
    fn expand(
        &self,
        data: &ResourceData,
        type_id: Uuid,
    ) -> ProviderResult<(PolicyConfiguration, String)> {
        base_expand(data, type_id)
    }

    /// Write a configuration returned by the service back into attributes.
    fn flatten(
        &self,
        data: &mut ResourceData,
        configuration: &PolicyConfiguration,
        project: &str,
    ) -> ProviderResult<()> {
        base_flatten(data, configuration, project)
    }
}

/// Schema of the attributes shared by every policy kind.
pub fn base_schema(kind: PolicyKind, settings_attributes: Vec<AttributeDefinition>) -> ResourceSchema {
    let scope = AttributeDefinition::list(
        SCOPE,
        vec![
            AttributeDefinition::string(REPOSITORY_ID)
                .describe("Repository the policy applies to; all repositories when unset"),
            AttributeDefinition::string(REPOSITORY_REF)
                .describe("Ref the policy applies to; all branches when unset"),
            AttributeDefinition::string(MATCH_TYPE)
                .with_default(MatchKind::Exact.as_str())
                .one_of(&[MatchKind::Exact.as_str(), MatchKind::Prefix.as_str()], false),
        ],
    )
    .required()
    .min_items(1);

    let mut settings_block = vec![scope];
    settings_block.extend(settings_attributes);

    ResourceSchema::new(kind.resource_name(), format!("Branch policy: {}", kind))
        .with_attribute(
            AttributeDefinition::string(PROJECT_ID)
                .required()
                .non_empty()
                .immutable(),
        )
        .with_attribute(AttributeDefinition::boolean(ENABLED).with_default(true))
        .with_attribute(AttributeDefinition::boolean(BLOCKING).with_default(true))
        .with_attribute(
            AttributeDefinition::list(SETTINGS, settings_block)
                .required()
                .min_items(1)
                .max_items(1),
        )
}

/// The single `settings` block, empty when unset.
pub fn settings_block(data: &ResourceData) -> Map<String, Value> {
    data.get_list(SETTINGS)
        .first()
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Set one key of the `settings` block written by [`base_flatten`].
pub fn set_setting(data: &mut ResourceData, key: &str, value: impl Into<Value>) {
    let block = data
        .get_mut(SETTINGS)
        .and_then(Value::as_array_mut)
        .and_then(|blocks| blocks.first_mut())
        .and_then(Value::as_object_mut);
    if let Some(block) = block {
        block.insert(key.to_string(), value.into());
    }
}

/// Shared part of expand: flags, type, scopes, project and optional ID.
pub fn base_expand(
    data: &ResourceData,
    type_id: Uuid,
) -> ProviderResult<(PolicyConfiguration, String)> {
    let project = data
        .get_str(PROJECT_ID)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ValidationError::missing_required(PROJECT_ID))?
        .to_string();

    let id = if data.id().is_empty() {
        None
    } else {
        Some(NumericId::parse(RESOURCE_LABEL, data.id())?.value())
    };

    let scopes = settings_block(data)
        .get(SCOPE)
        .and_then(Value::as_array)
        .map(|blocks| blocks.iter().map(scope_from_block).collect::<ProviderResult<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    let configuration = PolicyConfiguration {
        id,
        is_enabled: Some(data.get_bool(ENABLED).unwrap_or(true)),
        is_blocking: Some(data.get_bool(BLOCKING).unwrap_or(true)),
        policy_type: Some(PolicyTypeRef::new(type_id)),
        settings: settings::encode(&scopes),
        ..Default::default()
    };

    Ok((configuration, project))
}

/// Shared part of flatten: ID, project, flags and scopes.
pub fn base_flatten(
    data: &mut ResourceData,
    configuration: &PolicyConfiguration,
    project: &str,
) -> ProviderResult<()> {
    let scopes = settings::decode(&configuration.settings)?;

    if let Some(id) = configuration.id {
        data.set_id(id.to_string());
    }
    data.set(PROJECT_ID, project);
    data.set(ENABLED, configuration.is_enabled.unwrap_or_default());
    data.set(BLOCKING, configuration.is_blocking.unwrap_or_default());

    let scope_blocks: Vec<Value> = scopes.iter().map(scope_to_block).collect();
    data.set(SETTINGS, json!([{ SCOPE: scope_blocks }]));
    Ok(())
}

fn scope_from_block(block: &Value) -> ProviderResult<ScopeEntry> {
    let text = |key: &str| {
        block
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let match_kind = match block.get(MATCH_TYPE).and_then(Value::as_str) {
        Some(raw) => raw.parse::<MatchKind>().map_err(|_| {
            ValidationError::InvalidCanonicalValue {
                attribute: MATCH_TYPE.to_string(),
                value: raw.to_string(),
                allowed: MatchKind::ALL.iter().map(|k| k.to_string()).collect(),
            }
        })?,
        None => MatchKind::default(),
    };

    Ok(ScopeEntry {
        repository_id: text(REPOSITORY_ID),
        ref_name: text(REPOSITORY_REF),
        match_kind,
    })
}

fn scope_to_block(scope: &ScopeEntry) -> Value {
    json!({
        REPOSITORY_ID: scope.repository_id,
        REPOSITORY_REF: scope.ref_name,
        MATCH_TYPE: scope.match_kind.as_str(),
    })
}

/// A branch policy resource built from a kind and its mapper.
#[derive(Debug, Clone)]
pub struct PolicyResource<M> {
    kind: PolicyKind,
    mapper: M,
}

impl<M: PolicyMapper> PolicyResource<M> {
    pub fn new(kind: PolicyKind, mapper: M) -> Self {
        Self { kind, mapper }
    }

    fn expand(&self, data: &ResourceData) -> ProviderResult<(PolicyConfiguration, String)> {
        let expanded = self.mapper.expand(data, self.kind.type_id())?;
        trace!("Expanded {} policy: {:?}", self.kind, expanded.0);
        Ok(expanded)
    }
}

impl<M, C> ResourceHandler<C> for PolicyResource<M>
where
    M: PolicyMapper,
    C: PolicyClient,
{
    fn resource_type(&self) -> &'static str {
        self.kind.resource_name()
    }

    fn schema(&self) -> ResourceSchema {
        base_schema(self.kind, self.mapper.settings_attributes())
    }

    async fn create(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let (configuration, project) = self.expand(data)?;
        info!("Creating {} policy in project {}", self.kind, project);

        let created = client
            .create_policy_configuration(CreatePolicyConfigurationArgs {
                configuration,
                project: project.clone(),
            })
            .await
            .map_err(|e| ProviderError::remote("Error creating policy in Azure DevOps", e))?;

        // The remote policy exists from here on; keep its ID even if flatten fails.
        if let Some(id) = created.id {
            data.set_id(id.to_string());
        }
        self.mapper.flatten(data, &created, &project)?;
        info!("Created {} policy {} in project {}", self.kind, data.id(), project);
        Ok(())
    }

    async fn read(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let id = NumericId::parse(RESOURCE_LABEL, data.id())?;
        let project = data.get_str(PROJECT_ID).unwrap_or_default().to_string();
        debug!("Reading {} policy {} in project {}", self.kind, id, project);

        let result = client
            .get_policy_configuration(GetPolicyConfigurationArgs {
                project: project.clone(),
                configuration_id: id.value(),
            })
            .await;

        match result {
            Ok(configuration) => self.mapper.flatten(data, &configuration, &project),
            Err(e) if e.is_not_found() => {
                warn!(
                    "{} policy {} in project {} no longer exists",
                    self.kind, id, project
                );
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(ProviderError::remote(
                format!(
                    "Error looking up policy configuration with ID ({}) and project ID ({})",
                    id, project
                ),
                e,
            )),
        }
    }

    async fn update(&self, client: &C, data: &mut ResourceData) -> ProviderResult<()> {
        let (configuration, project) = self.expand(data)?;
        let id = configuration
            .id
            .ok_or_else(|| ProviderError::missing_id(self.kind.resource_name()))?;
        info!("Updating {} policy {} in project {}", self.kind, id, project);

        let updated = client
            .update_policy_configuration(UpdatePolicyConfigurationArgs {
                configuration,
                project: project.clone(),
                configuration_id: id,
            })
            .await
            .map_err(|e| ProviderError::remote("Error updating policy in Azure DevOps", e))?;

        self.mapper.flatten(data, &updated, &project)
    }

    async fn delete(&self, client: &C, data: &ResourceData) -> ProviderResult<()> {
        let (configuration, project) = self.expand(data)?;
        let id = configuration
            .id
            .ok_or_else(|| ProviderError::missing_id(self.kind.resource_name()))?;
        info!("Deleting {} policy {} in project {}", self.kind, id, project);

        client
            .delete_policy_configuration(DeletePolicyConfigurationArgs {
                project,
                configuration_id: id,
            })
            .await
            .map_err(|e| ProviderError::remote("Error deleting policy in Azure DevOps", e))
    }

    async fn import(&self, _client: &C, data: &ResourceData) -> ProviderResult<Vec<ResourceData>> {
        let import_id = ImportId::parse(data.id())?;
        info!(
            "Importing {} policy {} from project {}",
            self.kind, import_id.id, import_id.project
        );

        let mut imported = data.clone();
        imported.set(PROJECT_ID, import_id.project);
        imported.set_id(import_id.id.to_string());
        Ok(vec![imported])
    }
}
