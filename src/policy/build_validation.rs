//! Build validation branch policy.
//!
//! Requires a build definition to succeed before a pull request completes.

use super::base::{
    PolicyMapper, PolicyResource, base_expand, base_flatten, set_setting, settings_block,
};
use super::kind::PolicyKind;
use super::settings;
use crate::client::PolicyConfiguration;
use crate::error::{ProviderResult, ValidationError};
use crate::resource::ResourceData;
use crate::schema::AttributeDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const BUILD_DEFINITION_ID: &str = "build_definition_id";
pub const DISPLAY_NAME: &str = "display_name";
pub const VALID_DURATION: &str = "valid_duration";
pub const MANUAL_QUEUE_ONLY: &str = "manual_queue_only";
pub const QUEUE_ON_SOURCE_UPDATE_ONLY: &str = "queue_on_source_update_only";

// Minutes a successful build stays valid
const DEFAULT_VALID_DURATION: i64 = 720;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildSettings {
    build_definition_id: i64,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default = "default_valid_duration")]
    valid_duration: i64,
    #[serde(default)]
    manual_queue_only: bool,
    #[serde(default = "default_queue_on_source_update_only")]
    queue_on_source_update_only: bool,
}

fn default_valid_duration() -> i64 {
    DEFAULT_VALID_DURATION
}

fn default_queue_on_source_update_only() -> bool {
    true
}

impl BuildSettings {
    fn from_block(block: &Map<String, Value>) -> ProviderResult<Self> {
        let build_definition_id = block
            .get(BUILD_DEFINITION_ID)
            .and_then(Value::as_i64)
            .ok_or_else(|| ValidationError::missing_required(BUILD_DEFINITION_ID))?;

        Ok(Self {
            build_definition_id,
            display_name: block
                .get(DISPLAY_NAME)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            valid_duration: block
                .get(VALID_DURATION)
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_VALID_DURATION),
            manual_queue_only: block
                .get(MANUAL_QUEUE_ONLY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            queue_on_source_update_only: block
                .get(QUEUE_ON_SOURCE_UPDATE_ONLY)
                .and_then(Value::as_bool)
                .unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildValidation;

impl PolicyMapper for BuildValidation {
    fn settings_attributes(&self) -> Vec<AttributeDefinition> {
        vec![
            AttributeDefinition::integer(BUILD_DEFINITION_ID)
                .required()
                .describe("Build definition that must succeed"),
            AttributeDefinition::string(DISPLAY_NAME).with_default(""),
            AttributeDefinition::integer(VALID_DURATION)
                .with_default(DEFAULT_VALID_DURATION)
                .describe("Minutes a successful build stays valid; 0 never expires"),
            AttributeDefinition::boolean(MANUAL_QUEUE_ONLY).with_default(false),
            AttributeDefinition::boolean(QUEUE_ON_SOURCE_UPDATE_ONLY).with_default(true),
        ]
    }

    fn expand(
        &self,
        data: &ResourceData,
        type_id: Uuid,
    ) -> ProviderResult<(PolicyConfiguration, String)> {
        let (mut configuration, project) = base_expand(data, type_id)?;
        let fields = BuildSettings::from_block(&settings_block(data))?;
        settings::merge_fields(&mut configuration.settings, &fields)?;
        Ok((configuration, project))
    }

    fn flatten(
        &self,
        data: &mut ResourceData,
        configuration: &PolicyConfiguration,
        project: &str,
    ) -> ProviderResult<()> {
        let fields: Option<BuildSettings> = settings::decode_fields(&configuration.settings)?;
        base_flatten(data, configuration, project)?;

        if let Some(fields) = fields {
            set_setting(data, BUILD_DEFINITION_ID, fields.build_definition_id);
            set_setting(data, DISPLAY_NAME, fields.display_name.unwrap_or_default());
            set_setting(data, VALID_DURATION, fields.valid_duration);
            set_setting(data, MANUAL_QUEUE_ONLY, fields.manual_queue_only);
            set_setting(
                data,
                QUEUE_ON_SOURCE_UPDATE_ONLY,
                fields.queue_on_source_update_only,
            );
        }
        Ok(())
    }
}

/// `azuredevops_branch_policy_build_validation`
pub fn build_validation_resource() -> PolicyResource<BuildValidation> {
    PolicyResource::new(PolicyKind::SuccessfulBuild, BuildValidation)
}
