//! Request and response types matching the Azure DevOps REST API.
//!
//! Fields are optional and `#[serde(default)]` because the service omits
//! unset values and returns more fields than modeled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A branch policy configuration attached to a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyTypeRef>,
    /// Settings payload; its shape depends on the policy type
    #[serde(default)]
    pub settings: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Reference to a policy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTypeRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl PolicyTypeRef {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            display_name: None,
        }
    }
}

/// An agent pool at organization level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAgentPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_type: Option<TaskAgentPoolType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_provision: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hosted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

/// Kind of agent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAgentPoolType {
    #[default]
    Automation,
    Deployment,
}

impl TaskAgentPoolType {
    pub const ALL: [TaskAgentPoolType; 2] =
        [TaskAgentPoolType::Automation, TaskAgentPoolType::Deployment];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskAgentPoolType::Automation => "automation",
            TaskAgentPoolType::Deployment => "deployment",
        }
    }
}

impl fmt::Display for TaskAgentPoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskAgentPoolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown agent pool type '{}'", s))
    }
}

// -- Request arguments --------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreatePolicyConfigurationArgs {
    pub configuration: PolicyConfiguration,
    pub project: String,
}

#[derive(Debug, Clone)]
pub struct GetPolicyConfigurationArgs {
    pub project: String,
    pub configuration_id: i32,
}

#[derive(Debug, Clone)]
pub struct UpdatePolicyConfigurationArgs {
    pub configuration: PolicyConfiguration,
    pub project: String,
    pub configuration_id: i32,
}

#[derive(Debug, Clone)]
pub struct DeletePolicyConfigurationArgs {
    pub project: String,
    pub configuration_id: i32,
}

#[derive(Debug, Clone)]
pub struct AddAgentPoolArgs {
    pub pool: TaskAgentPool,
}

#[derive(Debug, Clone)]
pub struct GetAgentPoolArgs {
    pub pool_id: i32,
}

#[derive(Debug, Clone)]
pub struct UpdateAgentPoolArgs {
    pub pool_id: i32,
    pub pool: TaskAgentPool,
}

#[derive(Debug, Clone)]
pub struct DeleteAgentPoolArgs {
    pub pool_id: i32,
}
