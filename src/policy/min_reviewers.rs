//! Minimum reviewer count branch policy.

use super::base::{
    PolicyMapper, PolicyResource, base_expand, base_flatten, set_setting, settings_block,
};
use super::kind::PolicyKind;
use super::settings;
use crate::client::PolicyConfiguration;
use crate::error::ProviderResult;
use crate::resource::ResourceData;
use crate::schema::AttributeDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const REVIEWER_COUNT: &str = "reviewer_count";
pub const SUBMITTER_CAN_VOTE: &str = "submitter_can_vote";

const DEFAULT_REVIEWER_COUNT: i64 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinReviewerSettings {
    #[serde(default = "default_reviewer_count")]
    minimum_approver_count: i64,
    #[serde(default)]
    creator_vote_counts: bool,
}

fn default_reviewer_count() -> i64 {
    DEFAULT_REVIEWER_COUNT
}

/// Adds approver count and creator vote to the shared policy attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinReviewers;

impl PolicyMapper for MinReviewers {
    fn settings_attributes(&self) -> Vec<AttributeDefinition> {
        vec![
            AttributeDefinition::integer(REVIEWER_COUNT)
                .with_default(DEFAULT_REVIEWER_COUNT)
                .describe("Number of approving reviewers required"),
            AttributeDefinition::boolean(SUBMITTER_CAN_VOTE)
                .with_default(false)
                .describe("Whether the pull request author's vote counts"),
        ]
    }

    fn expand(
        &self,
        data: &ResourceData,
        type_id: Uuid,
    ) -> ProviderResult<(PolicyConfiguration, String)> {
        let (mut configuration, project) = base_expand(data, type_id)?;

        let block = settings_block(data);
        let fields = MinReviewerSettings {
            minimum_approver_count: block
                .get(REVIEWER_COUNT)
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_REVIEWER_COUNT),
            creator_vote_counts: block
                .get(SUBMITTER_CAN_VOTE)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        };
        settings::merge_fields(&mut configuration.settings, &fields)?;

        Ok((configuration, project))
    }

    fn flatten(
        &self,
        data: &mut ResourceData,
        configuration: &PolicyConfiguration,
        project: &str,
    ) -> ProviderResult<()> {
        let fields: Option<MinReviewerSettings> = settings::decode_fields(&configuration.settings)?;
        base_flatten(data, configuration, project)?;

        let (count, creator_votes) = fields
            .map(|f| (f.minimum_approver_count, f.creator_vote_counts))
            .unwrap_or((DEFAULT_REVIEWER_COUNT, false));
        set_setting(data, REVIEWER_COUNT, count);
        set_setting(data, SUBMITTER_CAN_VOTE, creator_votes);
        Ok(())
    }
}

/// `azuredevops_branch_policy_min_reviewers`
pub fn min_reviewers_resource() -> PolicyResource<MinReviewers> {
    PolicyResource::new(PolicyKind::MinReviewerCount, MinReviewers)
}
