//! Common test utilities for provider integration tests.

use azuredevops_provider::client::InMemoryClient;
use azuredevops_provider::{AzureDevOpsProvider, ResourceData};
use serde_json::{Value, json};

pub const MIN_REVIEWERS: &str = "azuredevops_branch_policy_min_reviewers";
pub const BUILD_VALIDATION: &str = "azuredevops_branch_policy_build_validation";
pub const COMMENT_RESOLUTION: &str = "azuredevops_branch_policy_comment_resolution";
pub const AGENT_POOL: &str = "azuredevops_agent_pool";

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Provider over a fresh in-memory client.
pub fn provider() -> AzureDevOpsProvider<InMemoryClient> {
    init_logging();
    AzureDevOpsProvider::new(InMemoryClient::new())
}

pub fn min_reviewers_config(project: &str) -> Value {
    json!({
        "project_id": project,
        "enabled": true,
        "blocking": false,
        "settings": [{
            "reviewer_count": 2,
            "submitter_can_vote": true,
            "scope": [
                {"repository_id": "repo-1", "repository_ref": "refs/heads/main", "match_type": "exact"},
                {"repository_ref": "refs/heads/releases/", "match_type": "Prefix"}
            ]
        }]
    })
}

pub fn build_validation_config(project: &str) -> Value {
    json!({
        "project_id": project,
        "settings": [{
            "build_definition_id": 17,
            "display_name": "CI",
            "scope": [{"repository_id": "repo-1", "repository_ref": "refs/heads/main"}]
        }]
    })
}

pub fn comment_resolution_config(project: &str) -> Value {
    json!({
        "project_id": project,
        "settings": [{"scope": [{"match_type": "Exact"}]}]
    })
}

/// Resource data whose ID slot holds an import identifier.
pub fn import_request(id: &str) -> ResourceData {
    let mut data = ResourceData::new();
    data.set_id(id);
    data
}
