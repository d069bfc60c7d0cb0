//! REST client tests against a mock Azure DevOps server.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/{project}/_apis/policy/configurations` | `create_policy_*` |
//! | GET    | `/{project}/_apis/policy/configurations/{id}` | `get_policy_*` |
//! | PATCH  | `/_apis/distributedtask/pools/{id}` | `update_pool_*` |
//! | DELETE | `/_apis/distributedtask/pools/{id}` | `delete_pool_*` |

use crate::common::{MIN_REVIEWERS, min_reviewers_config};
use azuredevops_provider::client::{
    AgentPoolClient, ClientError, CreatePolicyConfigurationArgs, DeleteAgentPoolArgs,
    GetPolicyConfigurationArgs, PolicyClient, PolicyConfiguration, PolicyTypeRef, RestClient,
    TaskAgentPool, UpdateAgentPoolArgs,
};
use azuredevops_provider::policy::PolicyKind;
use azuredevops_provider::{AzureDevOpsProvider, ProviderConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(mock_server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        org_service_url: format!("{}/contoso/", mock_server.uri()),
        personal_access_token: "pat".to_string(),
        timeout_secs: 5,
    }
}

fn policy_response(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "revision": 1,
        "isEnabled": true,
        "isBlocking": false,
        "isDeleted": false,
        "type": {
            "id": PolicyKind::MinReviewerCount.type_id(),
            "displayName": "Minimum number of reviewers"
        },
        "settings": {
            "minimumApproverCount": 2,
            "creatorVoteCounts": true,
            "scope": [
                {"repositoryId": "repo-1", "refName": "refs/heads/main", "matchKind": "Exact"},
                {"repositoryId": null, "refName": "refs/heads/releases/", "matchKind": "Prefix"}
            ]
        },
        "createdDate": "2024-03-01T10:00:00Z",
        "createdBy": {"displayName": "Build Admin"},
        "url": "https://dev.azure.com/contoso/proj1/_apis/policy/configurations/7"
    })
}

#[tokio::test]
async fn create_policy_sends_authenticated_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contoso/proj1/_apis/policy/configurations"))
        .and(query_param("api-version", "5.1"))
        .and(header("authorization", "Basic OnBhdA=="))
        .and(body_partial_json(json!({
            "isEnabled": true,
            "type": {"id": PolicyKind::MinReviewerCount.type_id()}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_response(7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    let created = client
        .create_policy_configuration(CreatePolicyConfigurationArgs {
            configuration: PolicyConfiguration {
                is_enabled: Some(true),
                is_blocking: Some(false),
                policy_type: Some(PolicyTypeRef::new(PolicyKind::MinReviewerCount.type_id())),
                settings: json!({"scope": []}),
                ..Default::default()
            },
            project: "proj1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(7));
    assert_eq!(created.revision, Some(1));
    assert!(created.created_date.is_some());
}

#[tokio::test]
async fn get_policy_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contoso/proj1/_apis/policy/configurations/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    let result = client
        .get_policy_configuration(GetPolicyConfigurationArgs {
            project: "proj1".to_string(),
            configuration_id: 7,
        })
        .await;

    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn get_policy_keeps_status_and_body_of_other_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contoso/proj1/_apis/policy/configurations/7"))
        .respond_with(ResponseTemplate::new(401).set_body_string("TF400813: not authorized"))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    let result = client
        .get_policy_configuration(GetPolicyConfigurationArgs {
            project: "proj1".to_string(),
            configuration_id: 7,
        })
        .await;

    match result {
        Err(ClientError::Api { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("TF400813"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn get_policy_rejects_unexpected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contoso/proj1/_apis/policy/configurations/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    let result = client
        .get_policy_configuration(GetPolicyConfigurationArgs {
            project: "proj1".to_string(),
            configuration_id: 7,
        })
        .await;

    assert!(matches!(result, Err(ClientError::Deserialization { .. })));
}

#[tokio::test]
async fn update_pool_sends_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/contoso/_apis/distributedtask/pools/3"))
        .and(query_param("api-version", "5.1"))
        .and(body_partial_json(json!({"name": "linux-large", "poolType": "automation"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "linux-large",
            "poolType": "automation",
            "autoProvision": false,
            "isHosted": false,
            "size": 4
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    let updated = client
        .update_agent_pool(UpdateAgentPoolArgs {
            pool_id: 3,
            pool: TaskAgentPool {
                name: Some("linux-large".to_string()),
                pool_type: Some(Default::default()),
                auto_provision: Some(false),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(updated.size, Some(4));
}

#[tokio::test]
async fn delete_pool_accepts_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/contoso/_apis/distributedtask/pools/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config(&mock_server)).unwrap();
    client
        .delete_agent_pool(DeleteAgentPoolArgs { pool_id: 3 })
        .await
        .unwrap();
}

#[tokio::test]
async fn provider_create_and_read_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contoso/proj1/_apis/policy/configurations"))
        .and(body_partial_json(json!({
            "settings": {"minimumApproverCount": 2, "creatorVoteCounts": true}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_response(7)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contoso/proj1/_apis/policy/configurations/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_response(7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = AzureDevOpsProvider::from_config(config(&mock_server)).unwrap();
    let mut data = provider
        .plan(MIN_REVIEWERS, min_reviewers_config("proj1"))
        .unwrap();

    provider.create(MIN_REVIEWERS, &mut data).await.unwrap();
    assert_eq!(data.id(), "7");

    let created = data.clone();
    provider.read(MIN_REVIEWERS, &mut data).await.unwrap();
    assert_eq!(data, created);
}
