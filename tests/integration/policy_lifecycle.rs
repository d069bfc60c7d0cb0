//! Branch policy lifecycle through the provider.

use crate::common::{
    BUILD_VALIDATION, COMMENT_RESOLUTION, MIN_REVIEWERS, build_validation_config,
    comment_resolution_config, import_request, min_reviewers_config, provider,
};
use azuredevops_provider::ProviderError;
use azuredevops_provider::client::ClientError;
use azuredevops_provider::policy::PolicyKind;
use serde_json::json;

#[tokio::test]
async fn test_create_then_read_returns_same_attributes() {
    let provider = provider();

    for (resource_type, config) in [
        (MIN_REVIEWERS, min_reviewers_config("proj1")),
        (BUILD_VALIDATION, build_validation_config("proj1")),
        (COMMENT_RESOLUTION, comment_resolution_config("proj1")),
    ] {
        let mut data = provider.plan(resource_type, config).unwrap();
        provider.create(resource_type, &mut data).await.unwrap();
        assert!(!data.is_absent(), "{resource_type} has no ID after create");

        let created = data.clone();
        provider.read(resource_type, &mut data).await.unwrap();
        assert_eq!(data, created, "{resource_type} drifted between create and read");
    }
}

#[tokio::test]
async fn test_create_sends_typed_policy() {
    let provider = provider();
    let mut data = provider
        .plan(MIN_REVIEWERS, min_reviewers_config("proj1"))
        .unwrap();
    provider.create(MIN_REVIEWERS, &mut data).await.unwrap();

    let id: i32 = data.id().parse().unwrap();
    let stored = provider.client().policy("proj1", id).await.unwrap();

    let policy_type = stored.policy_type.unwrap();
    assert_eq!(
        PolicyKind::from_type_id(policy_type.id),
        Some(PolicyKind::MinReviewerCount)
    );
    assert_eq!(stored.is_blocking, Some(false));
    assert_eq!(stored.settings["minimumApproverCount"], json!(2));
    assert_eq!(stored.settings["creatorVoteCounts"], json!(true));
    assert_eq!(
        stored.settings["scope"],
        json!([
            {"repositoryId": "repo-1", "refName": "refs/heads/main", "matchKind": "Exact"},
            {"repositoryId": null, "refName": "refs/heads/releases/", "matchKind": "Prefix"}
        ])
    );
}

#[tokio::test]
async fn test_read_of_deleted_policy_clears_identity() {
    let provider = provider();
    let mut data = provider
        .plan(COMMENT_RESOLUTION, comment_resolution_config("proj1"))
        .unwrap();
    provider.create(COMMENT_RESOLUTION, &mut data).await.unwrap();

    let id: i32 = data.id().parse().unwrap();
    assert!(provider.client().remove_policy("proj1", id).await);

    provider.read(COMMENT_RESOLUTION, &mut data).await.unwrap();
    assert!(data.is_absent());
}

#[tokio::test]
async fn test_read_failure_mentions_id_and_project() {
    let provider = provider();
    let mut data = provider
        .plan(MIN_REVIEWERS, min_reviewers_config("proj1"))
        .unwrap();
    provider.create(MIN_REVIEWERS, &mut data).await.unwrap();
    let id = data.id().to_string();

    provider.client().fail_next(500, "internal error").await;
    let error = provider.read(MIN_REVIEWERS, &mut data).await.unwrap_err();

    let message = error.to_string();
    assert!(message.contains(&format!("ID ({})", id)), "{message}");
    assert!(message.contains("project ID (proj1)"), "{message}");
    assert!(!error.is_not_found());
    assert_eq!(data.id(), id);
}

#[tokio::test]
async fn test_update_keeps_identifier() {
    let provider = provider();
    let mut data = provider
        .plan(MIN_REVIEWERS, min_reviewers_config("proj1"))
        .unwrap();
    provider.create(MIN_REVIEWERS, &mut data).await.unwrap();
    let id = data.id().to_string();

    let mut planned = provider
        .plan(
            MIN_REVIEWERS,
            json!({
                "project_id": "proj1",
                "settings": [{"reviewer_count": 4, "scope": [{"repository_ref": "refs/heads/main"}]}]
            }),
        )
        .unwrap();
    planned.set_id(id.clone());

    provider.update(MIN_REVIEWERS, &mut planned).await.unwrap();
    assert_eq!(planned.id(), id);

    let stored = provider
        .client()
        .policy("proj1", id.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.revision, Some(2));
    assert_eq!(stored.settings["minimumApproverCount"], json!(4));
    assert_eq!(stored.is_blocking, Some(true));
}

#[tokio::test]
async fn test_update_of_missing_policy_fails() {
    let provider = provider();
    let mut data = provider
        .plan(COMMENT_RESOLUTION, comment_resolution_config("proj1"))
        .unwrap();
    data.set_id("99");

    let error = provider
        .update(COMMENT_RESOLUTION, &mut data)
        .await
        .unwrap_err();
    assert!(error.to_string().starts_with("Error updating policy"));
    assert!(matches!(
        error,
        ProviderError::Remote {
            source: ClientError::NotFound { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_delete_removes_policy() {
    let provider = provider();
    let mut data = provider
        .plan(BUILD_VALIDATION, build_validation_config("proj1"))
        .unwrap();
    provider.create(BUILD_VALIDATION, &mut data).await.unwrap();
    let id: i32 = data.id().parse().unwrap();

    provider.delete(BUILD_VALIDATION, &data).await.unwrap();
    assert!(provider.client().policy("proj1", id).await.is_none());

    let error = provider.delete(BUILD_VALIDATION, &data).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_create_failure_assigns_no_identity() {
    let provider = provider();
    let mut data = provider
        .plan(MIN_REVIEWERS, min_reviewers_config("proj1"))
        .unwrap();

    provider.client().fail_next(401, "unauthorized").await;
    let error = provider.create(MIN_REVIEWERS, &mut data).await.unwrap_err();

    assert!(error.to_string().contains("unauthorized"));
    assert!(data.is_absent());
}

#[tokio::test]
async fn test_import_sets_project_and_id() {
    let provider = provider();
    let imported = provider
        .import(MIN_REVIEWERS, &import_request("proj1/42"))
        .await
        .unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].id(), "42");
    assert_eq!(imported[0].get_str("project_id"), Some("proj1"));
    assert_eq!(provider.client().call_count(), 0);
}

#[tokio::test]
async fn test_import_then_read_restores_state() {
    let provider = provider();
    let mut data = provider
        .plan(BUILD_VALIDATION, build_validation_config("proj1"))
        .unwrap();
    provider.create(BUILD_VALIDATION, &mut data).await.unwrap();

    let request = import_request(&format!("proj1/{}", data.id()));
    let mut imported = provider
        .import(BUILD_VALIDATION, &request)
        .await
        .unwrap()
        .remove(0);
    provider.read(BUILD_VALIDATION, &mut imported).await.unwrap();

    assert_eq!(imported, data);
}

#[tokio::test]
async fn test_malformed_import_ids_leave_data_untouched() {
    let provider = provider();

    for raw in ["", "proj1", "proj1/", "/42", "proj1/abc", "proj1/4 2"] {
        let request = import_request(raw);
        let before = request.clone();

        let result = provider.import(COMMENT_RESOLUTION, &request).await;
        assert!(result.is_err(), "{raw:?} was accepted");
        assert_eq!(request, before);
    }
}

#[tokio::test]
async fn test_invalid_settings_rejected_before_any_call() {
    let provider = provider();

    let two_settings_blocks = json!({
        "project_id": "proj1",
        "settings": [
            {"scope": [{"match_type": "Exact"}]},
            {"scope": [{"match_type": "Exact"}]}
        ]
    });
    assert!(
        provider
            .validate_resource_config(COMMENT_RESOLUTION, &two_settings_blocks)
            .is_err()
    );

    let no_scope = json!({"project_id": "proj1", "settings": [{"scope": []}]});
    assert!(provider.plan(COMMENT_RESOLUTION, no_scope).is_err());

    let bad_match = json!({
        "project_id": "proj1",
        "settings": [{"scope": [{"match_type": "Suffix"}]}]
    });
    assert!(provider.plan(COMMENT_RESOLUTION, bad_match).is_err());

    assert_eq!(provider.client().call_count(), 0);
}
