//! Agent pool lifecycle through the provider.

use crate::common::{AGENT_POOL, import_request, provider};
use azuredevops_provider::ProviderError;
use azuredevops_provider::client::TaskAgentPoolType;
use serde_json::json;

#[tokio::test]
async fn test_create_then_read_returns_same_attributes() {
    let provider = provider();
    let mut data = provider
        .plan(
            AGENT_POOL,
            json!({"name": "linux", "pool_type": "deployment", "auto_provision": true}),
        )
        .unwrap();

    provider.create(AGENT_POOL, &mut data).await.unwrap();
    let created = data.clone();
    provider.read(AGENT_POOL, &mut data).await.unwrap();

    assert_eq!(data, created);
    assert_eq!(data.get_str("pool_type"), Some("deployment"));
}

#[tokio::test]
async fn test_update_with_malformed_id_issues_no_call() {
    let provider = provider();
    let mut data = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    data.set_id("not-a-number");

    let error = provider.update(AGENT_POOL, &mut data).await.unwrap_err();

    assert!(matches!(error, ProviderError::InvalidId { .. }));
    assert!(error.to_string().contains("not-a-number"));
    assert_eq!(provider.client().call_count(), 0);
}

#[tokio::test]
async fn test_update_changes_name_in_place() {
    let provider = provider();
    let mut data = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    provider.create(AGENT_POOL, &mut data).await.unwrap();
    let id = data.id().to_string();

    data.set("name", "linux-large");
    data.set("auto_provision", true);
    provider.update(AGENT_POOL, &mut data).await.unwrap();

    assert_eq!(data.id(), id);
    let stored = provider
        .client()
        .pool(id.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.name.as_deref(), Some("linux-large"));
    assert_eq!(stored.auto_provision, Some(true));
    assert_eq!(stored.pool_type, Some(TaskAgentPoolType::Automation));
}

#[tokio::test]
async fn test_pool_type_change_forces_replacement() {
    let provider = provider();
    let replaced = provider
        .requires_replacement(
            AGENT_POOL,
            &json!({"name": "linux", "pool_type": "automation"}),
            &json!({"name": "linux-2", "pool_type": "deployment"}),
        )
        .unwrap();
    assert_eq!(replaced, vec!["pool_type"]);
}

#[tokio::test]
async fn test_read_of_deleted_pool_clears_identity() {
    let provider = provider();
    let mut data = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    provider.create(AGENT_POOL, &mut data).await.unwrap();

    assert!(provider.client().remove_pool(data.id().parse().unwrap()).await);
    provider.read(AGENT_POOL, &mut data).await.unwrap();
    assert!(data.is_absent());
}

#[tokio::test]
async fn test_delete_and_generic_failure() {
    let provider = provider();
    let mut data = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    provider.create(AGENT_POOL, &mut data).await.unwrap();

    provider.client().fail_next(503, "unavailable").await;
    let error = provider.delete(AGENT_POOL, &data).await.unwrap_err();
    assert!(!error.is_not_found());
    assert!(error.to_string().contains(&format!("ID ({})", data.id())));

    provider.delete(AGENT_POOL, &data).await.unwrap();
    assert!(provider.client().pool(data.id().parse().unwrap()).await.is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_rejected_by_service() {
    let provider = provider();
    let mut first = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    let mut second = first.clone();

    provider.create(AGENT_POOL, &mut first).await.unwrap();
    let error = provider.create(AGENT_POOL, &mut second).await.unwrap_err();

    assert!(error.to_string().contains("already exists"));
    assert!(second.is_absent());
}

#[tokio::test]
async fn test_import_then_read() {
    let provider = provider();
    let mut data = provider.plan(AGENT_POOL, json!({"name": "linux"})).unwrap();
    provider.create(AGENT_POOL, &mut data).await.unwrap();

    let mut imported = provider
        .import(AGENT_POOL, &import_request(data.id()))
        .await
        .unwrap()
        .remove(0);
    provider.read(AGENT_POOL, &mut imported).await.unwrap();

    assert_eq!(imported, data);
}
