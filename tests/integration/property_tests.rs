//! Property-based tests for policy round trips through the provider.
//!
//! Uses proptest to generate scope lists and import identifiers and checks
//! that the provider keeps attributes stable across the remote system.

use crate::common::{COMMENT_RESOLUTION, MIN_REVIEWERS, import_request, provider};
use proptest::prelude::*;
use serde_json::{Value, json};

fn scope_block() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[a-z0-9-]{1,12}"),
        proptest::option::of("refs/heads/[a-z]{1,10}"),
        prop_oneof![Just("Exact"), Just("Prefix"), Just("exact"), Just("PREFIX")],
    )
        .prop_map(|(repository_id, repository_ref, match_type)| {
            let mut block = json!({"match_type": match_type});
            if let Some(id) = repository_id {
                block["repository_id"] = json!(id);
            }
            if let Some(name) = repository_ref {
                block["repository_ref"] = json!(name);
            }
            block
        })
}

proptest! {
    #[test]
    fn test_scopes_survive_create_and_read(
        scopes in proptest::collection::vec(scope_block(), 1..6),
        reviewer_count in 0i64..10,
    ) {
        tokio_test::block_on(async {
            let provider = provider();
            let mut data = provider
                .plan(
                    MIN_REVIEWERS,
                    json!({
                        "project_id": "proj1",
                        "settings": [{"reviewer_count": reviewer_count, "scope": scopes.clone()}]
                    }),
                )
                .unwrap();

            provider.create(MIN_REVIEWERS, &mut data).await.unwrap();
            let created = data.clone();
            provider.read(MIN_REVIEWERS, &mut data).await.unwrap();

            assert_eq!(&data, &created);
            let settings = &data.get_list("settings")[0];
            assert_eq!(settings["scope"].as_array().unwrap().len(), scopes.len());
            assert_eq!(settings["reviewer_count"], json!(reviewer_count));
        });
    }
}

proptest! {
    #[test]
    fn test_well_formed_import_ids_are_accepted(
        project in "[a-zA-Z0-9 _-]{1,20}",
        id in 1i32..i32::MAX,
    ) {
        tokio_test::block_on(async {
            let provider = provider();
            let imported = provider
                .import(COMMENT_RESOLUTION, &import_request(&format!("{}/{}", project, id)))
                .await
                .unwrap();

            assert_eq!(imported[0].id(), id.to_string());
            assert_eq!(imported[0].get_str("project_id"), Some(project.as_str()));
        });
    }
}
