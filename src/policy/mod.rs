//! Branch policy resources.
//!
//! All policy kinds share one generic resource, [`PolicyResource`], which
//! owns the lifecycle and delegates attribute conversion to a
//! [`PolicyMapper`]. The kind registry lives in [`kind`] and the shared
//! settings payload codec in [`settings`].
//!
//! # Examples
//!
//! ```rust
//! use azuredevops_provider::client::InMemoryClient;
//! use azuredevops_provider::policy::min_reviewers_resource;
//! use azuredevops_provider::resource::{ResourceData, ResourceHandler};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InMemoryClient::new();
//! let policy = min_reviewers_resource();
//!
//! let schema = ResourceHandler::<InMemoryClient>::schema(&policy);
//! let mut data = ResourceData::from_config(&schema, json!({
//!     "project_id": "proj1",
//!     "settings": [{"reviewer_count": 2, "scope": [{"repository_ref": "refs/heads/main"}]}]
//! }))?;
//!
//! policy.create(&client, &mut data).await?;
//! assert!(!data.is_absent());
//! # Ok(())
//! # }
//! ```

pub mod base;
pub mod build_validation;
pub mod comment_resolution;
pub mod kind;
pub mod min_reviewers;
pub mod settings;

pub use base::{PolicyMapper, PolicyResource, base_expand, base_flatten, base_schema};
pub use build_validation::{BuildValidation, build_validation_resource};
pub use comment_resolution::{CommentResolution, comment_resolution_resource};
pub use kind::PolicyKind;
pub use min_reviewers::{MinReviewers, min_reviewers_resource};
pub use settings::{MatchKind, ScopeEntry, SettingsError};
