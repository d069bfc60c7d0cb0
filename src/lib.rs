//! Azure DevOps resource handlers for an infrastructure-as-code provider.
//!
//! Translates between the attribute schema a host orchestration runtime
//! keeps for each resource and the Azure DevOps REST API, for branch
//! policies and agent pools.
//!
//! # Core Components
//!
//! - [`AzureDevOpsProvider`] - Resource type registry and lifecycle dispatch
//! - [`ResourceHandler`] - create/read/update/delete/import for one resource type
//! - [`policy::PolicyResource`] - Generic branch policy built from a kind and a mapper
//! - [`client`] - Remote client traits with REST and in-memory implementations
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use azuredevops_provider::{AzureDevOpsProvider, ProviderConfig};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = AzureDevOpsProvider::from_config(ProviderConfig::from_env()?)?;
//!
//! let mut policy = provider.plan(
//!     "azuredevops_branch_policy_min_reviewers",
//!     json!({
//!         "project_id": "9a5b3a1e-0c1f-4d3b-9d6e-2f1c2e8b7a10",
//!         "settings": [{"reviewer_count": 2, "scope": [{"repository_ref": "refs/heads/main"}]}]
//!     }),
//! )?;
//! provider
//!     .create("azuredevops_branch_policy_min_reviewers", &mut policy)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod policy;
pub mod provider;
pub mod resource;
pub mod resource_handlers;
pub mod schema;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ProviderConfig};
pub use error::{ProviderError, ProviderResult, ValidationError, ValidationResult};
pub use provider::AzureDevOpsProvider;
pub use resource::{ResourceData, ResourceHandler};
pub use schema::ResourceSchema;
