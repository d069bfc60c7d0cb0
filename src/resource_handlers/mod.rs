//! Resource handlers that are not branch policies.
//!
//! Branch policies share the generic resource in [`crate::policy`]; every
//! other resource type gets its own handler here.
//!
//! * [`agent_pool`] - organization-level agent pools

pub mod agent_pool;

pub use agent_pool::{AgentPoolResource, agent_pool_schema};
