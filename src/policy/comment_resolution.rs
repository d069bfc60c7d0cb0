//! Comment resolution branch policy.
//!
//! Carries no settings beyond the shared scope list.

use super::base::{PolicyMapper, PolicyResource};
use super::kind::PolicyKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentResolution;

impl PolicyMapper for CommentResolution {}

/// `azuredevops_branch_policy_comment_resolution`
pub fn comment_resolution_resource() -> PolicyResource<CommentResolution> {
    PolicyResource::new(PolicyKind::NoActiveComments, CommentResolution)
}
