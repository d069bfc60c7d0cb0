//! Registry of the branch policy kinds the provider manages.

use std::fmt;
use uuid::{Uuid, uuid};

/// A remote policy type with a fixed, globally unique identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// All pull request comments must be resolved
    NoActiveComments,
    /// Minimum number of approving reviewers
    MinReviewerCount,
    /// A build must succeed before completing a pull request
    SuccessfulBuild,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::NoActiveComments,
        PolicyKind::MinReviewerCount,
        PolicyKind::SuccessfulBuild,
    ];

    /// Policy type identifier assigned by Azure DevOps.
    pub const fn type_id(&self) -> Uuid {
        match self {
            PolicyKind::NoActiveComments => uuid!("c6a1889d-b943-4856-b76f-9e46bb6b0df2"),
            PolicyKind::MinReviewerCount => uuid!("fa4e907d-c16b-4a4c-9dfa-4906e5d171dd"),
            PolicyKind::SuccessfulBuild => uuid!("0609b952-1397-4640-95ec-e00a01b2c241"),
        }
    }

    /// Resource type name the kind is registered under.
    pub const fn resource_name(&self) -> &'static str {
        match self {
            PolicyKind::NoActiveComments => "azuredevops_branch_policy_comment_resolution",
            PolicyKind::MinReviewerCount => "azuredevops_branch_policy_min_reviewers",
            PolicyKind::SuccessfulBuild => "azuredevops_branch_policy_build_validation",
        }
    }

    pub fn from_type_id(id: Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == id)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::NoActiveComments => "comment resolution",
            PolicyKind::MinReviewerCount => "minimum reviewers",
            PolicyKind::SuccessfulBuild => "build validation",
        };
        f.write_str(name)
    }
}
