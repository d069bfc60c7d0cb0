//! Identifier value objects.
//!
//! The host runtime stores identifiers as strings while the Azure DevOps API
//! keys policies and pools by integers. These types do the conversion once
//! and carry the parsed form around.

use crate::error::{ProviderError, ProviderResult};
use std::fmt;

/// Expected layout of a policy import ID, used in error messages.
pub const IMPORT_ID_FORMAT: &str = "projectid/resourceId";

/// A numeric remote identifier parsed from the host's string ID slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericId(i32);

impl NumericId {
    /// Parse `raw`, naming `resource_type` in the error.
    pub fn parse(resource_type: &str, raw: &str) -> ProviderResult<Self> {
        raw.parse::<i32>()
            .map(Self)
            .map_err(|e| ProviderError::invalid_id(resource_type, raw, e))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for NumericId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A composite `<project>/<id>` import identifier.
///
/// Only the first `/` separates the parts; both must be non-empty and the
/// second must be an integer.
///
/// ```rust
/// use azuredevops_provider::resource::ImportId;
///
/// let id = ImportId::parse("proj1/42").unwrap();
/// assert_eq!(id.project, "proj1");
/// assert_eq!(id.id.value(), 42);
///
/// assert!(ImportId::parse("proj1").is_err());
/// assert!(ImportId::parse("proj1/abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub project: String,
    pub id: NumericId,
}

impl ImportId {
    pub fn parse(raw: &str) -> ProviderResult<Self> {
        let malformed = || ProviderError::InvalidImportId {
            id: raw.to_string(),
            expected: IMPORT_ID_FORMAT.to_string(),
        };

        let (project, id) = raw.split_once('/').ok_or_else(malformed)?;
        if project.is_empty() || id.is_empty() {
            return Err(malformed());
        }

        let id = NumericId::parse("Policy configuration", id)?;
        Ok(Self {
            project: project.to_string(),
            id,
        })
    }
}
