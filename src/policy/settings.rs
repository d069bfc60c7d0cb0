//! Codec for the policy settings payload.
//!
//! The remote API returns settings as free-form JSON whose shape depends on
//! the policy type. Every branch policy shares the `scope` list:
//!
//! ```json
//! {"scope": [{"repositoryId": "...", "refName": "refs/heads/main", "matchKind": "Exact"}]}
//! ```
//!
//! Decoding is strict. A null payload or one without `scope` yields no
//! scopes; any other mismatch is a [`SettingsError`]. Keys the codec does not
//! own are ignored so each policy kind can decode its own keys from the same
//! payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

/// Errors decoding or encoding a settings payload.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("policy settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("malformed policy settings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// How a scope's ref name is matched against branch names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MatchKind {
    #[default]
    Exact,
    Prefix,
}

impl MatchKind {
    pub const ALL: [MatchKind; 2] = [MatchKind::Exact, MatchKind::Prefix];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "Exact",
            MatchKind::Prefix => "Prefix",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Case-insensitive, matching what the service accepts
impl FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown match kind '{}'", s))
    }
}

impl TryFrom<String> for MatchKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MatchKind> for String {
    fn from(kind: MatchKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One repository/branch filter of a policy.
///
/// `None` repository means every repository in the project and `None` ref
/// name means every branch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeEntry {
    #[serde(default)]
    pub repository_id: Option<String>,
    #[serde(default)]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub match_kind: MatchKind,
}

#[derive(Deserialize)]
struct ScopeSettings {
    #[serde(default)]
    scope: Option<Vec<ScopeEntry>>,
}

/// Build the settings payload for `scopes`, preserving their order.
pub fn encode(scopes: &[ScopeEntry]) -> Value {
    json!({ "scope": scopes })
}

/// Read the scope list out of a settings payload.
///
/// # Examples
///
/// ```rust
/// use azuredevops_provider::policy::settings::{self, MatchKind, ScopeEntry};
/// use serde_json::json;
///
/// let scopes = settings::decode(&json!({
///     "minimumApproverCount": 2,
///     "scope": [{"repositoryId": null, "refName": "refs/heads/main", "matchKind": "exact"}]
/// }))
/// .unwrap();
///
/// assert_eq!(scopes[0].ref_name.as_deref(), Some("refs/heads/main"));
/// assert_eq!(scopes[0].match_kind, MatchKind::Exact);
/// assert!(settings::decode(&json!({"scope": "main"})).is_err());
/// ```
pub fn decode(raw: &Value) -> Result<Vec<ScopeEntry>, SettingsError> {
    let settings: Option<ScopeSettings> = decode_fields(raw)?;
    Ok(settings.and_then(|s| s.scope).unwrap_or_default())
}

/// Decode a typed view of the settings payload; `None` for a null payload.
pub fn decode_fields<T: DeserializeOwned>(raw: &Value) -> Result<Option<T>, SettingsError> {
    match raw {
        Value::Null => Ok(None),
        Value::Object(_) => Ok(Some(T::deserialize(raw)?)),
        other => Err(SettingsError::NotAnObject(json_type(other))),
    }
}

/// Merge the serialized `fields` into a settings payload object.
pub fn merge_fields<T: Serialize>(payload: &mut Value, fields: &T) -> Result<(), SettingsError> {
    let extra = match serde_json::to_value(fields)? {
        Value::Object(map) => map,
        other => return Err(SettingsError::NotAnObject(json_type(&other))),
    };

    if payload.is_null() {
        *payload = Value::Object(Map::new());
    }
    match payload {
        Value::Object(target) => {
            target.extend(extra);
            Ok(())
        }
        other => Err(SettingsError::NotAnObject(json_type(other))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
