//! Parent identifiers for group-scoped resources.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GitlabError, Result};

/// A GitLab group, addressed either by numeric ID or by its full path.
///
/// ```
/// use glapi::GroupId;
///
/// assert_eq!(GroupId::from(42).path_segment().unwrap(), "42");
/// assert_eq!(GroupId::from("acme/platform").path_segment().unwrap(), "acme%2Fplatform");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum GroupId {
    /// Numeric group ID.
    Numeric(u64),
    /// Namespace path (e.g., "acme/platform").
    Named(String),
}

impl GroupId {
    /// Resolve the identifier to a percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::InvalidIdentifier`] for a blank namespace path.
    /// Any other path is encoded exactly as given.
    pub fn path_segment(&self) -> Result<String> {
        match self {
            Self::Numeric(id) => Ok(id.to_string()),
            Self::Named(path) => {
                if path.trim().is_empty() {
                    return Err(GitlabError::InvalidIdentifier(path.clone()));
                }
                Ok(urlencoding::encode(path).into_owned())
            }
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(path) => f.write_str(path),
        }
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for GroupId {
    fn from(path: &str) -> Self {
        Self::Named(path.to_string())
    }
}

impl From<String> for GroupId {
    fn from(path: String) -> Self {
        Self::Named(path)
    }
}

impl From<&GroupId> for GroupId {
    fn from(id: &GroupId) -> Self {
        id.clone()
    }
}

/// Parses all-digit input as a numeric ID and anything else as a path.
impl FromStr for GroupId {
    type Err = GitlabError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(GitlabError::InvalidIdentifier(s.to_string()));
        }
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Named(s.to_string()), Self::Numeric))
    }
}
