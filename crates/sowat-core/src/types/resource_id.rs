//! Resource identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum accepted identifier length.
const MAX_LEN: usize = 128;

/// A validated identifier for a backend resource (user, plan, whitelist entry).
///
/// Identifiers are interpolated into request paths, so anything that could
/// escape the path segment is rejected.
///
/// # Example
///
/// ```
/// use sowat_core::ResourceId;
///
/// let id = ResourceId::new("8f14e45f-ceea-467f-a8e5-1c2b0c4e7a11").unwrap();
/// assert_eq!(id.as_str(), "8f14e45f-ceea-467f-a8e5-1c2b0c4e7a11");
/// assert!(ResourceId::new("../etc").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new identifier, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::ResourceId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.len() > MAX_LEN {
            return Err(InvalidInputError::ResourceId {
                value: s.to_string(),
                reason: format!("exceeds maximum length of {} characters", MAX_LEN),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(InvalidInputError::ResourceId {
                value: s.to_string(),
                reason: format!("contains invalid character '{}'", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}
