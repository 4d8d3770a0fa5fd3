//! Tag records

use crate::error::{Error, Result};
use crate::limits::{required_long, LongString};
use serde::{Deserialize, Serialize};

/// A named label attached to documents.
///
/// Two tags are the same tag when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTag")]
pub struct Tag {
    name: LongString,
}

#[derive(Deserialize)]
struct RawTag {
    name: String,
}

impl TryFrom<RawTag> for Tag {
    type Error = Error;

    fn try_from(raw: RawTag) -> Result<Self> {
        Self::new(raw.name)
    }
}

impl Tag {
    /// Create a tag, rejecting empty or oversized names
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required_long("tag name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
