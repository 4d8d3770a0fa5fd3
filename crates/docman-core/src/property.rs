//! Property definitions and property values

use crate::error::{Error, Result};
use crate::limits::{required_long, LongString};
use serde::{Deserialize, Serialize};

/// A named attribute definition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProperty")]
pub struct Property {
    name: LongString,
}

#[derive(Deserialize)]
struct RawProperty {
    name: String,
}

impl TryFrom<RawProperty> for Property {
    type Error = Error;

    fn try_from(raw: RawProperty) -> Result<Self> {
        Self::new(raw.name)
    }
}

impl Property {
    /// Create a property, rejecting empty or oversized names
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required_long("property name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A concrete value bound to a property definition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPropertyValue")]
pub struct PropertyValue {
    value: LongString,
    property: Property,
}

#[derive(Deserialize)]
struct RawPropertyValue {
    value: String,
    property: Property,
}

impl TryFrom<RawPropertyValue> for PropertyValue {
    type Error = Error;

    fn try_from(raw: RawPropertyValue) -> Result<Self> {
        Self::with_property(raw.property, raw.value)
    }
}

impl PropertyValue {
    /// Create a property value from a property name and a value
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::with_property(Property::new(property)?, value)
    }

    /// Bind a value to an existing property definition
    pub fn with_property(property: Property, value: impl Into<String>) -> Result<Self> {
        Ok(Self {
            value: required_long("property value", value)?,
            property,
        })
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Name of the bound property
    pub fn name(&self) -> &str {
        self.property.name()
    }

    /// Whether this is `value` bound to the property called `name`
    pub fn is(&self, name: &str, value: &str) -> bool {
        self.property.name() == name && self.value.as_str() == value
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.property, self.value)
    }
}
