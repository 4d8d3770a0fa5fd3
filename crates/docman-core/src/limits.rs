//! Bounded string values and input validation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buffer size for names, values, filenames and paths (255 bytes)
pub const LONG_STRING_LEN: usize = 255;

/// Buffer size for date strings (30 bytes)
pub const SHORT_STRING_LEN: usize = 30;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    Empty {
        field: &'static str,
    },
    ContainsNul {
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { field, len, max } => {
                write!(f, "{} too long: {} bytes (max {})", field, len, max)
            }
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::ContainsNul { field } => write!(f, "{} cannot contain NUL bytes", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// An owned string that fits a `CAP`-byte NUL-terminated buffer.
///
/// The content is at most `CAP - 1` bytes and never contains a NUL byte.
/// Values that do not fit are rejected rather than truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedString<const CAP: usize>(String);

/// Bounded string for names, values, filenames and paths
pub type LongString = BoundedString<LONG_STRING_LEN>;

/// Bounded string for dates
pub type ShortString = BoundedString<SHORT_STRING_LEN>;

impl<const CAP: usize> BoundedString<CAP> {
    /// Maximum number of content bytes
    pub const MAX_LEN: usize = CAP - 1;

    /// Validate and wrap a string, naming `field` in any error
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_bounded(field, &value, Self::MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const CAP: usize> TryFrom<String> for BoundedString<CAP> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new("value", value)
    }
}

impl<const CAP: usize> TryFrom<&str> for BoundedString<CAP> {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new("value", value)
    }
}

impl<const CAP: usize> From<BoundedString<CAP>> for String {
    fn from(value: BoundedString<CAP>) -> Self {
        value.0
    }
}

impl<const CAP: usize> AsRef<str> for BoundedString<CAP> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const CAP: usize> PartialEq<str> for BoundedString<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const CAP: usize> PartialEq<&str> for BoundedString<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<const CAP: usize> fmt::Display for BoundedString<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check length and NUL bytes
pub fn validate_bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            len: value.len(),
            max,
        });
    }
    if value.contains('\0') {
        return Err(ValidationError::ContainsNul { field });
    }
    Ok(())
}

/// Validate a required long string (names, values, filenames, paths)
pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    validate_bounded(field, value, LongString::MAX_LEN)
}

/// Validate a required long string and wrap it
pub fn required_long(field: &'static str, value: impl Into<String>) -> Result<LongString, ValidationError> {
    let value = value.into();
    validate_required(field, &value)?;
    Ok(BoundedString(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_string_bounds() {
        assert_eq!(LongString::MAX_LEN, 254);
        assert!(LongString::new("name", "x".repeat(254)).is_ok());

        let err = LongString::new("name", "x".repeat(255)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "name",
                len: 255,
                max: 254
            }
        );
    }

    #[test]
    fn test_short_string_bounds() {
        assert_eq!(ShortString::MAX_LEN, 29);
        assert!(ShortString::new("date", "x".repeat(29)).is_ok());
        assert!(ShortString::new("date", "x".repeat(30)).is_err());
    }

    #[test]
    fn test_bound_counts_bytes_not_chars() {
        // 127 two-byte chars = 254 bytes
        assert!(LongString::new("name", "é".repeat(127)).is_ok());
        assert!(LongString::new("name", "é".repeat(128)).is_err());
    }

    #[test]
    fn test_nul_rejected() {
        let err = LongString::new("path", "a\0b").unwrap_err();
        assert_eq!(err, ValidationError::ContainsNul { field: "path" });
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "ok").is_ok());
        assert_eq!(
            validate_required("name", ""),
            Err(ValidationError::Empty { field: "name" })
        );
        assert!(required_long("name", "x".repeat(300)).is_err());
    }

    #[test]
    fn test_serde_rejects_oversized() {
        let json = serde_json::to_string(&"x".repeat(300)).unwrap();
        let parsed: Result<LongString, _> = serde_json::from_str(&json);
        assert!(parsed.is_err());

        let parsed: LongString = serde_json::from_str("\"fine\"").unwrap();
        assert_eq!(parsed, "fine");
    }
}
