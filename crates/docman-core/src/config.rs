//! Catalog settings

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a [`Catalog`](crate::catalog::Catalog) and the search engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Maximum number of documents returned by a filtered query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum number of name suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Default fuzzy search threshold
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            suggestion_limit: default_suggestion_limit(),
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

impl CatalogSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded catalog settings from {:?}", path.as_ref());
        Ok(settings)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}

fn default_max_results() -> usize {
    100
}

fn default_suggestion_limit() -> usize {
    25
}

fn default_fuzzy_threshold() -> f32 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = CatalogSettings::default();
        assert_eq!(settings.max_results, 100);
        assert_eq!(settings.suggestion_limit, 25);
        assert!((settings.fuzzy_threshold - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = CatalogSettings::from_toml_str("max_results = 10").unwrap();
        assert_eq!(settings.max_results, 10);
        assert_eq!(settings.suggestion_limit, 25);

        let empty = CatalogSettings::from_toml_str("").unwrap();
        assert_eq!(empty, CatalogSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            CatalogSettings::from_toml_str("max_results = \"many\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "suggestion_limit = 5").unwrap();
        writeln!(file, "fuzzy_threshold = 0.5").unwrap();

        let settings = CatalogSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.suggestion_limit, 5);
        assert_eq!(settings.max_results, 100);

        assert!(matches!(
            CatalogSettings::from_file("/nonexistent/docman.toml"),
            Err(Error::Io(_))
        ));
    }
}
