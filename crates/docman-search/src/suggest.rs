//! Name suggestions for tags, properties and property values

use crate::error::SearchResult;
use docman_core::{Catalog, CatalogSettings};

/// Suggests known names for partial input.
///
/// Names starting with the input (ignoring ASCII case) come first, in order.
/// With the `fuzzy` feature, fuzzy matches fill the remaining slots, best
/// first.
pub struct SuggestionEngine {
    limit: usize,
}

impl SuggestionEngine {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        Self::new(settings.suggestion_limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn tags(&self, catalog: &Catalog, input: &str) -> Vec<String> {
        self.suggest(catalog.tags().map(|t| t.name()), input)
    }

    pub fn properties(&self, catalog: &Catalog, input: &str) -> Vec<String> {
        self.suggest(catalog.properties().map(|p| p.name()), input)
    }

    /// Suggest values recorded for one property
    pub fn property_values(&self, catalog: &Catalog, property: &str, input: &str) -> SearchResult<Vec<String>> {
        let values = catalog.property_values(property)?;
        Ok(self.suggest(values.into_iter(), input))
    }

    /// Rank candidate names against the input
    pub fn suggest<'a>(&self, candidates: impl Iterator<Item = &'a str>, input: &str) -> Vec<String> {
        let input_lower = input.to_ascii_lowercase();
        let (mut prefixed, rest): (Vec<&str>, Vec<&str>) =
            candidates.partition(|c| c.to_ascii_lowercase().starts_with(&input_lower));
        prefixed.sort_unstable();
        prefixed.dedup();

        let mut suggestions: Vec<String> = prefixed
            .into_iter()
            .take(self.limit)
            .map(str::to_string)
            .collect();

        self.fill_fuzzy(&mut suggestions, rest, input);

        tracing::debug!("{} suggestions for {:?}", suggestions.len(), input);
        suggestions
    }

    #[cfg(feature = "fuzzy")]
    fn fill_fuzzy(&self, suggestions: &mut Vec<String>, rest: Vec<&str>, input: &str) {
        if suggestions.len() >= self.limit || input.is_empty() {
            return;
        }

        let mut scorer = crate::fuzzy::FuzzyScorer::new(input);
        let mut scored: Vec<(u32, &str)> = rest
            .into_iter()
            .filter_map(|c| scorer.score(c).map(|s| (s, c)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.dedup_by(|a, b| a.1 == b.1);

        let room = self.limit - suggestions.len();
        suggestions.extend(scored.into_iter().take(room).map(|(_, c)| c.to_string()));
    }

    #[cfg(not(feature = "fuzzy"))]
    fn fill_fuzzy(&self, _suggestions: &mut Vec<String>, _rest: Vec<&str>, _input: &str) {}
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::from_settings(&CatalogSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for tag in ["Tax", "tax2020", "travel", "receipts", "contracts"] {
            catalog.create_tag(tag).unwrap();
        }
        catalog.create_property_value("author", "Jane").unwrap();
        catalog.create_property_value("author", "Jack").unwrap();
        catalog.create_property_value("author", "Bob").unwrap();
        catalog
    }

    #[test]
    fn test_prefix_suggestions_first() {
        let engine = SuggestionEngine::new(10);
        let suggestions = engine.tags(&catalog(), "ta");
        assert_eq!(&suggestions[..2], &["Tax".to_string(), "tax2020".to_string()]);
    }

    #[test]
    fn test_limit() {
        let engine = SuggestionEngine::new(1);
        assert_eq!(engine.tags(&catalog(), "t").len(), 1);
        assert!(SuggestionEngine::new(0).tags(&catalog(), "t").is_empty());
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn test_fuzzy_fills_remaining_slots() {
        let engine = SuggestionEngine::new(10);
        let suggestions = engine.tags(&catalog(), "rcpt");
        assert_eq!(suggestions, vec!["receipts".to_string()]);
    }

    #[test]
    fn test_property_values() {
        let engine = SuggestionEngine::default();
        let values = engine.property_values(&catalog(), "author", "ja").unwrap();
        assert_eq!(&values[..2], &["Jack".to_string(), "Jane".to_string()]);

        assert!(matches!(
            engine.property_values(&catalog(), "missing", "x"),
            Err(SearchError::Core(docman_core::Error::PropertyNotFound(_)))
        ));
    }

    #[test]
    fn test_properties() {
        let engine = SuggestionEngine::default();
        assert_eq!(engine.properties(&catalog(), "AUTH"), vec!["author".to_string()]);
    }
}
