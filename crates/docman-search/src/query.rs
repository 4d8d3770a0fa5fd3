//! Query types for searching documents

use crate::error::{SearchError, SearchResult};
use docman_core::{CatalogSettings, DocumentFilter, FilterCriterion, LONG_STRING_LEN};
use serde::{Deserialize, Serialize};

/// Search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Filter ranking with case-insensitive substring text matching
    #[default]
    Filter,
    /// Fuzzy text matching (nucleo)
    Fuzzy,
}

const MAX_PAGE_SIZE: usize = 1000;

/// Pagination options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPagination")]
pub struct Pagination {
    /// Page number (0-indexed)
    pub page: usize,

    /// Number of results per page, 1 to 1000
    pub page_size: usize,
}

#[derive(Deserialize)]
struct RawPagination {
    #[serde(default)]
    page: usize,
    #[serde(default = "default_page_size")]
    page_size: usize,
}

impl From<RawPagination> for Pagination {
    fn from(raw: RawPagination) -> Self {
        Pagination::new(raw.page, raw.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    100
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Page size actually used, for fields set directly
    pub fn limit(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.limit())
    }

    /// Keep only the items on this page
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect()
    }
}

/// Document search query builder
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    /// Text to search for
    pub text: Option<String>,

    /// Search mode
    pub mode: SearchMode,

    /// Criteria every result must satisfy
    pub filter: DocumentFilter,

    /// Fuzzy search threshold (0.0-1.0, lower = more results)
    pub fuzzy_threshold: f32,

    /// Pagination
    pub pagination: Pagination,
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self {
            text: None,
            mode: SearchMode::default(),
            filter: DocumentFilter::new(),
            fuzzy_threshold: CatalogSettings::default().fuzzy_threshold,
            pagination: Pagination::default(),
        }
    }
}

impl DocumentQuery {
    /// Create a new query with text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a query without text (filter-only search)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Take defaults from catalog settings
    pub fn with_settings(self, settings: &CatalogSettings) -> Self {
        self.with_fuzzy_threshold(settings.fuzzy_threshold)
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filter(mut self, filter: DocumentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add a single criterion to the filter
    pub fn with_criterion(mut self, criterion: impl FilterCriterion + 'static) -> Self {
        self.filter.add(criterion);
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f32) -> Self {
        self.fuzzy_threshold = sanitize_threshold(threshold);
        self
    }

    pub fn with_pagination(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }

    /// Threshold in 0.0-1.0 as the fuzzy engine applies it; NaN counts as 0.0
    pub fn effective_threshold(&self) -> f32 {
        sanitize_threshold(self.fuzzy_threshold)
    }

    /// Non-empty search text, if any
    pub fn search_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Check the query before running it
    pub fn validate(&self) -> SearchResult<()> {
        if let Some(text) = &self.text {
            if text.len() >= LONG_STRING_LEN {
                return Err(SearchError::Query(format!(
                    "search text is {} bytes, limit is {}",
                    text.len(),
                    LONG_STRING_LEN - 1
                )));
            }
        }
        Ok(())
    }
}

fn sanitize_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        0.0
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Paginated search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResults<T> {
    /// The data for this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationInfo,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    pub fn new(current_page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            current_page,
            page_size,
            total_count,
            total_pages,
            has_next_page: current_page.saturating_add(1) < total_pages,
            has_previous_page: current_page > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docman_core::TagFilter;

    #[test]
    fn test_document_query_builder() {
        let query = DocumentQuery::new("invoice")
            .with_mode(SearchMode::Fuzzy)
            .with_fuzzy_threshold(1.5)
            .with_criterion(TagFilter::new(["tax"]).unwrap())
            .with_pagination(1, 20);

        assert_eq!(query.search_text(), Some("invoice"));
        assert_eq!(query.mode, SearchMode::Fuzzy);
        assert_eq!(query.fuzzy_threshold, 1.0);
        assert_eq!(query.filter.len(), 1);
        assert_eq!(query.pagination.offset(), 20);
    }

    #[test]
    fn test_empty_text_is_no_text() {
        assert_eq!(DocumentQuery::new("").search_text(), None);
        assert_eq!(DocumentQuery::empty().search_text(), None);
    }

    #[test]
    fn test_validate_text_length() {
        assert!(DocumentQuery::new("a".repeat(254)).validate().is_ok());
        assert!(matches!(
            DocumentQuery::new("a".repeat(255)).validate(),
            Err(SearchError::Query(_))
        ));
    }

    #[test]
    fn test_pagination() {
        let pagination = Pagination::new(2, 50);
        assert_eq!(pagination.offset(), 100);
        assert_eq!(Pagination::new(0, 5000).page_size, 1000);
        assert_eq!(Pagination::new(0, 0).page_size, 1);

        let page = Pagination::new(1, 3).apply((0..10).collect());
        assert_eq!(page, vec![3, 4, 5]);
    }

    #[test]
    fn test_pagination_info() {
        let info = PaginationInfo::new(1, 10, 35);
        assert_eq!(info.total_pages, 4);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);

        let empty = PaginationInfo::new(0, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
    }

    #[test]
    fn test_pagination_info_last_possible_page() {
        let info = PaginationInfo::new(usize::MAX, 10, 5);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
        assert_eq!(Pagination::new(usize::MAX, 10).apply(vec![1, 2, 3]), Vec::<i32>::new());
    }

    #[test]
    fn test_deserialized_pagination_is_capped() {
        let zero: Pagination = serde_json::from_str(r#"{"page":0,"page_size":0}"#).unwrap();
        assert_eq!(zero.page_size, 1);
        assert_eq!(zero.apply(vec![1, 2, 3]), vec![1]);

        let huge: Pagination = serde_json::from_str(r#"{"page_size":5000}"#).unwrap();
        assert_eq!(huge, Pagination::new(0, 1000));

        let defaults: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, Pagination::default());
    }

    #[test]
    fn test_fields_set_directly_are_capped() {
        let pagination = Pagination { page: 1, page_size: 0 };
        assert_eq!(pagination.limit(), 1);
        assert_eq!(pagination.apply(vec![1, 2, 3]), vec![2]);
    }

    #[test]
    fn test_nan_threshold_counts_as_zero() {
        let query = DocumentQuery::new("x").with_fuzzy_threshold(f32::NAN);
        assert_eq!(query.fuzzy_threshold, 0.0);

        let mut query = DocumentQuery::new("x");
        query.fuzzy_threshold = f32::NAN;
        assert_eq!(query.effective_threshold(), 0.0);
    }

    #[test]
    fn test_threshold_from_settings() {
        let settings = CatalogSettings::from_toml_str("fuzzy_threshold = 0.75").unwrap();
        let query = DocumentQuery::new("x").with_settings(&settings);
        assert_eq!(query.fuzzy_threshold, 0.75);
        assert_eq!(DocumentQuery::empty().fuzzy_threshold, CatalogSettings::default().fuzzy_threshold);
    }
}
