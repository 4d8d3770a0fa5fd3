//! Filter search engine - filter ranking plus substring matching

use async_trait::async_trait;

use crate::query::DocumentQuery;
use crate::traits::{accuracy_score, searchable_text, Result, SearchEngine, SearchHit};
use docman_core::Document;

/// Stateless search engine ranking documents by filter accuracy
pub struct FilterSearchEngine;

impl FilterSearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn matches_text(document: &Document, search_lower: &str) -> bool {
        searchable_text(document).to_lowercase().contains(search_lower)
    }
}

impl Default for FilterSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for FilterSearchEngine {
    async fn search_all(&self, query: &DocumentQuery, documents: &[Document]) -> Result<Vec<SearchHit>> {
        query.validate()?;
        let search_lower = query.search_text().map(str::to_lowercase);

        let hits: Vec<SearchHit> = query
            .filter
            .rank(documents)
            .into_iter()
            .filter(|r| match &search_lower {
                Some(text) => Self::matches_text(r.document, text),
                None => true,
            })
            .map(|r| SearchHit {
                document: r.document.clone(),
                score: accuracy_score(r.accuracy),
            })
            .collect();

        tracing::debug!("Filter search found {} documents", hits.len());
        Ok(hits)
    }
}
