//! Search engine traits

use async_trait::async_trait;
use docman_core::Document;
use serde::{Deserialize, Serialize};

use crate::query::{DocumentQuery, PaginatedResults, PaginationInfo};
pub use crate::error::{SearchError, SearchResult as Result};

/// Result from search including score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: Document,
    /// Higher is better
    pub score: f32,
}

/// Trait for search engines
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Every hit for the query, best first
    async fn search_all(&self, query: &DocumentQuery, documents: &[Document]) -> Result<Vec<SearchHit>>;

    /// The page of hits selected by the query's pagination
    async fn search(&self, query: &DocumentQuery, documents: &[Document]) -> Result<Vec<SearchHit>> {
        let hits = self.search_all(query, documents).await?;
        Ok(query.pagination.apply(hits))
    }

    /// Like [`SearchEngine::search`], with pagination metadata
    async fn search_paginated(
        &self,
        query: &DocumentQuery,
        documents: &[Document],
    ) -> Result<PaginatedResults<SearchHit>> {
        let hits = self.search_all(query, documents).await?;
        let pagination = PaginationInfo::new(query.pagination.page, query.pagination.limit(), hits.len());
        Ok(PaginatedResults {
            data: query.pagination.apply(hits),
            pagination,
        })
    }
}

/// Map a filter accuracy (0 = exact) to a score in (0, 1]
pub fn accuracy_score(accuracy: u32) -> f32 {
    1.0 / (1.0 + accuracy as f32)
}

/// Text searched for a document: filename, path, tags and property values
pub fn searchable_text(document: &Document) -> String {
    let mut parts = vec![document.filename(), document.path()];
    parts.extend(document.tags().iter().map(|t| t.name()));
    parts.extend(document.properties().iter().map(|pv| pv.value()));
    parts.join(" ")
}
