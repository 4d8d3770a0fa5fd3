//! Mode dispatch - picks the engine named by the query's search mode

use async_trait::async_trait;

use crate::exact::FilterSearchEngine;
#[cfg(feature = "fuzzy")]
use crate::fuzzy::FuzzySearchEngine;
use crate::query::{DocumentQuery, SearchMode};
use crate::traits::{Result, SearchEngine, SearchHit};
use docman_core::Document;

/// Search engine routing each query by its [`SearchMode`]
pub struct ModeSearchEngine {
    filter: FilterSearchEngine,
    #[cfg(feature = "fuzzy")]
    fuzzy: FuzzySearchEngine,
}

impl ModeSearchEngine {
    pub fn new() -> Self {
        Self {
            filter: FilterSearchEngine::new(),
            #[cfg(feature = "fuzzy")]
            fuzzy: FuzzySearchEngine::new(),
        }
    }
}

impl Default for ModeSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for ModeSearchEngine {
    async fn search_all(&self, query: &DocumentQuery, documents: &[Document]) -> Result<Vec<SearchHit>> {
        match query.mode {
            SearchMode::Filter => self.filter.search_all(query, documents).await,
            #[cfg(feature = "fuzzy")]
            SearchMode::Fuzzy => self.fuzzy.search_all(query, documents).await,
            #[cfg(not(feature = "fuzzy"))]
            SearchMode::Fuzzy => {
                tracing::warn!("Fuzzy search not enabled, falling back to filter search");
                self.filter.search_all(query, documents).await
            }
        }
    }
}
