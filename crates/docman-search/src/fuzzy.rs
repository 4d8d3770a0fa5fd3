//! Fuzzy search using nucleo

use async_trait::async_trait;
use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};

use crate::query::DocumentQuery;
use crate::traits::{accuracy_score, searchable_text, Result, SearchEngine, SearchHit};
use docman_core::{Document, FilterCriterion};

/// Scores strings against one fuzzy pattern
pub(crate) struct FuzzyScorer {
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
}

impl FuzzyScorer {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            pattern: Pattern::new(
                pattern,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    pub(crate) fn score(&mut self, text: &str) -> Option<u32> {
        self.pattern
            .score(Utf32Str::new(text, &mut self.buf), &mut self.matcher)
    }
}

/// Stateless fuzzy search engine using nucleo
pub struct FuzzySearchEngine;

impl FuzzySearchEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FuzzySearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for FuzzySearchEngine {
    /// Hits scoring below `fuzzy_threshold` times the best score are dropped
    async fn search_all(&self, query: &DocumentQuery, documents: &[Document]) -> Result<Vec<SearchHit>> {
        query.validate()?;

        let Some(search_text) = query.search_text() else {
            // No text query, just rank by the filter
            return Ok(query
                .filter
                .rank(documents)
                .into_iter()
                .map(|r| SearchHit {
                    document: r.document.clone(),
                    score: accuracy_score(r.accuracy),
                })
                .collect());
        };

        let mut scorer = FuzzyScorer::new(search_text);
        let mut scored: Vec<(&Document, u32)> = documents
            .iter()
            .filter(|d| query.filter.matches(d))
            .filter_map(|d| scorer.score(&searchable_text(d)).map(|score| (d, score)))
            .collect();

        // Sort by score descending, then path
        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.path().cmp(b.0.path())));

        let best = scored.first().map(|(_, s)| *s).unwrap_or(0).max(1) as f32;
        let threshold = query.effective_threshold();
        let hits: Vec<SearchHit> = scored
            .into_iter()
            .map(|(d, s)| SearchHit {
                document: d.clone(),
                score: s as f32 / best,
            })
            .filter(|h| h.score >= threshold)
            .collect();

        tracing::debug!("Fuzzy search for {:?} found {} documents", search_text, hits.len());
        Ok(hits)
    }
}
