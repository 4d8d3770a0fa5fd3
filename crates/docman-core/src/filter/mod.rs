//! Document filters
//!
//! A filter is built from criteria. Each criterion decides whether a document
//! matches and, for matching documents, how precisely it matches: an accuracy
//! of 0 is an exact match and larger values are looser matches. A
//! [`DocumentFilter`] requires all of its criteria to match and ranks results
//! by the sum of their accuracies.

mod any;
mod date;
mod directory;
mod filename;
mod property;
mod tag;

pub use any::AnyFilter;
pub use date::{DateFilter, DateSpan};
pub use directory::DirectoryFilter;
pub use filename::FilenameFilter;
pub use property::PropertyFilter;
pub use tag::TagFilter;

use crate::document::Document;
use std::fmt::Debug;
use std::sync::Arc;

/// A single filter condition over documents
pub trait FilterCriterion: Send + Sync + Debug {
    /// Whether the document satisfies this criterion
    fn matches(&self, document: &Document) -> bool;

    /// Distance between the criterion and a matching document (0 = exact)
    fn accuracy(&self, document: &Document) -> u32;

    /// Short human-readable form, used in logs
    fn describe(&self) -> String;
}

/// A document together with its combined filter accuracy
#[derive(Debug, Clone, Copy)]
pub struct RankedDocument<'a> {
    pub document: &'a Document,
    pub accuracy: u32,
}

/// Conjunction of filter criteria
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    criteria: Vec<Arc<dyn FilterCriterion>>,
}

impl DocumentFilter {
    /// Create an empty filter, which matches every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion (builder style)
    pub fn with(mut self, criterion: impl FilterCriterion + 'static) -> Self {
        self.add(criterion);
        self
    }

    /// Add a criterion
    pub fn add(&mut self, criterion: impl FilterCriterion + 'static) -> &mut Self {
        self.criteria.push(Arc::new(criterion));
        self
    }

    /// Add an already shared criterion
    pub fn add_shared(&mut self, criterion: Arc<dyn FilterCriterion>) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[Arc<dyn FilterCriterion>] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Rank matching documents, most accurate first; ties ordered by path
    pub fn rank<'a>(&self, documents: impl IntoIterator<Item = &'a Document>) -> Vec<RankedDocument<'a>> {
        let mut ranked: Vec<RankedDocument<'a>> = documents
            .into_iter()
            .filter(|d| self.matches(d))
            .map(|document| RankedDocument {
                document,
                accuracy: self.accuracy(document),
            })
            .collect();

        ranked.sort_by(|a, b| {
            a.accuracy
                .cmp(&b.accuracy)
                .then_with(|| a.document.path().cmp(b.document.path()))
        });

        tracing::debug!("Filter [{}] matched {} documents", self.describe(), ranked.len());
        ranked
    }
}

impl FilterCriterion for DocumentFilter {
    fn matches(&self, document: &Document) -> bool {
        self.criteria.iter().all(|c| c.matches(document))
    }

    fn accuracy(&self, document: &Document) -> u32 {
        self.criteria
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.accuracy(document)))
    }

    fn describe(&self) -> String {
        self.criteria
            .iter()
            .map(|c| c.describe())
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
