use super::FilterCriterion;
use crate::document::Document;
use std::sync::Arc;

/// Matches documents satisfying at least one inner criterion.
///
/// An `AnyFilter` without criteria matches nothing.
#[derive(Debug, Clone, Default)]
pub struct AnyFilter {
    criteria: Vec<Arc<dyn FilterCriterion>>,
}

impl AnyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, criterion: impl FilterCriterion + 'static) -> Self {
        self.criteria.push(Arc::new(criterion));
        self
    }

    pub fn add_shared(&mut self, criterion: Arc<dyn FilterCriterion>) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl FilterCriterion for AnyFilter {
    fn matches(&self, document: &Document) -> bool {
        self.criteria.iter().any(|c| c.matches(document))
    }

    /// Accuracy of the best matching alternative
    fn accuracy(&self, document: &Document) -> u32 {
        self.criteria
            .iter()
            .filter(|c| c.matches(document))
            .map(|c| c.accuracy(document))
            .min()
            .unwrap_or(u32::MAX)
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.criteria.iter().map(|c| c.describe()).collect();
        format!("({})", parts.join(" OR "))
    }
}
