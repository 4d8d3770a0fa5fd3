use super::FilterCriterion;
use crate::document::Document;

/// Matches documents located directly in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFilter {
    path: String,
}

impl DirectoryFilter {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FilterCriterion for DirectoryFilter {
    fn matches(&self, document: &Document) -> bool {
        document.parent_path() == self.path
    }

    fn accuracy(&self, _document: &Document) -> u32 {
        0
    }

    fn describe(&self) -> String {
        format!("directory {}", self.path)
    }
}
