//! Directory trees of documents

use crate::document::Document;
use serde::{Deserialize, Serialize};

/// A directory holding documents and sub-directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Path relative to the scanned root (`""` for the root itself)
    pub path: String,

    /// Directory name
    pub name: String,

    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub directories: Vec<Directory>,
}

impl Directory {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            documents: Vec::new(),
            directories: Vec::new(),
        }
    }

    /// Every document in this directory and below.
    ///
    /// Walks the tree with an explicit stack so deep trees cannot overflow.
    pub fn all_documents(&self) -> Vec<&Document> {
        let mut result: Vec<&Document> = self.documents.iter().collect();
        let mut to_scan: Vec<&Directory> = self.directories.iter().collect();

        while let Some(current) = to_scan.pop() {
            result.extend(current.documents.iter());
            to_scan.extend(current.directories.iter());
        }

        result
    }

    /// This directory and every directory below it
    pub fn all_directories(&self) -> Vec<&Directory> {
        let mut result = vec![self];
        let mut to_scan: Vec<&Directory> = self.directories.iter().collect();

        while let Some(current) = to_scan.pop() {
            result.push(current);
            to_scan.extend(current.directories.iter());
        }

        result
    }

    /// Copy of this directory without its children, used when directories are
    /// stored by path
    pub fn shallow(&self) -> Self {
        Self::new(self.path.clone(), self.name.clone())
    }
}
