//! Ordered, growable record arrays

use crate::document::Document;
use crate::property::PropertyValue;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// An ordered sequence of owned records.
///
/// `num_elements()` is always the number of stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordArray<T> {
    elements: Vec<T>,
}

/// Tags attached to a document
pub type TagArray = RecordArray<Tag>;

/// Property values attached to a document
pub type PropertyValueArray = RecordArray<PropertyValue>;

/// A list of documents, e.g. a query result
pub type DocumentArray = RecordArray<Document>;

impl<T> RecordArray<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    /// Remove and return the element at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }

    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        self.elements.retain(f);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T> Default for RecordArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RecordArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.elements
    }
}

impl<T> From<Vec<T>> for RecordArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> FromIterator<T> for RecordArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for RecordArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for RecordArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RecordArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
