//! In-memory document catalog
//!
//! The catalog keeps registries of tags and properties, every known document
//! keyed by its path and the directories documents were imported from. It does
//! no locking; wrap it in a lock to share it between threads.

use crate::array::DocumentArray;
use crate::config::CatalogSettings;
use crate::directory::Directory;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::filter::{DocumentFilter, FilterCriterion};
use crate::property::{Property, PropertyValue};
use crate::tag::Tag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

#[derive(Debug, Clone)]
struct PropertyEntry {
    property: Property,
    values: BTreeSet<String>,
}

/// In-memory database of documents, tags and properties
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tags: BTreeMap<String, Tag>,
    properties: BTreeMap<String, PropertyEntry>,
    documents: BTreeMap<String, Document>,
    directories: BTreeMap<String, Directory>,
    source_path: Option<String>,
    settings: CatalogSettings,
}

/// A property together with every value recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub property: Property,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Serializable copy of a catalog's contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub properties: Vec<PropertySnapshot>,

    #[serde(default)]
    pub documents: Vec<Document>,

    /// Directories without their children
    #[serde(default)]
    pub directories: Vec<Directory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CatalogSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    // Tags

    /// Register a new tag
    pub fn create_tag(&mut self, name: impl Into<String>) -> Result<Tag> {
        let tag = Tag::new(name)?;
        if self.tags.contains_key(tag.name()) {
            return Err(Error::TagExists(tag.name().to_string()));
        }
        tracing::debug!("Created tag {}", tag);
        self.tags.insert(tag.name().to_string(), tag.clone());
        Ok(tag)
    }

    pub fn tag_exists(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn get_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// All tags, ordered by name
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Tags whose name starts with `prefix`, capped at the suggestion limit
    pub fn tags_like(&self, prefix: &str) -> Vec<&Tag> {
        with_prefix(&self.tags, prefix, self.settings.suggestion_limit)
    }

    fn register_tag(&mut self, tag: &Tag) {
        if !self.tags.contains_key(tag.name()) {
            tracing::debug!("Registered tag {}", tag);
            self.tags.insert(tag.name().to_string(), tag.clone());
        }
    }

    // Properties

    /// Register a new property
    pub fn create_property(&mut self, name: impl Into<String>) -> Result<Property> {
        let property = Property::new(name)?;
        if self.properties.contains_key(property.name()) {
            return Err(Error::PropertyExists(property.name().to_string()));
        }
        tracing::debug!("Created property {}", property);
        self.properties.insert(
            property.name().to_string(),
            PropertyEntry {
                property: property.clone(),
                values: BTreeSet::new(),
            },
        );
        Ok(property)
    }

    pub fn property_exists(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name).map(|e| &e.property)
    }

    /// All properties, ordered by name
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values().map(|e| &e.property)
    }

    pub fn properties_like(&self, prefix: &str) -> Vec<&Property> {
        with_prefix(&self.properties, prefix, self.settings.suggestion_limit)
            .into_iter()
            .map(|e| &e.property)
            .collect()
    }

    /// Recorded values of any property starting with `prefix`, ordered by value
    pub fn property_values_like(&self, prefix: &str) -> Vec<PropertyValue> {
        let mut matches: Vec<(&str, &Property)> = self
            .properties
            .values()
            .flat_map(|e| {
                e.values
                    .iter()
                    .filter(|v| v.starts_with(prefix))
                    .map(move |v| (v.as_str(), &e.property))
            })
            .collect();
        matches.sort();

        matches
            .into_iter()
            .take(self.settings.suggestion_limit)
            .filter_map(|(value, property)| PropertyValue::with_property(property.clone(), value).ok())
            .collect()
    }

    /// Recorded values of a property, ordered
    pub fn property_values(&self, name: &str) -> Result<Vec<&str>> {
        self.properties
            .get(name)
            .map(|e| e.values.iter().map(String::as_str).collect())
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Bind a value to a property, registering either when missing
    pub fn create_property_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<PropertyValue> {
        let pv = PropertyValue::new(name, value)?;
        self.register_property_value(&pv);
        Ok(pv)
    }

    fn register_property_value(&mut self, pv: &PropertyValue) {
        let entry = self
            .properties
            .entry(pv.name().to_string())
            .or_insert_with(|| PropertyEntry {
                property: pv.property().clone(),
                values: BTreeSet::new(),
            });
        if entry.values.insert(pv.value().to_string()) {
            tracing::debug!("Registered property value {}", pv);
        }
    }

    // Documents

    /// Create and insert a document, registering its tags and properties
    pub fn create_document<P, K, V, T, S>(
        &mut self,
        filename: impl Into<String>,
        path: impl Into<String>,
        properties: P,
        date: Option<NaiveDate>,
        tag_names: T,
    ) -> Result<&Document>
    where
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Document::new(filename, path)?;
        for (name, value) in properties {
            document.add_property(PropertyValue::new(name, value)?);
        }
        for name in tag_names {
            document.add_tag(Tag::new(name)?);
        }
        document.set_date(date);

        if self.documents.contains_key(document.path()) {
            return Err(Error::DocumentExists(document.path().to_string()));
        }
        Ok(self.insert_new(document))
    }

    /// Insert documents whose path is not yet known, returning how many were
    /// inserted
    pub fn insert_documents(&mut self, documents: impl IntoIterator<Item = Document>) -> usize {
        let mut inserted = 0;
        for document in documents {
            if self.documents.contains_key(document.path()) {
                tracing::warn!("Skipping duplicate document {}", document.path());
                continue;
            }
            self.insert_new(document);
            inserted += 1;
        }
        inserted
    }

    fn insert_new(&mut self, document: Document) -> &Document {
        for tag in document.tags() {
            self.register_tag(tag);
        }
        for pv in document.properties() {
            self.register_property_value(pv);
        }
        tracing::debug!("Inserted document {}", document);
        self.documents
            .entry(document.path().to_string())
            .or_insert(document)
    }

    pub fn get_document(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn remove_document(&mut self, path: &str) -> Result<Document> {
        self.documents
            .remove(path)
            .ok_or_else(|| Error::DocumentNotFound(path.to_string()))
    }

    /// All documents, ordered by path
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // Directories

    /// Import a scanned directory tree, returning how many documents were new
    pub fn insert_directory(&mut self, directory: &Directory, source_path: impl Into<String>) -> usize {
        let source_path = source_path.into();

        for dir in directory.all_directories() {
            self.directories
                .entry(dir.path.clone())
                .or_insert_with(|| dir.shallow());
        }
        let inserted = self.insert_documents(directory.all_documents().into_iter().cloned());

        tracing::info!(
            "Imported {} new documents from {} ({} directories known)",
            inserted,
            source_path,
            self.directories.len()
        );
        self.source_path = Some(source_path);
        inserted
    }

    pub fn get_directory(&self, path: &str) -> Option<&Directory> {
        self.directories.get(path)
    }

    /// Path the catalog's directories were imported from
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // Queries

    /// Documents matching the filter, most accurate first, capped at
    /// `max_results`
    pub fn documents_by(&self, filter: &DocumentFilter) -> DocumentArray {
        self.documents_by_page(filter, 0)
    }

    /// One page of [`Catalog::documents_by`]; pages hold `max_results`
    /// documents and are 0-indexed. Pages past the end are empty.
    pub fn documents_by_page(&self, filter: &DocumentFilter, page: usize) -> DocumentArray {
        let page_size = self.settings.max_results;
        filter
            .rank(self.documents.values())
            .into_iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .map(|r| r.document.clone())
            .collect()
    }

    /// Number of matching documents, without the result cap
    pub fn count_by(&self, filter: &DocumentFilter) -> usize {
        self.documents.values().filter(|d| filter.matches(d)).count()
    }

    // Snapshots

    pub fn export(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            tags: self.tags.values().cloned().collect(),
            properties: self
                .properties
                .values()
                .map(|e| PropertySnapshot {
                    property: e.property.clone(),
                    values: e.values.iter().cloned().collect(),
                })
                .collect(),
            documents: self.documents.values().cloned().collect(),
            directories: self.directories.values().cloned().collect(),
            source_path: self.source_path.clone(),
        }
    }

    /// Rebuild a catalog from a snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot, settings: CatalogSettings) -> Self {
        let mut catalog = Self::with_settings(settings);
        for tag in &snapshot.tags {
            catalog.register_tag(tag);
        }
        for entry in snapshot.properties {
            catalog
                .properties
                .entry(entry.property.name().to_string())
                .or_insert_with(|| PropertyEntry {
                    property: entry.property.clone(),
                    values: BTreeSet::new(),
                });
            for value in entry.values {
                match PropertyValue::with_property(entry.property.clone(), value) {
                    Ok(pv) => catalog.register_property_value(&pv),
                    Err(e) => tracing::warn!("Skipping value of {}: {}", entry.property, e),
                }
            }
        }
        for dir in snapshot.directories {
            catalog.directories.entry(dir.path.clone()).or_insert(dir);
        }
        let documents = catalog.insert_documents(snapshot.documents);
        catalog.source_path = snapshot.source_path;

        tracing::info!(
            "Restored catalog: {} documents, {} tags, {} properties",
            documents,
            catalog.tags.len(),
            catalog.properties.len()
        );
        catalog
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    pub fn from_json(json: &str, settings: CatalogSettings) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot, settings))
    }
}

fn with_prefix<'a, V>(map: &'a BTreeMap<String, V>, prefix: &str, limit: usize) -> Vec<&'a V> {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(|(k, _)| k.starts_with(prefix))
        .take(limit)
        .map(|(_, v)| v)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DateFilter, PropertyFilter, TagFilter};

    fn no_props() -> Vec<(String, String)> {
        Vec::new()
    }

    fn date(s: &str) -> Option<NaiveDate> {
        Some(crate::document::parse_date(s).unwrap())
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .create_document(
                "n1.pdf",
                "C/n1.pdf",
                [("author", "jane"), ("year", "2021")],
                date("2021-02-03"),
                ["abc", "def"],
            )
            .unwrap();
        catalog
            .create_document("n2.pdf", "C/n2.pdf", [("author", "john")], date("2021-02-10"), ["abc"])
            .unwrap();
        catalog
            .create_document("n3.txt", "D/n3.txt", no_props(), None, ["def"])
            .unwrap();
        catalog
    }

    #[test]
    fn test_create_document_registers_tags_and_properties() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.tag_exists("abc"));
        assert!(catalog.tag_exists("def"));
        assert!(catalog.property_exists("author"));
        assert_eq!(catalog.property_values("author").unwrap(), vec!["jane", "john"]);
        assert!(matches!(
            catalog.property_values("missing"),
            Err(Error::PropertyNotFound(_))
        ));

        let doc = catalog.get_document("C/n1.pdf").unwrap();
        assert!(doc.has_tag("abc"));
        assert!(doc.has_property("year", "2021"));
        assert_eq!(doc.date_string().as_deref(), Some("2021-02-03"));
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let mut catalog = sample();
        let result = catalog.create_document("n1.pdf", "C/n1.pdf", no_props(), None, ["zzz"]);
        assert!(matches!(result, Err(Error::DocumentExists(_))));
        assert!(!catalog.tag_exists("zzz"));
    }

    #[test]
    fn test_invalid_document_registers_nothing() {
        let mut catalog = Catalog::new();
        let result = catalog.create_document("a", "a", [("p", "v")], None, ["ok", ""]);
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(!catalog.tag_exists("ok"));
        assert!(!catalog.property_exists("p"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_create_tag_and_property() {
        let mut catalog = Catalog::new();
        catalog.create_tag("invoice").unwrap();
        assert!(matches!(catalog.create_tag("invoice"), Err(Error::TagExists(_))));
        assert_eq!(catalog.get_tag("invoice").unwrap().name(), "invoice");

        catalog.create_property("author").unwrap();
        assert!(matches!(
            catalog.create_property("author"),
            Err(Error::PropertyExists(_))
        ));
        assert!(catalog.property_values("author").unwrap().is_empty());

        let pv = catalog.create_property_value("author", "jane").unwrap();
        assert_eq!(pv.to_string(), "author=jane");
        catalog.create_property_value("author", "jane").unwrap();
        assert_eq!(catalog.property_values("author").unwrap(), vec!["jane"]);

        catalog.create_property_value("pages", "12").unwrap();
        assert!(catalog.get_property("pages").is_some());
    }

    #[test]
    fn test_like_queries() {
        let mut catalog = Catalog::with_settings(CatalogSettings::default().with_suggestion_limit(2));
        for name in ["tax", "tax2020", "tax2021", "taxi", "travel"] {
            catalog.create_tag(name).unwrap();
        }
        let names: Vec<&str> = catalog.tags_like("tax").iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["tax", "tax2020"]);
        assert!(catalog.tags_like("zz").is_empty());

        catalog.create_property_value("author", "jane").unwrap();
        catalog.create_property_value("editor", "jack").unwrap();
        catalog.create_property_value("editor", "bob").unwrap();
        let values: Vec<String> = catalog
            .property_values_like("ja")
            .iter()
            .map(|pv| pv.to_string())
            .collect();
        assert_eq!(values, vec!["editor=jack", "author=jane"]);

        let props: Vec<&str> = catalog.properties_like("ed").iter().map(|p| p.name()).collect();
        assert_eq!(props, vec!["editor"]);
    }

    #[test]
    fn test_documents_by_filter() {
        let catalog = sample();
        let filter = DocumentFilter::new()
            .with(TagFilter::new(["abc"]).unwrap())
            .with(DateFilter::month(2021, 2).unwrap());
        let docs = catalog.documents_by(&filter);
        let paths: Vec<&str> = docs.iter().map(|d| d.path()).collect();
        // n2 has fewer extra tags than n1
        assert_eq!(paths, vec!["C/n2.pdf", "C/n1.pdf"]);

        let filter = DocumentFilter::new().with(PropertyFilter::new([("author", "john")]).unwrap());
        assert_eq!(catalog.count_by(&filter), 1);
    }

    #[test]
    fn test_results_truncated() {
        let mut catalog = Catalog::with_settings(CatalogSettings::default().with_max_results(5));
        let docs = (0..20).map(|i| Document::new(format!("f{:02}", i), format!("d/f{:02}", i)).unwrap());
        assert_eq!(catalog.insert_documents(docs), 20);

        let filter = DocumentFilter::new();
        assert_eq!(catalog.documents_by(&filter).num_elements(), 5);
        assert_eq!(catalog.count_by(&filter), 20);
    }

    #[test]
    fn test_documents_by_page() {
        let mut catalog = Catalog::with_settings(CatalogSettings::default().with_max_results(5));
        let docs = (0..12).map(|i| Document::new(format!("f{:02}", i), format!("d/f{:02}", i)).unwrap());
        catalog.insert_documents(docs);

        let filter = DocumentFilter::new();
        let pages: Vec<DocumentArray> = (0..3).map(|p| catalog.documents_by_page(&filter, p)).collect();
        let sizes: Vec<usize> = pages.iter().map(|p| p.num_elements()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
        assert_eq!(pages[0], catalog.documents_by(&filter));

        let paths: Vec<&str> = pages.iter().flat_map(|p| p.as_slice()).map(|d| d.path()).collect();
        let expected: Vec<String> = (0..12).map(|i| format!("d/f{:02}", i)).collect();
        assert_eq!(paths, expected);

        assert_eq!(catalog.documents_by_page(&filter, 3).num_elements(), 0);
        assert_eq!(catalog.documents_by_page(&filter, usize::MAX).num_elements(), 0);
    }

    #[test]
    fn test_insert_documents_skips_known_paths() {
        let mut catalog = sample();
        let docs = vec![
            Document::new("n1.pdf", "C/n1.pdf").unwrap(),
            Document::new("n4.pdf", "C/n4.pdf")
                .unwrap()
                .with_tag(Tag::new("new").unwrap()),
        ];
        assert_eq!(catalog.insert_documents(docs), 1);
        assert_eq!(catalog.len(), 4);
        assert!(catalog.tag_exists("new"));
        // the original document is untouched
        assert!(catalog.get_document("C/n1.pdf").unwrap().has_tag("abc"));
    }

    #[test]
    fn test_remove_document() {
        let mut catalog = sample();
        let removed = catalog.remove_document("D/n3.txt").unwrap();
        assert_eq!(removed.filename(), "n3.txt");
        assert!(catalog.get_document("D/n3.txt").is_none());
        assert!(matches!(
            catalog.remove_document("D/n3.txt"),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_insert_directory() {
        let mut root = Directory::new("", "root");
        root.documents.push(Document::new("a.txt", "a.txt").unwrap());
        let mut sub = Directory::new("sub", "sub");
        sub.documents.push(Document::new("b.txt", "sub/b.txt").unwrap());
        root.directories.push(sub);

        let mut catalog = Catalog::new();
        assert_eq!(catalog.insert_directory(&root, "/data/root"), 2);
        assert_eq!(catalog.source_path(), Some("/data/root"));
        assert_eq!(catalog.get_directory("sub").unwrap().name, "sub");
        assert!(catalog.get_directory("sub").unwrap().documents.is_empty());
        assert!(catalog.get_document("sub/b.txt").is_some());

        // importing again adds nothing
        assert_eq!(catalog.insert_directory(&root, "/data/root"), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut catalog = sample();
        catalog.create_tag("unused").unwrap();
        catalog.create_property("empty").unwrap();
        let mut root = Directory::new("", "root");
        root.directories.push(Directory::new("C", "C"));
        catalog.insert_directory(&root, "/src");

        let json = catalog.to_json().unwrap();
        let restored = Catalog::from_json(&json, CatalogSettings::default()).unwrap();

        assert_eq!(restored.export(), catalog.export());
        assert!(restored.tag_exists("unused"));
        assert!(restored.property_values("empty").unwrap().is_empty());
        assert_eq!(restored.source_path(), Some("/src"));
    }

    #[test]
    fn test_from_json_rejects_invalid_records() {
        let json = r#"{"tags": [{"name": ""}]}"#;
        assert!(matches!(
            Catalog::from_json(json, CatalogSettings::default()),
            Err(Error::Serialization(_))
        ));
    }
}
