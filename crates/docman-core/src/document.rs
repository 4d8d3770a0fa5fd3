//! Document records

use crate::array::{PropertyValueArray, TagArray};
use crate::error::{Error, Result};
use crate::limits::{required_long, LongString, ShortString};
use crate::property::PropertyValue;
use crate::tag::Tag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text format of document dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored file-like entity with its tags, property values and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    /// File name, e.g. `report.pdf`
    filename: LongString,

    /// Path of the file; identifies the document
    path: LongString,

    /// Tags, never duplicated
    tags: TagArray,

    /// Property values, never duplicated
    properties: PropertyValueArray,

    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct RawDocument {
    filename: String,
    path: String,
    #[serde(default)]
    tags: TagArray,
    #[serde(default)]
    properties: PropertyValueArray,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl TryFrom<RawDocument> for Document {
    type Error = Error;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let mut doc = Self::new(raw.filename, raw.path)?;
        for tag in raw.tags {
            doc.add_tag(tag);
        }
        for pv in raw.properties {
            doc.add_property(pv);
        }
        doc.date = raw.date;
        Ok(doc)
    }
}

impl Document {
    /// Create a document without tags, properties or date
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        Ok(Self {
            filename: required_long("filename", filename)?,
            path: required_long("path", path)?,
            tags: TagArray::new(),
            properties: PropertyValueArray::new(),
            date: None,
        })
    }

    pub fn filename(&self) -> &str {
        self.filename.as_str()
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn tags(&self) -> &TagArray {
        &self.tags
    }

    pub fn properties(&self) -> &PropertyValueArray {
        &self.properties
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Path of the directory containing this document.
    ///
    /// Empty when the path does not end in `/filename` (or `\filename`).
    pub fn parent_path(&self) -> &str {
        self.path()
            .strip_suffix(self.filename())
            .and_then(|p| p.strip_suffix('/').or_else(|| p.strip_suffix('\\')))
            .unwrap_or("")
    }

    /// Set the date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the date from its `YYYY-MM-DD` text form
    pub fn with_date_str(self, date: &str) -> Result<Self> {
        Ok(self.with_date(parse_date(date)?))
    }

    /// The date in `YYYY-MM-DD` form
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Builder form of [`Document::add_tag`]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.add_tag(tag);
        self
    }

    /// Builder form of [`Document::add_property`]
    pub fn with_property(mut self, value: PropertyValue) -> Self {
        self.add_property(value);
        self
    }

    /// Attach a tag; returns false if the document already has it
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Detach a tag by name
    pub fn remove_tag(&mut self, name: &str) -> bool {
        match self.tags.iter().position(|t| t.name() == name) {
            Some(pos) => {
                self.tags.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name() == name)
    }

    /// Attach a property value; returns false if the identical pair is present
    pub fn add_property(&mut self, value: PropertyValue) -> bool {
        if self.properties.contains(&value) {
            return false;
        }
        self.properties.push(value);
        true
    }

    /// Detach every value of the named property, returning how many were removed
    pub fn remove_property(&mut self, name: &str) -> usize {
        let before = self.properties.num_elements();
        self.properties.retain(|pv| pv.name() != name);
        before - self.properties.num_elements()
    }

    pub fn has_property(&self, name: &str, value: &str) -> bool {
        self.properties.iter().any(|pv| pv.is(name, value))
    }

    /// All values of the named property, in insertion order
    pub fn property_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.properties
            .iter()
            .filter(move |pv| pv.name() == name)
            .map(|pv| pv.value())
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Parse a `YYYY-MM-DD` date string, enforcing the short string bound
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    ShortString::new("date", date)?;
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{}: {}", date, e)))
}
