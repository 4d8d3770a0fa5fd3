//! Docman Core - Document records and filters
//!
//! This crate provides the record types of the Docman document database
//! (tags, properties, documents and directories), the composable filters used
//! to query them, and an in-memory catalog tying both together.

pub mod array;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod document;
pub mod error;
pub mod filter;
pub mod limits;
pub mod property;
pub mod scan;
pub mod tag;

pub use array::{DocumentArray, PropertyValueArray, RecordArray, TagArray};
pub use catalog::{Catalog, CatalogSnapshot, PropertySnapshot};
pub use config::CatalogSettings;
pub use directory::Directory;
pub use document::{parse_date, Document, DATE_FORMAT};
pub use error::{Error, Result};
pub use filter::{
    AnyFilter, DateFilter, DateSpan, DirectoryFilter, DocumentFilter, FilenameFilter, FilterCriterion,
    PropertyFilter, RankedDocument, TagFilter,
};
pub use limits::{BoundedString, LongString, ShortString, ValidationError, LONG_STRING_LEN, SHORT_STRING_LEN};
pub use property::{Property, PropertyValue};
pub use scan::DirectoryScanner;
pub use tag::Tag;
