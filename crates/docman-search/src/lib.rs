//! Docman Search - Search engines over documents
//!
//! Provides filter-ranked search with substring matching, fuzzy search
//! (nucleo), an engine dispatching on the query's search mode and name
//! suggestions.

pub mod dispatch;
pub mod error;
pub mod exact;
pub mod query;
pub mod suggest;
pub mod traits;

#[cfg(feature = "fuzzy")]
pub mod fuzzy;

pub use dispatch::ModeSearchEngine;
pub use error::{SearchError, SearchResult};
pub use exact::FilterSearchEngine;
pub use query::{DocumentQuery, PaginatedResults, Pagination, PaginationInfo, SearchMode};
pub use suggest::SuggestionEngine;
pub use traits::{SearchEngine, SearchHit};

#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzySearchEngine;
