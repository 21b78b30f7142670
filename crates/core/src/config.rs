//! Searchable configuration
//!
//! A `SearchableConfig` is constructed once per collection at declaration
//! time and passed by reference wherever keyword-building or searching
//! occurs. There is no hidden global state: every operation that needs the
//! declaration receives it explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default field the derived keyword set is written into
pub const DEFAULT_KEYWORDS_FIELD: &str = "keywords";

/// Per-collection searchable declaration
///
/// Captures which fields feed keyword extraction, where the derived set is
/// stored, and whether the collection should maintain a keyword index.
///
/// # Invariant
///
/// `searchable_fields` is never empty. The constructor rejects an empty
/// field list, so the invariant holds for the lifetime of the config.
///
/// # Example
///
/// ```
/// use keywordable_core::SearchableConfig;
///
/// let config = SearchableConfig::new(["name", "street"])
///     .unwrap()
///     .store_in("search_fields")
///     .index(false);
///
/// assert_eq!(config.keywords_field, "search_fields");
/// assert!(!config.index);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableConfig {
    /// Field the derived keyword set is written into
    pub keywords_field: String,
    /// Ordered fields feeding keyword extraction
    pub searchable_fields: Vec<String>,
    /// Whether the collection maintains a keyword index
    pub index: bool,
}

impl SearchableConfig {
    /// Create a configuration over the given searchable fields
    ///
    /// Uses the default keywords field name and enables indexing.
    /// Returns `EmptySearchableFields` if no fields are supplied.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let searchable_fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if searchable_fields.is_empty() {
            return Err(Error::EmptySearchableFields);
        }

        Ok(SearchableConfig {
            keywords_field: DEFAULT_KEYWORDS_FIELD.to_string(),
            searchable_fields,
            index: true,
        })
    }

    /// Store the derived keyword set in an alternate field
    pub fn store_in(mut self, field: impl Into<String>) -> Self {
        self.keywords_field = field.into();
        self
    }

    /// Turn keyword indexing on or off
    pub fn index(mut self, enabled: bool) -> Self {
        self.index = enabled;
        self
    }
}
