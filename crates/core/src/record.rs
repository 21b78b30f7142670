//! Record access traits
//!
//! A host record type exposes its fields to keyword extraction through the
//! `Record` trait: an explicit mapping from field name to value instead of
//! reflection or duck typing. Keyword building reads the declared searchable
//! fields through `read_field` and writes the derived set back through
//! `write_field`.

use crate::value::FieldValue;
use std::collections::HashMap;

/// Named-field reader/writer capability
///
/// The only contract keyword extraction and search place on a host record.
/// `read_field` returns an owned value so hosts may synthesize fields on
/// demand rather than storing `FieldValue` internally.
pub trait Record {
    /// Read a field by name
    ///
    /// Returns `None` for fields the record does not have; absent fields
    /// contribute nothing to keyword extraction.
    fn read_field(&self, name: &str) -> Option<FieldValue>;

    /// Write a field by name, replacing any previous value
    fn write_field(&mut self, name: &str, value: FieldValue);
}

/// Map-backed record
///
/// The simplest `Record` host: a named-field map. Used by the store layer
/// and throughout the test suites.
///
/// # Example
///
/// ```
/// use keywordable_core::{MapRecord, Record};
///
/// let mut city = MapRecord::new();
/// city.set("name", "New York");
/// assert_eq!(city.read_field("name").unwrap().as_str(), Some("New York"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRecord {
    fields: HashMap<String, FieldValue>,
}

impl MapRecord {
    /// Create an empty record
    pub fn new() -> Self {
        MapRecord {
            fields: HashMap::new(),
        }
    }

    /// Set a field, builder-style friendly
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field and return the record, for chained construction
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Borrow a field without cloning
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of fields on the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for MapRecord {
    fn read_field(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name).cloned()
    }

    fn write_field(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }
}

impl FromIterator<(String, FieldValue)> for MapRecord {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        MapRecord {
            fields: iter.into_iter().collect(),
        }
    }
}
