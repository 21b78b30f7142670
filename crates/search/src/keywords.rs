//! Keyword extraction
//!
//! This module provides the normalization policy that turns arbitrary field
//! values into a flat, deduplicated set of lowercase keyword tokens:
//! - Strings and numbers tokenize their display form
//! - Arrays union the extraction of each element
//! - Objects union the extraction of each value (keys are ignored)
//! - Everything else contributes nothing
//!
//! Recursion lets one declared field be a scalar, a list, or a nested
//! mapping without special-casing each shape at the call site.
//!
//! Extraction never fails; malformed input degrades to an empty
//! contribution. The only error surface is `build_keywords` being invoked
//! against a configuration with no searchable fields.

use keywordable_core::{Error, FieldValue, Record, Result, SearchableConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Matches HTML-like opening and closing tags
///
/// Tags must be removed before generic character stripping: the delimiters
/// are punctuation, but tag names would otherwise leak into tokens
/// (`<b>Los</b>` must yield `los`, not `blosb`).
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[^>]*>").expect("tag pattern is valid")
});

/// Tokenize text into normalized keyword tokens
///
/// Policy, in order:
/// 1. Strip HTML-like tags
/// 2. Lowercase
/// 3. Split on whitespace (punctuation does NOT split words)
/// 4. Remove characters that are not Unicode letters or digits
/// 5. Keep tokens of length >= 2, counted in chars
///
/// Counting chars rather than bytes keeps two-char non-ASCII tokens
/// (`çç`, `東京`) and still drops single letters.
///
/// # Example
///
/// ```
/// use keywordable_search::tokenize;
///
/// let tokens = tokenize("<b>Los</b> Angeles");
/// assert_eq!(tokens, vec!["los", "angeles"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    TAG_PATTERN
        .replace_all(text, "")
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

// ============================================================================
// KeywordSet
// ============================================================================

/// Deduplicated, order-irrelevant set of normalized keyword tokens
///
/// Every token is lowercase and at least two chars long, by construction
/// through `tokenize`. Backed by a BTreeSet so iteration and the stored
/// field value are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    /// Create an empty keyword set
    pub fn new() -> Self {
        KeywordSet(BTreeSet::new())
    }

    /// Insert a token, returning whether it was newly added
    pub fn insert(&mut self, token: String) -> bool {
        self.0.insert(token)
    }

    /// Check whether the set contains a token exactly
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Check whether any stored token contains `term` as a substring
    pub fn contains_substring(&self, term: &str) -> bool {
        self.0.iter().any(|token| token.contains(term))
    }

    /// Iterate over tokens in sorted order
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union another set into this one
    pub fn union_with(&mut self, other: KeywordSet) {
        self.0.extend(other.0);
    }

    /// Render as a field value (array of string tokens, sorted)
    pub fn to_value(&self) -> FieldValue {
        FieldValue::Array(self.0.iter().cloned().map(FieldValue::String).collect())
    }

    /// Read a keyword set back from a stored field value
    ///
    /// Non-array values and non-string elements are ignored, so a record
    /// whose keyword field was never built reads as an empty set.
    pub fn from_value(value: &FieldValue) -> Self {
        let mut set = KeywordSet::new();
        if let Some(items) = value.as_array() {
            for item in items {
                if let Some(token) = item.as_str() {
                    set.insert(token.to_string());
                }
            }
        }
        set
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        KeywordSet(iter.into_iter().collect())
    }
}

impl IntoIterator for KeywordSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract a keyword set from a field value, recursively
///
/// # Example
///
/// ```
/// use keywordable_core::FieldValue;
/// use keywordable_search::extract;
///
/// let value: FieldValue = vec!["Manhattan", "Brooklyn"].into();
/// let keywords = extract(&value);
/// assert!(keywords.contains("manhattan"));
/// assert!(keywords.contains("brooklyn"));
/// ```
pub fn extract(value: &FieldValue) -> KeywordSet {
    let mut keywords = KeywordSet::new();
    collect(value, &mut keywords);
    keywords
}

fn collect(value: &FieldValue, out: &mut KeywordSet) {
    match value {
        FieldValue::String(s) => {
            for token in tokenize(s) {
                out.insert(token);
            }
        }
        FieldValue::Int(i) => {
            for token in tokenize(&i.to_string()) {
                out.insert(token);
            }
        }
        FieldValue::Float(f) => {
            for token in tokenize(&f.to_string()) {
                out.insert(token);
            }
        }
        FieldValue::Array(items) => {
            for item in items {
                collect(item, out);
            }
        }
        // Keys are ignored: only values feed extraction
        FieldValue::Object(map) => {
            for item in map.values() {
                collect(item, out);
            }
        }
        FieldValue::Null | FieldValue::Bool(_) => {}
    }
}

// ============================================================================
// Record keyword building
// ============================================================================

/// Compute the keyword set for a record from its declared searchable fields
///
/// Reads each field in `config.searchable_fields` in order and unions the
/// extractions. Absent fields contribute nothing.
pub fn build_keywords<R: Record>(record: &R, config: &SearchableConfig) -> Result<KeywordSet> {
    if config.searchable_fields.is_empty() {
        return Err(Error::EmptySearchableFields);
    }

    let mut keywords = KeywordSet::new();
    for field in &config.searchable_fields {
        if let Some(value) = record.read_field(field) {
            collect(&value, &mut keywords);
        }
    }
    Ok(keywords)
}

/// Rebuild a record's keyword field in place
///
/// Invoked as a before-persist side effect. The keyword field is fully
/// overwritten, never merged, so it always reflects current field contents.
pub fn apply_keywords<R: Record>(record: &mut R, config: &SearchableConfig) -> Result<()> {
    let keywords = build_keywords(record, config)?;
    record.write_field(&config.keywords_field, keywords.to_value());
    Ok(())
}
