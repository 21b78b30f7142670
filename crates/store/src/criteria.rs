//! Chainable query criteria
//!
//! A `Criteria` is an AND-composition of predicates over one collection.
//! Keyword searches and arbitrary record filters can be chained in any
//! order; the final result set is the same regardless of ordering, so a
//! search composes with range filters the caller supplies before or after
//! it.
//!
//! Execution is lazy: nothing is read from the collection — including
//! index candidate lookups — until `fetch`, `ids`, or `count` is called,
//! so records saved after a criteria is built are still visible to it.

use crate::collection::{Collection, RecordId};
use keywordable_core::{Error, FieldValue, Record, Result};
use keywordable_search::{KeywordSet, MatchPredicate, SearchOptions};
use std::collections::HashSet;
use tracing::debug;

/// Record predicate applied during criteria execution
type RecordPredicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// A compiled keyword search awaiting execution
struct SearchFilter {
    predicate: MatchPredicate,
    keywords_field: String,
}

impl SearchFilter {
    fn accepts<R: Record>(&self, record: &R) -> bool {
        let stored = record
            .read_field(&self.keywords_field)
            .map(|v| KeywordSet::from_value(&v))
            .unwrap_or_default();
        self.predicate.matches(&stored)
    }
}

/// Lazy, chainable filter over a collection
///
/// # Example
///
/// ```
/// use keywordable_core::{MapRecord, SearchableConfig};
/// use keywordable_search::SearchOptions;
/// use keywordable_store::Collection;
///
/// let mut cities = Collection::new("cities");
/// cities
///     .declare_searchable(SearchableConfig::new(["name", "population"]).unwrap())
///     .unwrap();
/// cities
///     .save(MapRecord::new().with("name", "New York").with("population", 18_897_109i64))
///     .unwrap();
///
/// let big_apple = cities
///     .criteria()
///     .filter(|r: &MapRecord| {
///         r.get("population").and_then(|v| v.as_int()).unwrap_or(0) > 10_000
///     })
///     .search(&"york".into(), SearchOptions::default())
///     .unwrap();
/// assert_eq!(big_apple.count(), 1);
/// ```
pub struct Criteria<'a, R: Record> {
    collection: &'a Collection<R>,
    predicates: Vec<RecordPredicate<R>>,
    searches: Vec<SearchFilter>,
}

impl<R: Record> std::fmt::Debug for Criteria<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criteria")
            .field("predicates", &self.predicates.len())
            .field("searches", &self.searches.len())
            .finish()
    }
}

impl<'a, R: Record> Criteria<'a, R> {
    pub(crate) fn new(collection: &'a Collection<R>) -> Self {
        Criteria {
            collection,
            predicates: Vec::new(),
            searches: Vec::new(),
        }
    }

    /// Add an arbitrary record filter
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add a keyword search over the collection's declared keyword field
    ///
    /// The query is normalized identically to stored keywords and compiled
    /// into a match predicate. When the keyword index can answer the
    /// predicate (exact mode, index enabled), its candidate set narrows the
    /// scan at execution time; the predicate is always re-verified against
    /// each record, so the index never changes which records match.
    ///
    /// Fails with `NotSearchable` if the collection has no searchable
    /// declaration.
    pub fn search(mut self, query: &FieldValue, options: SearchOptions) -> Result<Self> {
        let config = self
            .collection
            .config()
            .ok_or_else(|| Error::NotSearchable {
                collection: self.collection.name().to_string(),
            })?;

        let predicate = MatchPredicate::compile(query, options);
        debug!(
            collection = %self.collection.name(),
            terms = predicate.terms().len(),
            exact = predicate.is_exact(),
            mode = ?predicate.match_mode(),
            "compiled search predicate"
        );

        self.searches.push(SearchFilter {
            predicate,
            keywords_field: config.keywords_field.clone(),
        });

        Ok(self)
    }

    /// Matching record ids, sorted for determinism
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids = Vec::new();
        self.execute(|id, _| ids.push(*id));
        ids.sort();
        ids
    }

    /// Number of matching records
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.execute(|_, _| count += 1);
        count
    }

    /// Scan the collection, narrowing through the index where possible
    ///
    /// Candidates are resolved here, not at `search` time, so the scan
    /// reflects the collection's contents at the moment of execution.
    fn execute<F>(&self, mut f: F)
    where
        F: FnMut(&RecordId, &R),
    {
        let candidates = self.candidates();
        self.collection.scan(|id, record| {
            if let Some(candidates) = &candidates {
                if !candidates.contains(id) {
                    return;
                }
            }
            if self.accepts(record) {
                f(id, record);
            }
        });
    }

    /// Intersection of index candidate sets over the chained searches
    ///
    /// `None` when no search can be answered by the index; such searches
    /// are still enforced by `accepts`.
    fn candidates(&self) -> Option<HashSet<RecordId>> {
        let mut result: Option<HashSet<RecordId>> = None;
        for search in &self.searches {
            if let Some(ids) = self.collection.index().candidates(&search.predicate) {
                result = Some(match result {
                    Some(acc) => acc.intersection(&ids).copied().collect(),
                    None => ids,
                });
            }
        }
        result
    }

    fn accepts(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p(record))
            && self.searches.iter().all(|s| s.accepts(record))
    }
}

impl<R: Record + Clone> Criteria<'_, R> {
    /// Matching records with their ids, sorted by id for determinism
    pub fn fetch(&self) -> Vec<(RecordId, R)> {
        let mut matched = Vec::new();
        self.execute(|id, record| matched.push((*id, record.clone())));
        matched.sort_by_key(|(id, _)| *id);
        matched
    }
}
