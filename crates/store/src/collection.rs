//! In-memory record collection
//!
//! The concrete collaborator the search core is attached to. A collection
//! owns its records, the per-collection searchable declaration, the
//! before-save hook chain, and the optional keyword index.
//!
//! ## Thread Safety
//!
//! Records live behind a `parking_lot::RwLock`; the keyword index uses
//! DashMap internally. Saves to different records and concurrent searches
//! need no external coordination. Declarations happen once at setup time
//! and take `&mut self`.

use crate::criteria::Criteria;
use crate::index::KeywordIndex;
use keywordable_core::{Error, FieldValue, Record, Result, SearchableConfig};
use keywordable_search::{apply_keywords, KeywordSet, SearchOptions};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

// ============================================================================
// RecordId
// ============================================================================

/// Unique identifier for a record within a collection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new random record id
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Hook invoked on a record immediately before it is persisted
pub type BeforeSaveHook<R> = Box<dyn Fn(&mut R) -> Result<()> + Send + Sync>;

/// In-memory collection of records with optional searchable declaration
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
///     .declare_searchable(SearchableConfig::new(["name"]).unwrap())
///     .unwrap();
///
/// cities.save(MapRecord::new().with("name", "New York")).unwrap();
///
/// let hits = cities
///     .search(&"york".into(), SearchOptions::default())
///     .unwrap()
///     .fetch();
/// assert_eq!(hits.len(), 1);
/// ```
pub struct Collection<R: Record> {
    name: String,
    config: Option<SearchableConfig>,
    records: RwLock<HashMap<RecordId, R>>,
    index: KeywordIndex,
    /// Keyword-building hook, held apart from caller hooks so a
    /// re-declaration replaces it instead of stacking another one
    keyword_hook: Option<BeforeSaveHook<R>>,
    before_save: Vec<BeforeSaveHook<R>>,
}

impl<R: Record> Collection<R> {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            config: None,
            records: RwLock::new(HashMap::new()),
            index: KeywordIndex::new(),
            keyword_hook: None,
            before_save: Vec::new(),
        }
    }

    /// The collection's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The searchable declaration, if one has been made
    pub fn config(&self) -> Option<&SearchableConfig> {
        self.config.as_ref()
    }

    /// Access the keyword index
    pub(crate) fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Declare the searchable environment for this collection
    ///
    /// Stores the configuration, enables the keyword index when asked, and
    /// registers the keyword-building before-save hook. Typically called
    /// once at setup time; a re-declaration replaces the previous one,
    /// rebuilding keywords and index postings for records already saved.
    pub fn declare_searchable(&mut self, config: SearchableConfig) -> Result<&mut Self> {
        if config.searchable_fields.is_empty() {
            return Err(Error::EmptySearchableFields);
        }

        debug!(
            collection = %self.name,
            fields = ?config.searchable_fields,
            keywords_field = %config.keywords_field,
            index = config.index,
            "declaring searchable fields"
        );

        if config.index {
            self.index.enable();
        } else {
            self.index.disable();
        }
        self.index.clear();

        let hook_config = config.clone();
        self.keyword_hook = Some(Box::new(move |record: &mut R| {
            apply_keywords(record, &hook_config)
        }));

        self.config = Some(config);
        self.rebuild_all()?;
        Ok(self)
    }

    /// Rebuild keywords and index postings for every stored record
    ///
    /// Brings records saved under an earlier (or absent) declaration in
    /// line with the current one.
    fn rebuild_all(&self) -> Result<()> {
        let config = match &self.config {
            Some(config) => config,
            None => return Ok(()),
        };

        let mut records = self.records.write();
        for (id, record) in records.iter_mut() {
            apply_keywords(record, config)?;
            let stored = record
                .read_field(&config.keywords_field)
                .map(|v| KeywordSet::from_value(&v))
                .unwrap_or_default();
            self.index.index_record(*id, &stored);
        }
        Ok(())
    }

    /// Register an additional before-save hook
    ///
    /// Hooks run in registration order on every save, before the record is
    /// persisted.
    pub fn before_save<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut R) -> Result<()> + Send + Sync + 'static,
    {
        self.before_save.push(Box::new(hook));
        self
    }

    /// Save a new record, returning its id
    pub fn save(&self, record: R) -> Result<RecordId> {
        self.save_with_id(RecordId::new(), record)
    }

    /// Save a record under a known id, replacing any previous version
    ///
    /// Runs the before-save hook chain, then rebuilds the keyword field,
    /// then persists the record and synchronously updates the keyword
    /// index. The keyword hook runs last so the derived set reflects
    /// whatever the other hooks left in the searchable fields.
    pub fn save_with_id(&self, id: RecordId, mut record: R) -> Result<RecordId> {
        for hook in &self.before_save {
            hook(&mut record)?;
        }
        if let Some(hook) = &self.keyword_hook {
            hook(&mut record)?;
        }

        if let Some(config) = &self.config {
            let stored = record
                .read_field(&config.keywords_field)
                .map(|v| KeywordSet::from_value(&v))
                .unwrap_or_default();
            self.index.index_record(id, &stored);
        }

        debug!(collection = %self.name, %id, "saving record");
        self.records.write().insert(id, record);
        Ok(id)
    }

    /// Remove a record by id
    pub fn remove(&self, id: &RecordId) -> Option<R> {
        self.index.remove_record(id);
        self.records.write().remove(id)
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Start an unrestricted criteria over this collection
    pub fn criteria(&self) -> Criteria<'_, R> {
        Criteria::new(self)
    }

    /// Search the collection's keyword field
    ///
    /// Shorthand for `criteria().search(query, options)`. Fails with
    /// `NotSearchable` if no declaration has been made.
    pub fn search(&self, query: &FieldValue, options: SearchOptions) -> Result<Criteria<'_, R>> {
        self.criteria().search(query, options)
    }

    /// Run a closure over every stored record
    pub(crate) fn scan<F>(&self, mut f: F)
    where
        F: FnMut(&RecordId, &R),
    {
        for (id, record) in self.records.read().iter() {
            f(id, record);
        }
    }
}

impl<R: Record + Clone> Collection<R> {
    /// Fetch a record by id
    pub fn get(&self, id: &RecordId) -> Option<R> {
        self.records.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywordable_core::MapRecord;

    fn city(name: &str) -> MapRecord {
        MapRecord::new().with("name", name)
    }

    fn declared() -> Collection<MapRecord> {
        let mut collection = Collection::new("cities");
        collection
            .declare_searchable(SearchableConfig::new(["name"]).unwrap())
            .unwrap();
        collection
    }

    #[test]
    fn test_save_and_get() {
        let collection = declared();
        let id = collection.save(city("New York")).unwrap();

        let record = collection.get(&id).unwrap();
        assert_eq!(record.get("name").unwrap().as_str(), Some("New York"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_save_builds_keywords() {
        let collection = declared();
        let id = collection.save(city("New York")).unwrap();

        let record = collection.get(&id).unwrap();
        let keywords = KeywordSet::from_value(record.get("keywords").unwrap());
        assert!(keywords.contains("new"));
        assert!(keywords.contains("york"));
    }

    #[test]
    fn test_resave_overwrites_keywords() {
        let collection = declared();
        let id = collection.save(city("New York")).unwrap();
        collection.save_with_id(id, city("Yorkshire")).unwrap();

        let record = collection.get(&id).unwrap();
        let keywords = KeywordSet::from_value(record.get("keywords").unwrap());
        assert!(keywords.contains("yorkshire"));
        assert!(!keywords.contains("new"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_save_without_declaration_is_plain_persistence() {
        let collection: Collection<MapRecord> = Collection::new("plain");
        let id = collection.save(city("New York")).unwrap();

        let record = collection.get(&id).unwrap();
        assert!(record.get("keywords").is_none());
    }

    #[test]
    fn test_search_without_declaration_fails() {
        let collection: Collection<MapRecord> = Collection::new("plain");
        let err = collection
            .search(&"york".into(), SearchOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotSearchable { .. }));
    }

    #[test]
    fn test_declare_empty_fields_fails() {
        let mut collection: Collection<MapRecord> = Collection::new("cities");
        let mut config = SearchableConfig::new(["name"]).unwrap();
        config.searchable_fields.clear();
        assert!(matches!(
            collection.declare_searchable(config),
            Err(Error::EmptySearchableFields)
        ));
    }

    #[test]
    fn test_index_flag_controls_index() {
        let mut indexed: Collection<MapRecord> = Collection::new("indexed");
        indexed
            .declare_searchable(SearchableConfig::new(["name"]).unwrap())
            .unwrap();
        assert!(indexed.index().is_enabled());

        let mut unindexed: Collection<MapRecord> = Collection::new("unindexed");
        unindexed
            .declare_searchable(SearchableConfig::new(["name"]).unwrap().index(false))
            .unwrap();
        assert!(!unindexed.index().is_enabled());
    }

    #[test]
    fn test_redeclare_replaces_previous_declaration() {
        let mut collection = declared();
        let id = collection.save(city("New York")).unwrap();

        // re-declare with a different keywords field; the old hook must be
        // gone, so newly saved records only carry the new field
        collection
            .declare_searchable(
                SearchableConfig::new(["name"]).unwrap().store_in("tokens"),
            )
            .unwrap();
        let fresh = collection.save(city("Yorkshire")).unwrap();

        let record = collection.get(&fresh).unwrap();
        assert!(record.get("keywords").is_none());
        assert!(KeywordSet::from_value(record.get("tokens").unwrap()).contains("yorkshire"));

        // records saved under the old declaration were rebuilt too
        let record = collection.get(&id).unwrap();
        assert!(KeywordSet::from_value(record.get("tokens").unwrap()).contains("york"));
    }

    #[test]
    fn test_redeclare_with_index_reindexes_existing_records() {
        let mut collection: Collection<MapRecord> = Collection::new("cities");
        collection
            .declare_searchable(SearchableConfig::new(["name"]).unwrap().index(false))
            .unwrap();
        collection.save(city("New York")).unwrap();

        collection
            .declare_searchable(SearchableConfig::new(["name"]).unwrap())
            .unwrap();

        // the rebuilt index must answer for records saved while it was off
        let hits = collection
            .search(&"york".into(), SearchOptions::default().exact(true))
            .unwrap();
        assert_eq!(hits.count(), 1);
    }

    #[test]
    fn test_redeclare_without_index_drops_stale_postings() {
        let mut collection = declared();
        collection.save(city("New York")).unwrap();

        collection
            .declare_searchable(SearchableConfig::new(["name"]).unwrap().index(false))
            .unwrap();
        assert!(!collection.index().is_enabled());
        assert_eq!(collection.index().token_count(), 0);

        // search still works via scan
        let hits = collection
            .search(&"york".into(), SearchOptions::default())
            .unwrap();
        assert_eq!(hits.count(), 1);
    }

    #[test]
    fn test_remove_record() {
        let collection = declared();
        let id = collection.save(city("New York")).unwrap();

        assert!(collection.remove(&id).is_some());
        assert!(collection.is_empty());
        assert!(collection.remove(&id).is_none());
    }

    #[test]
    fn test_extra_before_save_hook_runs() {
        let mut collection: Collection<MapRecord> = Collection::new("stamped");
        collection.before_save(|record| {
            record.write_field("stamped", FieldValue::Bool(true));
            Ok(())
        });

        let id = collection.save(city("New York")).unwrap();
        let record = collection.get(&id).unwrap();
        assert_eq!(record.get("stamped"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_saves_do_not_touch_other_records() {
        let collection = declared();
        let first = collection.save(city("New York")).unwrap();
        let second = collection.save(city("Yorkshire")).unwrap();

        let keywords = |id: &RecordId| {
            let record = collection.get(id).unwrap();
            KeywordSet::from_value(record.get("keywords").unwrap())
        };
        assert!(keywords(&first).contains("new"));
        assert!(!keywords(&second).contains("new"));
    }

    #[test]
    fn test_record_id_display_and_ordering() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!(a.cmp(&b).reverse(), b.cmp(&a));
    }
}
