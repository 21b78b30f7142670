//! End-to-end searchable collection behavior
//!
//! Exercises the full declare/save/search flow over map-backed records:
//! keyword derivation on save, rebuilds on update, alternate keyword
//! fields, match-mode and exactness semantics, and criteria chaining.

use keywordable_core::{FieldValue, MapRecord, SearchableConfig};
use keywordable_search::{KeywordSet, MatchMode, SearchOptions};
use keywordable_store::{Collection, RecordId};

fn new_york() -> MapRecord {
    MapRecord::new()
        .with("name", "New York")
        .with("nickname", "The Big Apple")
        .with("population", 18_897_109i64)
        .with(
            "boroughs",
            vec!["Manhattan", "Brooklyn", "Queens", "The Bronx", "Staten Island"],
        )
        .with(
            "officials",
            FieldValue::from(serde_json::json!({
                "Mayor": "Michael Bloomberg",
                "Governor": "Andrew Cuomo"
            })),
        )
}

fn cities() -> (Collection<MapRecord>, RecordId) {
    let mut collection = Collection::new("cities");
    collection
        .declare_searchable(
            SearchableConfig::new(["name", "nickname", "population", "boroughs", "officials"])
                .unwrap(),
        )
        .unwrap();
    let id = collection.save(new_york()).unwrap();
    (collection, id)
}

fn stored_keywords(collection: &Collection<MapRecord>, id: &RecordId, field: &str) -> KeywordSet {
    let record = collection.get(id).unwrap();
    KeywordSet::from_value(record.get(field).unwrap())
}

#[test]
fn keywords_are_derived_from_every_declared_field() {
    let (collection, id) = cities();
    let keywords = stored_keywords(&collection, &id, "keywords");

    // multi-word strings
    assert!(keywords.contains("big"));
    assert!(keywords.contains("apple"));
    // integers
    assert!(keywords.contains("18897109"));
    // arrays
    assert!(keywords.contains("staten"));
    // hash values, lowercased
    assert!(keywords.contains("bloomberg"));
    assert!(keywords.contains("manhattan"));
    assert!(keywords.contains("york"));
}

#[test]
fn keywords_update_on_attribute_change() {
    let (collection, id) = cities();

    let mut updated = collection.get(&id).unwrap();
    updated.set("population", 20_000_000i64);
    collection.save_with_id(id, updated).unwrap();

    let keywords = stored_keywords(&collection, &id, "keywords");
    assert!(keywords.contains("20000000"));
    assert!(!keywords.contains("18897109"));
}

#[test]
fn keywords_can_be_stored_in_an_alternate_field() {
    let mut businesses = Collection::new("businesses");
    businesses
        .declare_searchable(
            SearchableConfig::new(["name", "street"])
                .unwrap()
                .store_in("search_fields")
                .index(false),
        )
        .unwrap();

    let id = businesses
        .save(
            MapRecord::new()
                .with("name", "Cupcakes")
                .with("street", "123 Park Ave"),
        )
        .unwrap();

    let record = businesses.get(&id).unwrap();
    assert!(record.get("keywords").is_none());

    let keywords = stored_keywords(&businesses, &id, "search_fields");
    assert!(keywords.contains("cupcakes"));
    assert!(keywords.contains("123"));

    // searching still works without the index, via scan
    let hits = businesses
        .search(&"cupcakes".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 1);
}

#[test]
fn search_requires_all_terms_by_default() {
    let (collection, _) = cities();
    let hits = collection
        .search(&"new california".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 0);
}

#[test]
fn search_any_matches_on_a_single_term() {
    let (collection, _) = cities();
    let hits = collection
        .search(
            &"new california".into(),
            SearchOptions::default().mode(MatchMode::Any),
        )
        .unwrap();
    assert_eq!(hits.count(), 1);
}

#[test]
fn search_is_substring_based_by_default() {
    let (collection, _) = cities();
    // "queen" is contained within stored keyword "queens"
    let hits = collection
        .search(&"Queen".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 1);
}

#[test]
fn exact_search_requires_full_token_equality() {
    let (collection, _) = cities();

    let queen = collection
        .search(&"Queen".into(), SearchOptions::default().exact(true))
        .unwrap();
    assert_eq!(queen.count(), 0);

    let queens = collection
        .search(&"Queens".into(), SearchOptions::default().exact(true))
        .unwrap();
    assert_eq!(queens.count(), 1);

    let multi = collection
        .search(
            &"Manhattan, New York".into(),
            SearchOptions::default().exact(true),
        )
        .unwrap();
    assert_eq!(multi.count(), 1);
}

#[test]
fn search_can_find_more_than_one_record() {
    let (collection, _) = cities();
    collection
        .save(MapRecord::new().with("name", "Yorkshire"))
        .unwrap();

    let hits = collection
        .search(&"york".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 2);
}

#[test]
fn search_chains_with_other_filters_in_either_order() {
    let (collection, _) = cities();
    collection
        .save(
            MapRecord::new()
                .with("name", "Bronxville")
                .with("population", 6_500i64),
        )
        .unwrap();

    let population_over = |limit: i64| {
        move |record: &MapRecord| {
            record
                .get("population")
                .and_then(|v| v.as_int())
                .unwrap_or(0)
                > limit
        }
    };

    let search_then_filter = collection
        .search(&"bronx".into(), SearchOptions::default())
        .unwrap()
        .filter(population_over(10_000));
    let filter_then_search = collection
        .criteria()
        .filter(population_over(10_000))
        .search(&"bronx".into(), SearchOptions::default())
        .unwrap();

    assert_eq!(search_then_filter.count(), 1);
    assert_eq!(search_then_filter.ids(), filter_then_search.ids());

    let nothing = collection
        .search(&"bronx".into(), SearchOptions::default())
        .unwrap()
        .filter(move |record: &MapRecord| {
            record
                .get("population")
                .and_then(|v| v.as_int())
                .unwrap_or(0)
                < 5_000
        });
    assert_eq!(nothing.count(), 0);
}

#[test]
fn search_finds_unicode_words() {
    let (collection, _) = cities();
    collection
        .save(
            MapRecord::new().with("name", "東京").with(
                "officials",
                FieldValue::from(serde_json::json!({"governor": "石原 慎太郎"})),
            ),
        )
        .unwrap();

    let hits = collection
        .search(&"石原".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 1);
}

#[test]
fn empty_and_too_short_queries_match_everything() {
    let (collection, _) = cities();

    for query in ["", "a"] {
        let hits = collection
            .search(&query.into(), SearchOptions::default())
            .unwrap();
        assert_eq!(hits.count(), 1, "query {query:?} should be unrestricted");
    }

    // two chars is a real term; it matches "apple" by containment
    let hits = collection
        .search(&"ap".into(), SearchOptions::default())
        .unwrap();
    assert_eq!(hits.count(), 1);
}

#[test]
fn collections_are_independent() {
    let (cities, city_id) = cities();

    let mut towns = Collection::new("towns");
    towns
        .declare_searchable(SearchableConfig::new(["name"]).unwrap())
        .unwrap();
    towns
        .save(MapRecord::new().with("name", "Yorkville"))
        .unwrap();

    // building keywords in one collection never mutates the other's records
    let city_keywords = stored_keywords(&cities, &city_id, "keywords");
    assert!(!city_keywords.contains("yorkville"));

    assert_eq!(
        cities
            .search(&"bloomberg".into(), SearchOptions::default())
            .unwrap()
            .count(),
        1
    );
    assert_eq!(
        towns
            .search(&"bloomberg".into(), SearchOptions::default())
            .unwrap()
            .count(),
        0
    );
}

#[test]
fn exact_and_substring_results_agree_with_and_without_index() {
    let build = |index: bool| {
        let mut collection = Collection::new("cities");
        collection
            .declare_searchable(SearchableConfig::new(["name"]).unwrap().index(index))
            .unwrap();
        collection
            .save(MapRecord::new().with("name", "New York"))
            .unwrap();
        collection
            .save(MapRecord::new().with("name", "Yorkshire"))
            .unwrap();
        collection
    };

    for index in [true, false] {
        let collection = build(index);
        let exact = collection
            .search(&"york".into(), SearchOptions::default().exact(true))
            .unwrap();
        assert_eq!(exact.count(), 1, "index={index}");

        let substring = collection
            .search(&"york".into(), SearchOptions::default())
            .unwrap();
        assert_eq!(substring.count(), 2, "index={index}");
    }
}
