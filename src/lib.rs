//! Keywordable: keyword extraction and substring search for structured records
//!
//! Declare fields of a record collection as searchable; every save derives a
//! normalized keyword set from those fields and stores it on the record; a
//! free-text query compiles into an ALL/ANY, exact/substring match predicate
//! executed as a composable filter.
//!
//! # Example
//!
//! ```
//! use keywordable::{Collection, MapRecord, MatchMode, SearchOptions, SearchableConfig};
//!
//! let mut cities = Collection::new("cities");
//! cities
//!     .declare_searchable(
//!         SearchableConfig::new(["name", "nickname", "boroughs"]).unwrap(),
//!     )
//!     .unwrap();
//!
//! cities
//!     .save(
//!         MapRecord::new()
//!             .with("name", "New York")
//!             .with("nickname", "The Big Apple")
//!             .with("boroughs", vec!["Manhattan", "Brooklyn", "Queens"]),
//!     )
//!     .unwrap();
//!
//! // Substring match, ALL terms required by default
//! let hits = cities
//!     .search(&"big apple".into(), SearchOptions::default())
//!     .unwrap();
//! assert_eq!(hits.count(), 1);
//!
//! // ANY semantics
//! let hits = cities
//!     .search(
//!         &"brooklyn california".into(),
//!         SearchOptions::default().mode(MatchMode::Any),
//!     )
//!     .unwrap();
//! assert_eq!(hits.count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use keywordable_core::{
    Error, FieldValue, MapRecord, Record, Result, SearchableConfig, DEFAULT_KEYWORDS_FIELD,
};
pub use keywordable_search::{
    apply_keywords, build_keywords, extract, tokenize, KeywordSet, MatchMode, MatchPredicate,
    SearchOptions,
};
pub use keywordable_store::{BeforeSaveHook, Collection, Criteria, KeywordIndex, RecordId};
