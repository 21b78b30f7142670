//! Keyword extraction and query compilation for keywordable
//!
//! This crate provides the two cooperating pieces at the heart of the
//! system:
//! - `keywords`: the normalization policy turning field values into a
//!   deduplicated set of lowercase keyword tokens, plus the before-persist
//!   keyword rebuild for configured records
//! - `query`: compilation of a raw query value into a `MatchPredicate`
//!   with ALL/ANY and exact/substring semantics
//!
//! Both are pure transformations; the only state is the immutable
//! per-collection `SearchableConfig` passed in by the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keywords;
pub mod query;

// Re-export commonly used items
pub use keywords::{apply_keywords, build_keywords, extract, tokenize, KeywordSet};
pub use query::{MatchMode, MatchPredicate, SearchOptions};
