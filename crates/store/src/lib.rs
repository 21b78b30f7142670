//! In-memory record store for keywordable
//!
//! This crate provides the collaborator side of the system:
//! - Collection: record persistence with searchable declarations and
//!   before-save hooks
//! - Criteria: lazy, chainable AND-composition of searches and filters
//! - KeywordIndex: optional token index narrowing exact-mode searches
//!
//! The search core itself lives in `keywordable-search`; this crate wires
//! it to record storage the way the original host store would.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod criteria;
pub mod index;

// Re-export commonly used types
pub use collection::{BeforeSaveHook, Collection, RecordId};
pub use criteria::Criteria;
pub use index::KeywordIndex;
