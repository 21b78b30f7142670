//! Error types for keywordable
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! All failures here are caller input errors: synchronous, non-retryable.
//! Malformed field values are NOT errors - they degrade to empty keyword
//! contributions during extraction.

use thiserror::Error;

/// Result type alias for keywordable operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for keywordable operations
#[derive(Debug, Error)]
pub enum Error {
    /// Search or keyword-build invoked before `declare_searchable`
    #[error("collection `{collection}` has no searchable fields declared; call declare_searchable first")]
    NotSearchable {
        /// Name of the collection that is missing a declaration
        collection: String,
    },

    /// Searchable declaration supplied with an empty field list
    #[error("at least one searchable field must be declared")]
    EmptySearchableFields,

    /// Unrecognized match mode supplied as a string option
    #[error("invalid match mode `{0}`: expected `all` or `any`")]
    InvalidMatchMode(String),
}
