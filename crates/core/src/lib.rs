//! Core types for keywordable
//!
//! This crate defines the foundational types used throughout the system:
//! - FieldValue: Unified value enum for record fields
//! - SearchableConfig: Per-collection searchable declaration
//! - Record: Named-field reader/writer capability
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod value;

// Re-export commonly used types
pub use config::{SearchableConfig, DEFAULT_KEYWORDS_FIELD};
pub use error::{Error, Result};
pub use record::{MapRecord, Record};
pub use value::FieldValue;
