//! Query compilation
//!
//! A raw query value is normalized through the same extraction rule as
//! stored keywords, then compiled together with the match-mode and
//! exactness options into a `MatchPredicate`: a set-membership test an
//! external collection can execute as a filter and compose with other
//! predicates.

use crate::keywords::{extract, KeywordSet};
use keywordable_core::{Error, FieldValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Options
// ============================================================================

/// How per-term tests are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every query term must match (logical AND)
    #[default]
    All,
    /// At least one query term must match (logical OR)
    Any,
}

/// Parse a match mode from a string option
///
/// Anything other than `all` or `any` is an input error, surfaced to the
/// caller rather than silently treated as "match nothing".
impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            other => Err(Error::InvalidMatchMode(other.to_string())),
        }
    }
}

/// Options for a search query
///
/// Defaults: `mode = All`, `exact = false`.
///
/// # Example
///
/// ```
/// use keywordable_search::{MatchMode, SearchOptions};
///
/// let options = SearchOptions::default().mode(MatchMode::Any).exact(true);
/// assert_eq!(options.mode, MatchMode::Any);
/// assert!(options.exact);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// How per-term tests are combined
    pub mode: MatchMode,
    /// Whether a term must equal a stored keyword exactly, or merely be
    /// contained within one as a substring
    pub exact: bool,
}

impl SearchOptions {
    /// Set the match mode
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set exact-token matching on or off
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }
}

// ============================================================================
// MatchPredicate
// ============================================================================

/// Compiled search query
///
/// A set-membership test over a record's stored keyword set. An empty term
/// set matches all records unconditionally: blank or too-short queries
/// degrade to "no filtering" rather than "match nothing".
///
/// The predicate is pure and assumes nothing about being the only filter
/// applied; composing it with other filters in any order yields the same
/// final set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPredicate {
    terms: KeywordSet,
    mode: MatchMode,
    exact: bool,
}

impl MatchPredicate {
    /// Compile a raw query value into a predicate
    ///
    /// The query is normalized through the same tokenization as stored
    /// keywords, so search terms are cleaned identically to what they are
    /// matched against.
    ///
    /// # Example
    ///
    /// ```
    /// use keywordable_core::FieldValue;
    /// use keywordable_search::{extract, MatchPredicate, SearchOptions};
    ///
    /// let predicate = MatchPredicate::compile(
    ///     &FieldValue::from("New York"),
    ///     SearchOptions::default(),
    /// );
    /// let stored = extract(&FieldValue::from("new york city"));
    /// assert!(predicate.matches(&stored));
    /// ```
    pub fn compile(query: &FieldValue, options: SearchOptions) -> Self {
        MatchPredicate {
            terms: extract(query),
            mode: options.mode,
            exact: options.exact,
        }
    }

    /// Check whether the predicate applies no filtering at all
    pub fn is_unrestricted(&self) -> bool {
        self.terms.is_empty()
    }

    /// The normalized query terms
    pub fn terms(&self) -> &KeywordSet {
        &self.terms
    }

    /// Whether exact-token matching was requested
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// The configured match mode
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Evaluate the predicate against a record's stored keyword set
    pub fn matches(&self, keywords: &KeywordSet) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        match self.mode {
            MatchMode::All => self.terms.iter().all(|t| self.term_matches(t, keywords)),
            MatchMode::Any => self.terms.iter().any(|t| self.term_matches(t, keywords)),
        }
    }

    fn term_matches(&self, term: &str, keywords: &KeywordSet) -> bool {
        if self.exact {
            keywords.contains(term)
        } else {
            keywords.contains_substring(term)
        }
    }
}
