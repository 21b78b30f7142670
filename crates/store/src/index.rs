//! Optional keyword index for fast exact-match search
//!
//! This module provides:
//! - KeywordIndex mapping tokens to record ids
//! - Enable/disable functionality
//! - Synchronous index updates on save
//!
//! Indexing is OPTIONAL. Search works without it (via full scan). When
//! enabled, exact-mode searches use the index for candidate lookup;
//! substring searches always scan, since a token-keyed map cannot answer
//! containment queries.

use crate::collection::RecordId;
use dashmap::DashMap;
use keywordable_search::{KeywordSet, MatchMode, MatchPredicate};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Keyword index over record ids
///
/// When disabled, all operations are NOOP (zero overhead).
///
/// # Thread Safety
///
/// Uses DashMap for concurrent access. Multiple readers/writers supported.
pub struct KeywordIndex {
    /// Token -> record ids containing it
    postings: DashMap<String, HashSet<RecordId>>,

    /// Record -> its indexed tokens, so removal only visits the record's
    /// own postings instead of every token in the index
    record_tokens: DashMap<RecordId, Vec<String>>,

    /// Whether the index is enabled
    enabled: AtomicBool,
}

impl Default for KeywordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordIndex {
    /// Create a new disabled index
    pub fn new() -> Self {
        KeywordIndex {
            postings: DashMap::new(),
            record_tokens: DashMap::new(),
            enabled: AtomicBool::new(false),
        }
    }

    /// Check if the index is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Enable the index
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Disable the index
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Clear all index data
    ///
    /// Does NOT change enabled state.
    pub fn clear(&self) {
        self.postings.clear();
        self.record_tokens.clear();
    }

    /// Index a record's keyword set
    ///
    /// NOOP if disabled. Removes any previous postings for the record
    /// first, so re-saving never leaves stale tokens behind.
    pub fn index_record(&self, id: RecordId, keywords: &KeywordSet) {
        if !self.is_enabled() {
            return; // Zero overhead when disabled
        }

        self.remove_record(&id);

        for token in keywords.iter() {
            self.postings.entry(token.clone()).or_default().insert(id);
        }
        self.record_tokens
            .insert(id, keywords.iter().cloned().collect());
    }

    /// Remove a record from the postings of its own tokens
    ///
    /// NOOP if disabled. Cost is proportional to the record's token count,
    /// not the size of the index.
    pub fn remove_record(&self, id: &RecordId) {
        if !self.is_enabled() {
            return;
        }

        if let Some((_, tokens)) = self.record_tokens.remove(id) {
            for token in tokens {
                if let Some(mut entry) = self.postings.get_mut(&token) {
                    entry.remove(id);
                }
            }
        }
    }

    /// Candidate record ids for an exact-mode predicate
    ///
    /// Returns `None` when the index cannot answer: disabled, non-exact
    /// (substring) predicates, or unrestricted predicates. Callers fall
    /// back to a scan; the predicate itself is always re-verified against
    /// the stored keyword set.
    pub fn candidates(&self, predicate: &MatchPredicate) -> Option<HashSet<RecordId>> {
        if !self.is_enabled() || !predicate.is_exact() || predicate.is_unrestricted() {
            return None;
        }

        let lookup = |term: &str| -> HashSet<RecordId> {
            self.postings
                .get(term)
                .map(|r| r.clone())
                .unwrap_or_default()
        };

        let mut terms = predicate.terms().iter();
        let first = lookup(terms.next()?);

        let result = match predicate.match_mode() {
            MatchMode::All => terms.fold(first, |acc, term| {
                acc.intersection(&lookup(term)).copied().collect()
            }),
            MatchMode::Any => terms.fold(first, |mut acc, term| {
                acc.extend(lookup(term));
                acc
            }),
        };

        Some(result)
    }

    /// Number of distinct tokens in the index
    pub fn token_count(&self) -> usize {
        self.postings.iter().filter(|e| !e.is_empty()).count()
    }
}
