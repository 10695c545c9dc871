// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verse index: vocabulary, postings, and a document store.
//!
//! ```text
//!  vocabulary (sorted)      postings                        docs
//! ┌──────────────┐        ┌─────────────────────────┐    ┌──────────────────┐
//! │ 0 "الحمد"    │──────▶ │ (doc 1, text, tf 1) ... │    │ 0 "1:1:uthmani"  │
//! │ 1 "الرحمن"   │──────▶ │ (doc 0, text, tf 1) ... │──▶ │ 1 "1:2:uthmani"  │
//! │ 2 "الرحيم"   │──────▶ │ ...                     │    │ ...              │
//! └──────────────┘        └─────────────────────────┘    └──────────────────┘
//! ```
//!
//! Exact lookup is a binary search on the vocabulary. Prefix lookup is a
//! contiguous range of it, found with two more binary searches. Fuzzy lookup
//! scans it with a bounded edit distance.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **VOCAB_SORTED**: `vocabulary` is strictly ascending (sorted, no duplicates)
//! 2. **POSTINGS_ALIGNED**: `postings.len() == vocabulary.len()`
//! 3. **POSTING_LIST_SORTED**: each posting list is sorted by (doc, field), with
//!    at most one entry per (doc, field)
//! 4. **NON_EMPTY**: every term has at least one posting
//! 5. **POSTING_WELLFORMED**: every posting has `doc < docs.len()` and `term_freq > 0`
//!
//! Everything else (field lengths, document frequencies, the id map) is
//! derived from these three arrays by [`SearchIndex::assemble`], which both
//! the builder and the binary decoder go through. That is what makes a
//! restored index score identically to a freshly built one.

mod inverted;

pub use inverted::IndexBuilder;

use std::collections::HashMap;
use std::ops::Range;

use crate::types::{Field, StoredVerse};

/// One (document, field) occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Posting {
    /// Ordinal into the document store.
    pub doc: u32,
    pub field: Field,
    pub term_freq: u32,
}

/// A complete, immutable search index over one corpus snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    docs: Vec<StoredVerse>,
    vocabulary: Vec<String>,
    postings: Vec<Vec<Posting>>,
    // Derived
    ids: HashMap<String, u32>,
    doc_freqs: Vec<usize>,
    field_lengths: Vec<[u32; Field::COUNT]>,
    avg_field_lengths: [f64; Field::COUNT],
}

impl SearchIndex {
    /// An index with no documents. Searching it returns nothing.
    pub fn empty() -> Self {
        Self::assemble(Vec::new(), Vec::new(), Vec::new())
    }

    /// Attach the derived tables to the three primary arrays.
    ///
    /// Callers are responsible for the invariants in the module docs; the
    /// builder produces them by construction and the decoder checks them.
    pub(crate) fn assemble(
        docs: Vec<StoredVerse>,
        vocabulary: Vec<String>,
        postings: Vec<Vec<Posting>>,
    ) -> Self {
        let ids = docs
            .iter()
            .enumerate()
            .map(|(ordinal, doc)| (doc.id.clone(), ordinal as u32))
            .collect();

        let mut field_lengths = vec![[0u32; Field::COUNT]; docs.len()];
        let mut doc_freqs = Vec::with_capacity(postings.len());

        for list in &postings {
            let mut freq = 0;
            let mut last_doc = None;
            for posting in list {
                if let Some(lengths) = field_lengths.get_mut(posting.doc as usize) {
                    lengths[posting.field.index()] += posting.term_freq;
                }
                if last_doc != Some(posting.doc) {
                    freq += 1;
                    last_doc = Some(posting.doc);
                }
            }
            doc_freqs.push(freq);
        }

        let mut avg_field_lengths = [0.0; Field::COUNT];
        if !docs.is_empty() {
            for field in Field::ALL {
                let total: u64 = field_lengths
                    .iter()
                    .map(|lengths| u64::from(lengths[field.index()]))
                    .sum();
                avg_field_lengths[field.index()] = total as f64 / docs.len() as f64;
            }
        }

        Self {
            docs,
            vocabulary,
            postings,
            ids,
            doc_freqs,
            field_lengths,
            avg_field_lengths,
        }
    }

    /// Number of documents.
    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of distinct terms.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Document store, in ordinal order.
    #[inline]
    pub fn docs(&self) -> &[StoredVerse] {
        &self.docs
    }

    /// Look up a stored document by its `"surah:verse:edition"` id.
    pub fn get(&self, id: &str) -> Option<&StoredVerse> {
        self.ids.get(id).and_then(|&ordinal| self.docs.get(ordinal as usize))
    }

    /// Sorted vocabulary.
    #[inline]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Posting lists, aligned with the vocabulary.
    #[inline]
    pub fn postings(&self) -> &[Vec<Posting>] {
        &self.postings
    }

    /// Postings for one vocabulary slot.
    #[inline]
    pub fn postings_for(&self, term_idx: usize) -> &[Posting] {
        self.postings.get(term_idx).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct documents containing the term.
    #[inline]
    pub fn doc_freq(&self, term_idx: usize) -> usize {
        self.doc_freqs.get(term_idx).copied().unwrap_or(0)
    }

    /// Vocabulary slot of an exact term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }

    /// Vocabulary slots of every term starting with `prefix` (including an
    /// exact match, if any).
    ///
    /// Sorted order puts all such terms in one contiguous run right where
    /// `prefix` itself would be inserted.
    pub fn prefix_range(&self, prefix: &str) -> Range<usize> {
        let start = self.vocabulary.partition_point(|term| term.as_str() < prefix);
        let len = self.vocabulary[start..].partition_point(|term| term.starts_with(prefix));
        start..start + len
    }

    /// Tokens in one document's field.
    #[inline]
    pub fn field_len(&self, doc: u32, field: Field) -> u32 {
        self.field_lengths
            .get(doc as usize)
            .map_or(0, |lengths| lengths[field.index()])
    }

    /// Mean tokens per document in a field.
    #[inline]
    pub fn avg_field_len(&self, field: Field) -> f64 {
        self.avg_field_lengths[field.index()]
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::empty()
    }
}
